//! Jittering rectangles whose agitation grows with the crowd
//!
//! Every tick each rectangle shifts horizontally by a random amount bounded
//! by the shared franticness. Franticness tracks population size until it
//! hits its cap, then stays there.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::{Motion, TickContext};
use super::rng::SketchRng;
use crate::consts::ALPHA_MAX;
use crate::renderer::{Canvas, Rgba};
use crate::{Bounds, map_range};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitterParams {
    /// Population size at which franticness reaches its cap
    pub capacity: usize,
    /// Franticness with an empty canvas
    pub calm: f32,
    /// Franticness latches once it reaches this
    pub frantic_cap: f32,
    /// Base tilt in degrees
    pub angle: f32,
    /// Random tilt added at spawn, degrees either way
    pub angle_spread: f32,
    pub width: (f32, f32),
    pub height: (f32, f32),
    pub stroke: Rgba,
}

impl Default for JitterParams {
    fn default() -> Self {
        Self {
            capacity: 500,
            calm: 1.0,
            frantic_cap: 10.0,
            angle: 25.0,
            angle_spread: 5.0,
            width: (30.0, 400.0),
            height: (20.0, 360.0),
            stroke: Rgba::BLACK,
        }
    }
}

/// Jitter amplitude shared by the whole population
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Franticness(pub f32);

impl Default for Franticness {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Franticness {
    /// Follow the population until the cap is reached, never past it
    pub fn update(&mut self, population: usize, params: &JitterParams) {
        if self.0 < params.frantic_cap {
            self.0 = map_range(
                population as f32,
                0.0,
                params.capacity as f32,
                params.calm,
                params.frantic_cap,
            )
            .min(params.frantic_cap);
        }
    }
}

/// Rectangle anchored at its top-left corner and tilted about it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    pub pos: Vec2,
    /// Tilt in radians
    pub angle: f32,
    pub size: Vec2,
}

impl Motion for Jitter {
    type Params = JitterParams;
    type Shared = Franticness;

    fn spawn(params: &JitterParams, bounds: Bounds, rng: &mut SketchRng) -> Self {
        let tilt = params.angle + rng.uniform(-params.angle_spread, params.angle_spread);
        Self {
            pos: Vec2::new(rng.below(bounds.width), rng.below(bounds.height)),
            angle: tilt.to_radians(),
            size: Vec2::new(rng.in_range(params.width), rng.in_range(params.height)),
        }
    }

    fn prepare(params: &JitterParams, shared: &mut Franticness, ctx: &TickContext) {
        shared.update(ctx.population, params);
    }

    fn advance(
        &self,
        _params: &JitterParams,
        shared: &Franticness,
        _ctx: &TickContext,
        rng: &mut SketchRng,
    ) -> Self {
        let amplitude = shared.0;
        Self {
            pos: self.pos + Vec2::new(rng.uniform(-amplitude, amplitude), 0.0),
            ..*self
        }
    }

    fn render(&self, params: &JitterParams, canvas: &mut dyn Canvas, _bounds: Bounds) {
        canvas.set_stroke(params.stroke);
        canvas.set_stroke_width(1.0);
        canvas.no_fill();
        canvas.push();
        canvas.translate(self.pos);
        canvas.rotate(self.angle);
        canvas.rect(self.size * 0.5, self.size);
        canvas.pop();
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn alpha(&self) -> f32 {
        ALPHA_MAX
    }

    fn is_expired(&self, bounds: Bounds) -> bool {
        self.pos.x + self.size.x <= 0.0 || self.pos.x >= bounds.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_franticness_tracks_population() {
        let params = JitterParams::default();
        let mut f = Franticness::default();
        f.update(250, &params);
        assert_eq!(f.0, 5.5);
        // Still below the cap: follows the crowd down too
        f.update(0, &params);
        assert_eq!(f.0, 1.0);
    }

    #[test]
    fn test_franticness_latches_at_cap() {
        let params = JitterParams::default();
        let mut f = Franticness::default();
        f.update(500, &params);
        assert_eq!(f.0, 10.0);
        f.update(10, &params);
        assert_eq!(f.0, 10.0);
    }

    #[test]
    fn test_franticness_overcrowded_stays_at_cap() {
        let params = JitterParams::default();
        let mut f = Franticness::default();
        f.update(600, &params);
        assert_eq!(f.0, 10.0);
        f.update(5000, &params);
        assert_eq!(f.0, 10.0);
    }

    #[test]
    fn test_jitter_bounded_by_franticness() {
        let mut rng = SketchRng::seeded(12);
        let params = JitterParams::default();
        let ctx = TickContext {
            tick: 1,
            bounds: Bounds::default(),
            population: 1,
        };
        let j = Jitter {
            pos: Vec2::new(100.0, 100.0),
            angle: 0.0,
            size: Vec2::new(50.0, 20.0),
        };
        for _ in 0..500 {
            let next = j.advance(&params, &Franticness(3.0), &ctx, &mut rng);
            assert!((next.pos.x - 100.0).abs() <= 3.0);
            assert_eq!(next.pos.y, 100.0);
        }
    }

    #[test]
    fn test_off_canvas_accounts_for_width() {
        let bounds = Bounds::default();
        let mut j = Jitter {
            pos: Vec2::new(-49.0, 10.0),
            angle: 0.0,
            size: Vec2::new(50.0, 20.0),
        };
        assert!(!j.is_expired(bounds));
        j.pos.x = -50.0;
        assert!(j.is_expired(bounds));
        j.pos.x = 399.0;
        assert!(!j.is_expired(bounds));
        j.pos.x = 400.0;
        assert!(j.is_expired(bounds));
    }
}

//! Falling rectangles pushed by wind
//!
//! Vertical speed compounds by `acceleration` each tick, the wind adds a
//! constant horizontal drift, and both dimensions wander by a signed rate
//! scaled by a fresh random factor every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::{Motion, TickContext};
use super::rng::SketchRng;
use crate::consts::ALPHA_MAX;
use crate::renderer::{Canvas, Rgba};
use crate::{Bounds, clamp_alpha, clamp_min};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallParams {
    /// Spawn height above the canvas
    pub drop_height: (f32, f32),
    pub width: (f32, f32),
    pub height: (f32, f32),
    pub speed: (f32, f32),
    pub acceleration: (f32, f32),
    pub fade: (f32, f32),
    pub wind: (f32, f32),
    pub drift: (f32, f32),
    /// Per-tick multiplier applied to the drift rate
    pub drift_factor: (f32, f32),
    /// Dimensions never shrink below this
    pub min_extent: f32,
    pub stroke: Rgba,
}

impl Default for FallParams {
    fn default() -> Self {
        Self {
            drop_height: (50.0, 150.0),
            width: (30.0, 100.0),
            height: (20.0, 80.0),
            speed: (1.0, 3.0),
            acceleration: (0.02, 0.05),
            fade: (1.0, 3.0),
            wind: (0.5, 2.0),
            drift: (-2.0, 2.0),
            drift_factor: (0.5, 2.0),
            min_extent: 5.0,
            stroke: Rgba::opaque(150.0, 255.0, 255.0),
        }
    }
}

/// Rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Faller {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub acceleration: f32,
    pub alpha: f32,
    pub fade: f32,
    pub wind: f32,
    pub drift: f32,
}

impl Motion for Faller {
    type Params = FallParams;
    type Shared = ();

    fn spawn(params: &FallParams, bounds: Bounds, rng: &mut SketchRng) -> Self {
        Self {
            pos: Vec2::new(rng.below(bounds.width), -rng.in_range(params.drop_height)),
            size: Vec2::new(rng.in_range(params.width), rng.in_range(params.height)),
            speed: rng.in_range(params.speed),
            acceleration: rng.in_range(params.acceleration),
            alpha: ALPHA_MAX,
            fade: rng.in_range(params.fade),
            wind: rng.in_range(params.wind),
            drift: rng.in_range(params.drift),
        }
    }

    fn advance(
        &self,
        params: &FallParams,
        _shared: &(),
        _ctx: &TickContext,
        rng: &mut SketchRng,
    ) -> Self {
        let dw = self.drift * rng.in_range(params.drift_factor);
        let dh = self.drift * rng.in_range(params.drift_factor);
        Self {
            pos: self.pos + Vec2::new(self.wind, self.speed),
            speed: self.speed + self.speed * self.acceleration,
            alpha: clamp_alpha(self.alpha - self.fade),
            size: Vec2::new(
                clamp_min(self.size.x + dw, params.min_extent),
                clamp_min(self.size.y + dh, params.min_extent),
            ),
            ..*self
        }
    }

    fn render(&self, params: &FallParams, canvas: &mut dyn Canvas, _bounds: Bounds) {
        canvas.set_stroke(params.stroke.with_alpha(self.alpha));
        canvas.set_stroke_width(1.0);
        canvas.no_fill();
        canvas.rect(self.pos + self.size * 0.5, self.size);
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn is_expired(&self, bounds: Bounds) -> bool {
        self.alpha <= 0.0
            || self.pos.y > bounds.height
            || self.pos.x > bounds.width
            || self.pos.x + self.size.x < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> TickContext {
        TickContext {
            tick: 1,
            bounds: Bounds::default(),
            population: 1,
        }
    }

    fn faller() -> Faller {
        Faller {
            pos: Vec2::new(100.0, 0.0),
            size: Vec2::new(40.0, 30.0),
            speed: 1.0,
            acceleration: 0.02,
            alpha: 255.0,
            fade: 2.0,
            wind: 1.0,
            drift: 0.0,
        }
    }

    #[test]
    fn test_speed_compounds() {
        let mut rng = SketchRng::seeded(20);
        let params = FallParams::default();
        let one = faller().advance(&params, &(), &ctx(), &mut rng);
        assert!((one.speed - 1.02).abs() < 1e-6);
        assert_eq!(one.pos, Vec2::new(101.0, 1.0));
        let two = one.advance(&params, &(), &ctx(), &mut rng);
        assert!((two.speed - 1.0404).abs() < 1e-6);
        assert!((two.pos.y - 2.02).abs() < 1e-6);
        assert_eq!(two.alpha, 251.0);
    }

    #[test]
    fn test_dimensions_floor() {
        let mut rng = SketchRng::seeded(21);
        let params = FallParams::default();
        let mut f = Faller {
            drift: -2.0,
            size: Vec2::new(6.0, 6.0),
            ..faller()
        };
        for _ in 0..20 {
            f = f.advance(&params, &(), &ctx(), &mut rng);
            assert!(f.size.x >= 5.0 && f.size.y >= 5.0);
        }
        assert_eq!(f.size, Vec2::splat(5.0));
    }

    #[test]
    fn test_below_canvas_expires_regardless_of_alpha() {
        let bounds = Bounds::default();
        let f = Faller {
            pos: Vec2::new(100.0, bounds.height + 1.0),
            ..faller()
        };
        assert_eq!(f.alpha, 255.0);
        assert!(f.is_expired(bounds));
        // Above the canvas is where fallers start
        let above = Faller {
            pos: Vec2::new(100.0, -120.0),
            ..faller()
        };
        assert!(!above.is_expired(bounds));
    }

    #[test]
    fn test_spawn_above_canvas() {
        let mut rng = SketchRng::seeded(22);
        for _ in 0..100 {
            let f = Faller::spawn(&FallParams::default(), Bounds::default(), &mut rng);
            assert!(f.pos.y <= -50.0 && f.pos.y > -150.0);
            assert!((0.02..0.05).contains(&f.acceleration));
            assert!(f.wind >= 0.5);
        }
    }
}

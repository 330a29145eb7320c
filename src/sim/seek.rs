//! Seek-and-retarget particles
//!
//! A seeker closes a fixed fraction of the gap to its target every tick, so
//! it approaches exponentially and never lands exactly. Once within
//! `arrive_radius` it draws a new target anywhere on the canvas. Seekers are
//! immortal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::{Motion, TickContext};
use super::rng::SketchRng;
use crate::consts::ALPHA_MAX;
use crate::renderer::{Canvas, Rgba};
use crate::{Bounds, clamp_alpha, lerp, map_range};

/// Lines fanning from the particle toward each canvas edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailStyle {
    pub segments: u32,
    pub color: Rgba,
    /// Stroke weight of the innermost segment, tapering to zero
    pub max_weight: f32,
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self {
            segments: 10,
            color: Rgba::opaque(255.0, 0.0, 0.0),
            max_weight: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekParams {
    /// Fraction of the remaining distance covered per tick
    pub lerp_speed: f32,
    /// Re-target below this distance
    pub arrive_radius: f32,
    /// Body diameter
    pub size: f32,
    /// Derive alpha from the distance moved this tick
    pub alpha_from_speed: bool,
    /// Speed mapped onto full opacity
    pub max_speed: f32,
    pub trail: Option<TrailStyle>,
    pub body: Rgba,
}

impl Default for SeekParams {
    fn default() -> Self {
        Self {
            lerp_speed: 0.005,
            arrive_radius: 1.0,
            size: 5.0,
            alpha_from_speed: false,
            max_speed: 2.0,
            trail: None,
            body: Rgba::opaque(180.0, 255.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seeker {
    pub pos: Vec2,
    pub target: Vec2,
    pub alpha: f32,
}

impl Seeker {
    /// Seeker at rest; its first tick picks a target
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            target: pos,
            alpha: ALPHA_MAX,
        }
    }

    pub fn distance_to_target(&self) -> f32 {
        crate::distance(self.pos, self.target)
    }

    fn draw_trail(&self, style: &TrailStyle, canvas: &mut dyn Canvas, bounds: Bounds) {
        let Vec2 { x, y } = self.pos;
        for i in 0..style.segments {
            let t = i as f32 / style.segments as f32;
            canvas.set_stroke(style.color.with_alpha(self.alpha * (1.0 - t)));
            canvas.set_stroke_width(map_range(t, 0.0, 1.0, style.max_weight, 0.0));

            canvas.line(self.pos, Vec2::new(lerp(x, 0.0, t), y));
            canvas.line(self.pos, Vec2::new(lerp(x, bounds.width, t), y));
            canvas.line(self.pos, Vec2::new(x, lerp(y, 0.0, t)));
            canvas.line(self.pos, Vec2::new(x, lerp(y, bounds.height, t)));
        }
    }
}

impl Motion for Seeker {
    type Params = SeekParams;
    type Shared = ();

    fn spawn(_params: &SeekParams, bounds: Bounds, rng: &mut SketchRng) -> Self {
        Self::at(Vec2::new(rng.below(bounds.width), rng.below(bounds.height)))
    }

    fn advance(
        &self,
        params: &SeekParams,
        _shared: &(),
        ctx: &TickContext,
        rng: &mut SketchRng,
    ) -> Self {
        let mut next = *self;
        next.pos = Vec2::new(
            lerp(self.pos.x, self.target.x, params.lerp_speed),
            lerp(self.pos.y, self.target.y, params.lerp_speed),
        );

        if params.alpha_from_speed {
            let speed = crate::distance(next.pos, self.pos);
            next.alpha = clamp_alpha(map_range(speed, 0.0, params.max_speed, 0.0, ALPHA_MAX));
        }

        if next.distance_to_target() < params.arrive_radius {
            next.target = Vec2::new(rng.below(ctx.bounds.width), rng.below(ctx.bounds.height));
        }
        next
    }

    fn render(&self, params: &SeekParams, canvas: &mut dyn Canvas, bounds: Bounds) {
        if let Some(trail) = &params.trail {
            self.draw_trail(trail, canvas, bounds);
        }
        canvas.no_stroke();
        canvas.set_fill(params.body);
        canvas.ellipse(self.pos, Vec2::splat(params.size));
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn is_expired(&self, _bounds: Bounds) -> bool {
        false
    }
}

//! Blooms: rotating outlines that expand toward a maximum size
//!
//! Opacity is the inverse of progress: a bloom is fully opaque at size 0 and
//! reaches alpha 0 exactly when it reaches `max_size`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::{Motion, TickContext};
use super::rng::SketchRng;
use crate::consts::{ALPHA_MAX, MIN_EXTENT};
use crate::renderer::shapes::regular_polygon;
use crate::renderer::{Canvas, Rgba};
use crate::{Bounds, clamp_alpha, map_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
    Polygon { sides: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomParams {
    /// `max_size` is the canvas width times a draw from this range
    pub max_size_factor: (f32, f32),
    /// Ticks needed to reach `max_size`, drawn per bloom
    pub duration: (f32, f32),
    /// Polygon side count, `[min, max)`
    pub sides: (i32, i32),
    /// Angular rate in radians per tick
    pub spin: (f32, f32),
    pub stroke: Rgba,
    pub stroke_width: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            max_size_factor: (0.5, 1.0),
            duration: (30.0, 180.0),
            sides: (3, 8),
            spin: (-0.05, 0.05),
            stroke: Rgba::opaque(240.0, 255.0, 255.0),
            stroke_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bloom {
    pub pos: Vec2,
    pub size: f32,
    pub max_size: f32,
    pub expansion_rate: f32,
    pub alpha: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub shape: ShapeKind,
}

impl Motion for Bloom {
    type Params = BloomParams;
    type Shared = ();

    fn spawn(params: &BloomParams, bounds: Bounds, rng: &mut SketchRng) -> Self {
        let max_size = (bounds.width * rng.in_range(params.max_size_factor)).max(MIN_EXTENT);
        let expansion_rate = max_size / rng.in_range(params.duration).max(1.0);

        let shape = match rng.int(0, 3) {
            0 => ShapeKind::Circle,
            1 => ShapeKind::Square,
            _ => ShapeKind::Polygon {
                sides: rng.int(params.sides.0, params.sides.1).max(3) as u32,
            },
        };

        Self {
            pos: bounds.center(),
            size: 0.0,
            max_size,
            expansion_rate,
            alpha: ALPHA_MAX,
            rotation: 0.0,
            rotation_speed: rng.in_range(params.spin),
            shape,
        }
    }

    fn advance(
        &self,
        _params: &BloomParams,
        _shared: &(),
        _ctx: &TickContext,
        _rng: &mut SketchRng,
    ) -> Self {
        let size = self.size + self.expansion_rate;
        Self {
            size,
            alpha: clamp_alpha(map_range(size, 0.0, self.max_size, ALPHA_MAX, 0.0)),
            rotation: self.rotation + self.rotation_speed,
            ..*self
        }
    }

    fn render(&self, params: &BloomParams, canvas: &mut dyn Canvas, _bounds: Bounds) {
        let extent = self.size.max(MIN_EXTENT);
        canvas.set_stroke(params.stroke.with_alpha(self.alpha));
        canvas.set_stroke_width(params.stroke_width);
        canvas.no_fill();

        canvas.push();
        canvas.translate(self.pos);
        canvas.rotate(self.rotation);
        match self.shape {
            ShapeKind::Circle => canvas.ellipse(Vec2::ZERO, Vec2::splat(extent)),
            ShapeKind::Square => canvas.rect(Vec2::ZERO, Vec2::splat(extent)),
            ShapeKind::Polygon { sides } => {
                canvas.polygon(&regular_polygon(Vec2::ZERO, extent / 2.0, sides))
            }
        }
        canvas.pop();
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn is_expired(&self, _bounds: Bounds) -> bool {
        self.alpha <= 0.0
    }
}

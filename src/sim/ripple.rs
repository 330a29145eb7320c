//! Ripples: circles that grow at a constant rate while fading out

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::{Motion, TickContext};
use super::rng::SketchRng;
use crate::consts::{ALPHA_MAX, MIN_EXTENT};
use crate::renderer::{Canvas, Rgba};
use crate::{Bounds, clamp_alpha};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleParams {
    /// Radius gained per tick
    pub growth: f32,
    /// Alpha lost per tick
    pub fade: f32,
    pub stroke: Rgba,
}

impl Default for RippleParams {
    fn default() -> Self {
        Self {
            growth: 2.0,
            fade: 1.0,
            stroke: Rgba::opaque(0.0, 0.0, 255.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

impl Motion for Ripple {
    type Params = RippleParams;
    type Shared = ();

    fn spawn(_params: &RippleParams, bounds: Bounds, rng: &mut SketchRng) -> Self {
        Self {
            pos: Vec2::new(rng.below(bounds.width), rng.below(bounds.height)),
            radius: 0.0,
            alpha: ALPHA_MAX,
        }
    }

    fn advance(
        &self,
        params: &RippleParams,
        _shared: &(),
        _ctx: &TickContext,
        _rng: &mut SketchRng,
    ) -> Self {
        Self {
            radius: self.radius + params.growth,
            alpha: clamp_alpha(self.alpha - params.fade),
            ..*self
        }
    }

    fn render(&self, params: &RippleParams, canvas: &mut dyn Canvas, _bounds: Bounds) {
        canvas.set_stroke(params.stroke.with_alpha(self.alpha));
        canvas.set_stroke_width(1.0);
        canvas.no_fill();
        canvas.ellipse(self.pos, Vec2::splat((self.radius * 2.0).max(MIN_EXTENT)));
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

//! Sketchbook - generative-animation sketches on a shared entity engine
//!
//! Core modules:
//! - `sim`: Entity lifecycle, motion models, proximity links, frame driver
//! - `renderer`: Drawing primitive interface and its adapters
//! - `gallery`: The six reference sketches
//! - `settings`: Data-driven sketch configuration

pub mod gallery;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use gallery::SketchKind;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    /// Reference canvas dimensions
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Opacity range shared by every entity
    pub const ALPHA_MIN: f32 = 0.0;
    pub const ALPHA_MAX: f32 = 255.0;

    /// Smallest extent ever handed to the canvas
    pub const MIN_EXTENT: f32 = 0.5;

    /// Pairs closer than this are linked
    pub const LINK_DISTANCE: f32 = 100.0;

    /// Segments used when tessellating ellipses
    pub const ELLIPSE_SEGMENTS: u32 = 32;
}

/// Canvas extent, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: consts::CANVAS_WIDTH,
            height: consts::CANVAS_HEIGHT,
        }
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Linear interpolation from `a` to `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Re-map `value` from `[in_min, in_max]` onto `[out_min, out_max]` (unclamped)
#[inline]
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}

/// Raise `value` to at least `floor`
#[inline]
pub fn clamp_min(value: f32, floor: f32) -> f32 {
    value.max(floor)
}

/// Clamp an opacity into the renderable range
#[inline]
pub fn clamp_alpha(alpha: f32) -> f32 {
    if alpha.is_nan() {
        return consts::ALPHA_MIN;
    }
    alpha.clamp(consts::ALPHA_MIN, consts::ALPHA_MAX)
}

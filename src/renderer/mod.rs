//! Drawing primitive interface
//!
//! Every motion model and the proximity linker draw through [`Canvas`].
//! Two adapters ship with the crate:
//! - [`MeshCanvas`]: tessellates into coloured triangles for a wgpu vertex buffer
//! - [`RecordingCanvas`]: keeps the primitive calls for inspection

pub mod mesh;
pub mod record;
pub mod shapes;
pub mod vertex;

pub use mesh::MeshCanvas;
pub use record::{DrawCommand, RecordingCanvas};
pub use vertex::Vertex;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_alpha;

/// Colour with channels in `0..=255`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::opaque(255.0, 255.0, 255.0);

    /// Alpha is clamped into `[0, 255]`
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: clamp_alpha(a),
        }
    }

    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 255.0 }
    }

    /// Same colour at a new (clamped) opacity
    pub fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    pub fn is_transparent(&self) -> bool {
        clamp_alpha(self.a) <= 0.0
    }

    /// Normalized `[r, g, b, a]` for vertex colours
    pub fn to_unit(self) -> [f32; 4] {
        [
            (self.r / 255.0).clamp(0.0, 1.0),
            (self.g / 255.0).clamp(0.0, 1.0),
            (self.b / 255.0).clamp(0.0, 1.0),
            clamp_alpha(self.a) / 255.0,
        ]
    }
}

/// Immediate-mode 2D drawing surface
///
/// Stroke and fill state persist until changed. `push`/`pop` scope the
/// transform; `translate` and `rotate` compose within the current scope.
pub trait Canvas {
    /// Paint the whole canvas; a translucent colour fades the previous frame
    fn clear_background(&mut self, color: Rgba);

    fn set_stroke(&mut self, color: Rgba);
    fn no_stroke(&mut self);
    fn set_fill(&mut self, color: Rgba);
    fn no_fill(&mut self);
    fn set_stroke_width(&mut self, width: f32);

    fn line(&mut self, a: Vec2, b: Vec2);
    /// Ellipse with full width/height `size`
    fn ellipse(&mut self, center: Vec2, size: Vec2);
    /// Center-anchored rectangle
    fn rect(&mut self, center: Vec2, size: Vec2);
    /// Closed polygon
    fn polygon(&mut self, points: &[Vec2]);

    fn push(&mut self);
    fn pop(&mut self);
    fn translate(&mut self, offset: Vec2);
    /// Rotate by `angle` radians
    fn rotate(&mut self, angle: f32);
}

//! Triangle-mesh canvas
//!
//! Tessellates every primitive into [`Vertex`] triangles in canvas space,
//! ready to upload as a wgpu vertex buffer with [`Vertex::desc`].

use glam::{Affine2, Vec2};

use super::shapes::{ellipse_points, fill_convex, line_quad, rect_points, stroke_path};
use super::{Canvas, Rgba, Vertex};
use crate::Bounds;
use crate::consts::ELLIPSE_SEGMENTS;

#[derive(Debug, Clone, Copy)]
struct Style {
    stroke: Option<Rgba>,
    fill: Option<Rgba>,
    stroke_width: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: Some(Rgba::BLACK),
            fill: Some(Rgba::WHITE),
            stroke_width: 1.0,
        }
    }
}

/// Canvas that accumulates one frame of triangles
#[derive(Debug, Clone)]
pub struct MeshCanvas {
    bounds: Bounds,
    style: Style,
    transform: Affine2,
    stack: Vec<Affine2>,
    vertices: Vec<Vertex>,
}

impl MeshCanvas {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            style: Style::default(),
            transform: Affine2::IDENTITY,
            stack: Vec::new(),
            vertices: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for a GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Drop the accumulated triangles and reset drawing state for a new frame
    pub fn begin_frame(&mut self) {
        self.vertices.clear();
        self.stack.clear();
        self.transform = Affine2::IDENTITY;
    }

    fn emit_shape(&mut self, local: &[Vec2], closed: bool) {
        let points: Vec<Vec2> = local
            .iter()
            .map(|p| self.transform.transform_point2(*p))
            .collect();
        if closed {
            if let Some(fill) = self.style.fill.filter(|c| !c.is_transparent()) {
                self.vertices.extend(fill_convex(&points, fill));
            }
        }
        if let Some(stroke) = self.style.stroke.filter(|c| !c.is_transparent()) {
            self.vertices
                .extend(stroke_path(&points, closed, self.style.stroke_width, stroke));
        }
    }
}

impl Canvas for MeshCanvas {
    fn clear_background(&mut self, color: Rgba) {
        if color.is_transparent() {
            return;
        }
        let quad = rect_points(self.bounds.center(), self.bounds.size());
        self.vertices.extend(fill_convex(&quad, color));
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.style.stroke = Some(color);
    }

    fn no_stroke(&mut self) {
        self.style.stroke = None;
    }

    fn set_fill(&mut self, color: Rgba) {
        self.style.fill = Some(color);
    }

    fn no_fill(&mut self) {
        self.style.fill = None;
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.style.stroke_width = width.max(0.0);
    }

    fn line(&mut self, a: Vec2, b: Vec2) {
        let Some(stroke) = self.style.stroke.filter(|c| !c.is_transparent()) else {
            return;
        };
        let a = self.transform.transform_point2(a);
        let b = self.transform.transform_point2(b);
        self.vertices
            .extend(line_quad(a, b, self.style.stroke_width, stroke));
    }

    fn ellipse(&mut self, center: Vec2, size: Vec2) {
        let points = ellipse_points(center, size, ELLIPSE_SEGMENTS);
        self.emit_shape(&points, true);
    }

    fn rect(&mut self, center: Vec2, size: Vec2) {
        let points = rect_points(center, size);
        self.emit_shape(&points, true);
    }

    fn polygon(&mut self, points: &[Vec2]) {
        self.emit_shape(points, true);
    }

    fn push(&mut self) {
        self.stack.push(self.transform);
    }

    fn pop(&mut self) {
        // Unbalanced pops fall back to identity
        self.transform = self.stack.pop().unwrap_or(Affine2::IDENTITY);
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform = self.transform * Affine2::from_angle(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_quad_covers_canvas() {
        let mut canvas = MeshCanvas::new(Bounds::default());
        canvas.clear_background(Rgba::new(0.0, 0.0, 0.0, 20.0));
        assert_eq!(canvas.vertices().len(), 12);
        let max_x = canvas
            .vertices()
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_x, 400.0);
        assert_eq!(canvas.vertex_bytes().len(), 12 * 24);
    }

    #[test]
    fn test_transparent_and_disabled_styles_emit_nothing() {
        let mut canvas = MeshCanvas::new(Bounds::default());
        canvas.no_fill();
        canvas.set_stroke(Rgba::WHITE.with_alpha(0.0));
        canvas.ellipse(Vec2::splat(10.0), Vec2::splat(5.0));
        canvas.no_stroke();
        canvas.line(Vec2::ZERO, Vec2::ONE);
        assert!(canvas.vertices().is_empty());
    }

    #[test]
    fn test_transform_scope() {
        let mut canvas = MeshCanvas::new(Bounds::default());
        canvas.no_fill();
        canvas.set_stroke(Rgba::BLACK);
        canvas.push();
        canvas.translate(Vec2::new(100.0, 50.0));
        canvas.rotate(std::f32::consts::FRAC_PI_2);
        canvas.line(Vec2::ZERO, Vec2::new(10.0, 0.0));
        canvas.pop();
        // Rotated a quarter turn around (100, 50): the far end lands at (100, 60)
        let far = canvas.vertices()[2].position;
        assert!((far[0] - 100.5).abs() < 1e-3 || (far[0] - 99.5).abs() < 1e-3);
        assert!((far[1] - 60.0).abs() < 1e-3);

        canvas.begin_frame();
        canvas.line(Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert_eq!(canvas.vertices()[0].position, [0.0, 0.5]);
    }
}

//! Shape generation for 2D primitives
//!
//! Outline generators return points; the tessellators turn points into
//! triangle lists (two triangles per stroked segment, a fan per fill).

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use super::Rgba;

/// Points around an ellipse with full width/height `size`
pub fn ellipse_points(center: Vec2, size: Vec2, segments: u32) -> Vec<Vec2> {
    let radii = size * 0.5;
    (0..segments)
        .map(|i| {
            let theta = (i as f32 / segments as f32) * TAU;
            center + Vec2::new(radii.x * theta.cos(), radii.y * theta.sin())
        })
        .collect()
}

/// Corners of a center-anchored rectangle, clockwise from top-left
pub fn rect_points(center: Vec2, size: Vec2) -> Vec<Vec2> {
    let half = size * 0.5;
    vec![
        center + Vec2::new(-half.x, -half.y),
        center + Vec2::new(half.x, -half.y),
        center + Vec2::new(half.x, half.y),
        center + Vec2::new(-half.x, half.y),
    ]
}

/// Vertices of a regular polygon with `sides` corners on a circle of `radius`
pub fn regular_polygon(center: Vec2, radius: f32, sides: u32) -> Vec<Vec2> {
    let sides = sides.max(3);
    let step = TAU / sides as f32;
    (0..sides)
        .map(|i| {
            let a = i as f32 * step;
            center + Vec2::new(a.cos() * radius, a.sin() * radius)
        })
        .collect()
}

/// A stroked line segment as a quad
pub fn line_quad(a: Vec2, b: Vec2, width: f32, color: Rgba) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO || width <= 0.0 {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    vec![
        Vertex::at(a1, color),
        Vertex::at(a2, color),
        Vertex::at(b1, color),
        Vertex::at(b1, color),
        Vertex::at(a2, color),
        Vertex::at(b2, color),
    ]
}

/// Stroke a polyline, optionally closing it back to the first point
pub fn stroke_path(points: &[Vec2], closed: bool, width: f32, color: Rgba) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(points.len() * 6);
    for pair in points.windows(2) {
        vertices.extend(line_quad(pair[0], pair[1], width, color));
    }
    if closed && points.len() > 2 {
        vertices.extend(line_quad(points[points.len() - 1], points[0], width, color));
    }
    vertices
}

/// Fill a convex outline as a triangle fan around its centroid
pub fn fill_convex(points: &[Vec2], color: Rgba) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let centroid = points.iter().copied().sum::<Vec2>() / points.len() as f32;
    let mut vertices = Vec::with_capacity(points.len() * 3);

    for i in 0..points.len() {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];
        // Triangle from center to edge
        vertices.push(Vertex::at(centroid, color));
        vertices.push(Vertex::at(p1, color));
        vertices.push(Vertex::at(p2, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_polygon_radius() {
        let pts = regular_polygon(Vec2::new(10.0, 10.0), 5.0, 6);
        assert_eq!(pts.len(), 6);
        for p in &pts {
            assert!((p.distance(Vec2::new(10.0, 10.0)) - 5.0).abs() < 1e-4);
        }
        // Degenerate side counts are raised to a triangle
        assert_eq!(regular_polygon(Vec2::ZERO, 1.0, 1).len(), 3);
    }

    #[test]
    fn test_line_quad_width() {
        let v = line_quad(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.0, Rgba::WHITE);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [0.0, 1.0]);
        assert_eq!(v[1].position, [0.0, -1.0]);
        // Zero-length and zero-width lines emit nothing
        assert!(line_quad(Vec2::ONE, Vec2::ONE, 2.0, Rgba::WHITE).is_empty());
        assert!(line_quad(Vec2::ZERO, Vec2::ONE, 0.0, Rgba::WHITE).is_empty());
    }

    #[test]
    fn test_closed_path_and_fan() {
        let square = rect_points(Vec2::ZERO, Vec2::splat(2.0));
        assert_eq!(stroke_path(&square, true, 1.0, Rgba::WHITE).len(), 4 * 6);
        assert_eq!(stroke_path(&square, false, 1.0, Rgba::WHITE).len(), 3 * 6);
        assert_eq!(fill_convex(&square, Rgba::WHITE).len(), 4 * 3);
    }
}

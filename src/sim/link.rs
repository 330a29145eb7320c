//! Proximity links between nearby entities
//!
//! All-pairs scan: n(n-1)/2 distance checks per tick, O(n²) per frame.
//! Populations that use links hold tens of entities, so no spatial index is
//! kept. Bucketing positions into `threshold`-sized grid cells and testing
//! only neighbouring cells is the way to scale this up.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::{Canvas, Rgba};

/// Unordered pair of population indices, `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link {
    pub a: usize,
    pub b: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkStyle {
    /// Pairs strictly closer than this are linked
    pub threshold: f32,
    pub color: Rgba,
    pub width: f32,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            threshold: crate::consts::LINK_DISTANCE,
            color: Rgba::opaque(150.0, 255.0, 0.0),
            width: 1.0,
        }
    }
}

/// Every pair of positions closer than `threshold`
pub fn find_links(positions: &[Vec2], threshold: f32) -> Vec<Link> {
    let mut links = Vec::new();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if crate::distance(positions[i], positions[j]) < threshold {
                links.push(Link { a: i, b: j });
            }
        }
    }
    links
}

/// Stroke one line per link
pub fn draw_links(canvas: &mut dyn Canvas, positions: &[Vec2], links: &[Link], style: &LinkStyle) {
    if links.is_empty() {
        return;
    }
    canvas.set_stroke(style.color);
    canvas.set_stroke_width(style.width);
    for link in links {
        canvas.line(positions[link.a], positions[link.b]);
    }
}

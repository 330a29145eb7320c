//! Recording canvas
//!
//! Captures primitive calls together with the style in effect, so a frame
//! can be inspected or dumped as JSON.

use glam::Vec2;
use serde::Serialize;

use super::{Canvas, Rgba};

/// One captured primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Background {
        color: Rgba,
    },
    Line {
        a: Vec2,
        b: Vec2,
        stroke: Option<Rgba>,
        width: f32,
    },
    Ellipse {
        center: Vec2,
        size: Vec2,
        stroke: Option<Rgba>,
        fill: Option<Rgba>,
    },
    Rect {
        center: Vec2,
        size: Vec2,
        stroke: Option<Rgba>,
        fill: Option<Rgba>,
    },
    Polygon {
        points: Vec<Vec2>,
        stroke: Option<Rgba>,
        fill: Option<Rgba>,
    },
    Push,
    Pop,
    Translate(Vec2),
    Rotate(f32),
}

impl DrawCommand {
    /// Stroke and fill colours this command paints with
    pub fn colors(&self) -> Vec<Rgba> {
        match self {
            DrawCommand::Background { color } => vec![*color],
            DrawCommand::Line { stroke, .. } => stroke.iter().copied().collect(),
            DrawCommand::Ellipse { stroke, fill, .. }
            | DrawCommand::Rect { stroke, fill, .. }
            | DrawCommand::Polygon { stroke, fill, .. } => {
                stroke.iter().chain(fill.iter()).copied().collect()
            }
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
    stroke: Option<Rgba>,
    fill: Option<Rgba>,
    width: f32,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            stroke: Some(Rgba::BLACK),
            fill: Some(Rgba::WHITE),
            width: 1.0,
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Canvas for RecordingCanvas {
    fn clear_background(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Background { color });
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.stroke = Some(color);
    }

    fn no_stroke(&mut self) {
        self.stroke = None;
    }

    fn set_fill(&mut self, color: Rgba) {
        self.fill = Some(color);
    }

    fn no_fill(&mut self) {
        self.fill = None;
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.width = width;
    }

    fn line(&mut self, a: Vec2, b: Vec2) {
        self.commands.push(DrawCommand::Line {
            a,
            b,
            stroke: self.stroke,
            width: self.width,
        });
    }

    fn ellipse(&mut self, center: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            size,
            stroke: self.stroke,
            fill: self.fill,
        });
    }

    fn rect(&mut self, center: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Rect {
            center,
            size,
            stroke: self.stroke,
            fill: self.fill,
        });
    }

    fn polygon(&mut self, points: &[Vec2]) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            stroke: self.stroke,
            fill: self.fill,
        });
    }

    fn push(&mut self) {
        self.commands.push(DrawCommand::Push);
    }

    fn pop(&mut self) {
        self.commands.push(DrawCommand::Pop);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.commands.push(DrawCommand::Rotate(angle));
    }
}

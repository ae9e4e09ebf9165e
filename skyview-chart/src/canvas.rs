//! Drawing surface abstraction.
//!
//! The renderer issues screen-space primitives through [`Canvas`]. The SVG
//! writer in [`crate::plot`] and the [`RecordingCanvas`] used by tests are the
//! two implementations; an embedding UI provides its own.

use crate::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size_px: f64,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

pub trait Canvas {
    fn clear(&mut self, color: Color);

    fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: Color);

    fn stroke_circle(&mut self, x: f64, y: f64, r: f64, color: Color, width: f64);

    fn stroke_ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64, color: Color, width: f64);

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, width: f64);

    /// Closed outline through `points`.
    fn stroke_polygon(&mut self, points: &[(f64, f64)], color: Color, width: f64);

    /// Draws unmirrored glyphs with the anchor at `(x, y)`.
    fn text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillCircle { x: f64, y: f64, r: f64, color: Color },
    StrokeCircle { x: f64, y: f64, r: f64, color: Color },
    StrokeEllipse { x: f64, y: f64, rx: f64, ry: f64, color: Color },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, color: Color },
    Polygon { points: Vec<(f64, f64)>, color: Color },
    Text { text: String, x: f64, y: f64, style: TextStyle },
}

/// Canvas that keeps every primitive for later inspection.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, f64, f64, &TextStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, x, y, style } => Some((text.as_str(), *x, *y, style)),
            _ => None,
        })
    }

    pub fn text_at(&self, label: &str) -> Option<(f64, f64, TextStyle)> {
        self.texts()
            .find(|(t, ..)| *t == label)
            .map(|(_, x, y, s)| (x, y, *s))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle { x, y, r, color });
    }

    fn stroke_circle(&mut self, x: f64, y: f64, r: f64, color: Color, _width: f64) {
        self.commands.push(DrawCommand::StrokeCircle { x, y, r, color });
    }

    fn stroke_ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64, color: Color, _width: f64) {
        self.commands
            .push(DrawCommand::StrokeEllipse { x, y, rx, ry, color });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, _width: f64) {
        self.commands.push(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }

    fn stroke_polygon(&mut self, points: &[(f64, f64)], color: Color, _width: f64) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
    }
}

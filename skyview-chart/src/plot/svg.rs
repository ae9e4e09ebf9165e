use crate::canvas::{Canvas, TextAlign, TextBaseline, TextStyle};
use crate::error::{Error, Result};
use crate::style::Color;
use plotters::coord::Shift;
use plotters::prelude::{
    Circle, DrawingArea, IntoDrawingArea, IntoFont, PathElement, RGBAColor, SVGBackend, ShapeStyle,
    Text,
};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::Color as _;
use std::path::Path;

/// Segments used to approximate an ellipse outline.
const ELLIPSE_SEGMENTS: usize = 48;

fn rgba(c: Color) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.alpha_f64())
}

fn stroke(c: Color, width: f64) -> ShapeStyle {
    rgba(c).stroke_width(width.round().max(1.0) as u32)
}

fn px(x: f64, y: f64) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

/// [`Canvas`] writing SVG through plotters.
///
/// Drawing calls cannot fail individually; the first backend error is kept
/// and returned by [`SvgCanvas::finish`].
pub struct SvgCanvas<'a> {
    area: DrawingArea<SVGBackend<'a>, Shift>,
    error: Option<String>,
}

impl<'a> SvgCanvas<'a> {
    pub fn to_file(path: &'a Path, width: u32, height: u32) -> Self {
        Self::from_backend(SVGBackend::new(path, (width, height)))
    }

    pub fn in_memory(buffer: &'a mut String, width: u32, height: u32) -> Self {
        Self::from_backend(SVGBackend::with_string(buffer, (width, height)))
    }

    fn from_backend(backend: SVGBackend<'a>) -> Self {
        Self {
            area: backend.into_drawing_area(),
            error: None,
        }
    }

    fn keep<E: std::fmt::Display>(&mut self, result: std::result::Result<(), E>) {
        if let Err(e) = result {
            if self.error.is_none() {
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn finish(mut self) -> Result<()> {
        let presented = self.area.present();
        self.keep(presented);
        match self.error {
            Some(message) => Err(Error::Render(message)),
            None => Ok(()),
        }
    }
}

impl Canvas for SvgCanvas<'_> {
    fn clear(&mut self, color: Color) {
        let result = self.area.fill(&rgba(color));
        self.keep(result);
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64, color: Color) {
        let radius = r.round().max(1.0) as i32;
        let result = self.area.draw(&Circle::new(px(x, y), radius, rgba(color).filled()));
        self.keep(result);
    }

    fn stroke_circle(&mut self, x: f64, y: f64, r: f64, color: Color, width: f64) {
        let radius = r.round().max(1.0) as i32;
        let result = self.area.draw(&Circle::new(px(x, y), radius, stroke(color, width)));
        self.keep(result);
    }

    fn stroke_ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64, color: Color, width: f64) {
        let points: Vec<(i32, i32)> = (0..=ELLIPSE_SEGMENTS)
            .map(|k| {
                let a = k as f64 / ELLIPSE_SEGMENTS as f64 * std::f64::consts::TAU;
                px(x + rx * a.cos(), y + ry * a.sin())
            })
            .collect();
        let result = self.area.draw(&PathElement::new(points, stroke(color, width)));
        self.keep(result);
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color, width: f64) {
        let result = self
            .area
            .draw(&PathElement::new(vec![px(x1, y1), px(x2, y2)], stroke(color, width)));
        self.keep(result);
    }

    fn stroke_polygon(&mut self, points: &[(f64, f64)], color: Color, width: f64) {
        let mut path: Vec<(i32, i32)> = points.iter().map(|&(x, y)| px(x, y)).collect();
        if let Some(&first) = path.first() {
            path.push(first);
        }
        let result = self.area.draw(&PathElement::new(path, stroke(color, width)));
        self.keep(result);
    }

    fn text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        let h = match style.align {
            TextAlign::Left => HPos::Left,
            TextAlign::Center => HPos::Center,
            TextAlign::Right => HPos::Right,
        };
        let v = match style.baseline {
            TextBaseline::Top => VPos::Top,
            TextBaseline::Middle => VPos::Center,
        };
        let font = ("sans-serif", style.size_px)
            .into_font()
            .color(&rgba(style.color))
            .pos(Pos::new(h, v));
        let result = self.area.draw(&Text::new(text.to_string(), px(x, y), font));
        self.keep(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_svg_elements() {
        let mut out = String::new();
        {
            let mut canvas = SvgCanvas::in_memory(&mut out, 200, 100);
            canvas.clear(Color::BLACK);
            canvas.stroke_circle(100.0, 50.0, 40.0, Color::WHITE, 1.0);
            canvas.line(0.0, 0.0, 200.0, 100.0, Color::RED, 2.0);
            canvas.text(
                "Vega",
                120.0,
                40.0,
                &TextStyle {
                    color: Color::WHITE,
                    size_px: 10.0,
                    align: TextAlign::Left,
                    baseline: TextBaseline::Middle,
                },
            );
            canvas.finish().unwrap();
        }
        assert!(out.contains("<svg"));
        assert!(out.contains("<circle"));
        assert!(out.contains("Vega"));
    }
}

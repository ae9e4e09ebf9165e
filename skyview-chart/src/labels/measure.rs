/// Text extents in pixels.
pub trait TextMeasurer {
    /// Returns `(width, height)` of `text` at `font_px`.
    fn measure(&self, text: &str, font_px: f64) -> (f64, f64);
}

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.2;

/// Estimates width from a fixed average glyph advance.
///
/// Good enough for sans-serif Latin labels; a UI with real font metrics
/// supplies its own measurer.
#[derive(Debug, Clone, Copy)]
pub struct AverageAdvance {
    pub advance: f64,
}

impl Default for AverageAdvance {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasurer for AverageAdvance {
    fn measure(&self, text: &str, font_px: f64) -> (f64, f64) {
        let glyphs = text.chars().count() as f64;
        (glyphs * self.advance * font_px, font_px * LINE_HEIGHT)
    }
}

//! Polar chart projection and the zoom/pan/mirror viewport.
//!
//! The sky hemisphere maps onto a disc: the zenith at the center, the horizon
//! on the rim, north at the top and east to the right.
//!
//! ```text
//! rr = (90 − alt) / 90 · R
//! x  = cx + rr · sin(az)
//! y  = cy − rr · cos(az)
//! ```
//!
//! The [`Viewport`] then maps chart coordinates to screen pixels. Mirroring
//! reflects the chart across its vertical center line before zoom and pan,
//! so dragging still moves the chart with the pointer.

use crate::Horizontal;
use skyview_core::constants::DEG_TO_RAD;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 200.0;

/// Fraction of the half-extent used for the horizon circle.
pub const DISC_FILL: f64 = 0.95;

/// Disc placement on a canvas, in chart (unzoomed) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl ChartGeometry {
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            cx: width / 2.0,
            cy: height / 2.0,
            radius: DISC_FILL * width.min(height) / 2.0,
        }
    }

    /// Projects a horizontal position into chart coordinates.
    ///
    /// Below-horizon positions land outside the disc; nothing is clipped here.
    pub fn project(&self, hz: Horizontal) -> (f64, f64) {
        let rr = (90.0 - hz.alt_deg) / 90.0 * self.radius;
        let (sin_a, cos_a) = libm::sincos(hz.az_deg * DEG_TO_RAD);
        (self.cx + rr * sin_a, self.cy - rr * cos_a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub mirrored: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: MIN_ZOOM,
            pan_x: 0.0,
            pan_y: 0.0,
            mirrored: false,
        }
    }
}

impl Viewport {
    pub fn new(zoom: f64, pan_x: f64, pan_y: f64, mirrored: bool) -> Self {
        Self {
            zoom: clamp_zoom(zoom),
            pan_x,
            pan_y,
            mirrored,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    pub fn to_screen(&self, geometry: &ChartGeometry, x: f64, y: f64) -> (f64, f64) {
        let x = if self.mirrored { 2.0 * geometry.cx - x } else { x };
        (x * self.zoom + self.pan_x, y * self.zoom + self.pan_y)
    }

    pub fn to_chart(&self, geometry: &ChartGeometry, sx: f64, sy: f64) -> (f64, f64) {
        let x = (sx - self.pan_x) / self.zoom;
        let y = (sy - self.pan_y) / self.zoom;
        let x = if self.mirrored { 2.0 * geometry.cx - x } else { x };
        (x, y)
    }

    /// Multiplies the zoom by `factor`, keeping the chart point under the pivot fixed.
    ///
    /// The clamp is applied first, so a factor that would exceed the limits
    /// moves the pan only by the zoom change that actually happened.
    pub fn zoom_about(&mut self, factor: f64, pivot_x: f64, pivot_y: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let new_zoom = clamp_zoom(self.zoom * factor);
        let f = new_zoom / self.zoom;
        self.pan_x = f * self.pan_x + (1.0 - f) * pivot_x;
        self.pan_y = f * self.pan_y + (1.0 - f) * pivot_y;
        self.zoom = new_zoom;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn reset(&mut self) {
        *self = Self {
            mirrored: self.mirrored,
            ..Self::default()
        };
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        MIN_ZOOM
    }
}

/// A projected position in screen pixels with its horizontal coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub alt_deg: f64,
    pub az_deg: f64,
}

impl ScreenPoint {
    /// Altitude <= 0 is below the horizon: never drawn, never hit-testable.
    pub fn is_visible(&self) -> bool {
        self.alt_deg > 0.0
    }

    pub fn horizontal(&self) -> Horizontal {
        Horizontal::new(self.alt_deg, self.az_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> ChartGeometry {
        ChartGeometry::for_canvas(1000.0, 800.0)
    }

    #[test]
    fn test_disc_uses_shorter_side() {
        let g = geometry();
        assert_eq!(g.cx, 500.0);
        assert_eq!(g.cy, 400.0);
        assert!((g.radius - 380.0).abs() < 1e-12);
    }

    #[test]
    fn test_zenith_and_cardinal_points() {
        let g = geometry();
        let (x, y) = g.project(Horizontal::new(90.0, 123.0));
        assert!((x - g.cx).abs() < 1e-9 && (y - g.cy).abs() < 1e-9);

        let (x, y) = g.project(Horizontal::new(0.0, 0.0));
        assert!((x - g.cx).abs() < 1e-9);
        assert!((y - (g.cy - g.radius)).abs() < 1e-9, "north at top");

        let (x, y) = g.project(Horizontal::new(0.0, 90.0));
        assert!((x - (g.cx + g.radius)).abs() < 1e-9, "east to the right");
        assert!((y - g.cy).abs() < 1e-9);
    }

    #[test]
    fn test_mirror_reflects_about_center() {
        let g = geometry();
        let plain = Viewport::default();
        let mirrored = Viewport::new(1.0, 0.0, 0.0, true);
        let (x, y) = g.project(Horizontal::new(30.0, 70.0));
        let (px, py) = plain.to_screen(&g, x, y);
        let (mx, my) = mirrored.to_screen(&g, x, y);
        assert!((px + mx - 2.0 * g.cx).abs() < 1e-9);
        assert_eq!(py, my);
    }

    #[test]
    fn test_screen_chart_inverse() {
        let g = geometry();
        let vp = Viewport::new(3.5, -120.0, 44.0, true);
        let (sx, sy) = vp.to_screen(&g, 321.0, 210.5);
        let (x, y) = vp.to_chart(&g, sx, sy);
        assert!((x - 321.0).abs() < 1e-9 && (y - 210.5).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_about_keeps_pivot_fixed() {
        let g = geometry();
        let mut vp = Viewport::new(2.0, 10.0, -5.0, false);
        let pivot = (640.0, 300.0);
        let before = vp.to_chart(&g, pivot.0, pivot.1);
        vp.zoom_about(1.5, pivot.0, pivot.1);
        assert!((vp.zoom() - 3.0).abs() < 1e-12);
        let after = vp.to_chart(&g, pivot.0, pivot.1);
        assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut vp = Viewport::default();
        vp.zoom_about(0.25, 100.0, 100.0);
        assert_eq!(vp.zoom(), MIN_ZOOM);
        assert_eq!((vp.pan_x, vp.pan_y), (0.0, 0.0));
        vp.set_zoom(1e9);
        assert_eq!(vp.zoom(), MAX_ZOOM);
        vp.set_zoom(f64::NAN);
        assert_eq!(vp.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_reset_keeps_mirror() {
        let mut vp = Viewport::new(8.0, 5.0, 5.0, true);
        vp.reset();
        assert_eq!(vp.zoom(), 1.0);
        assert!(vp.mirrored);
    }
}

use crate::horizontal::{equatorial_to_horizontal, horizontal_to_equatorial, Equatorial, Horizontal};
use crate::projection::{ChartGeometry, ScreenPoint, Viewport};
use chrono::{DateTime, Utc};
use skyview_core::Location;
use skyview_time::{JulianDate, LST};

/// Everything needed to take a catalog position to a screen pixel for one redraw.
///
/// Built once per frame from the clock, the observer and the current view,
/// then shared read-only by the glyph, label and hit-test passes.
#[derive(Debug, Clone, Copy)]
pub struct FrameTransform {
    pub jd: JulianDate,
    pub lst: LST,
    pub location: Location,
    pub geometry: ChartGeometry,
    pub viewport: Viewport,
}

impl FrameTransform {
    pub fn new(
        jd: JulianDate,
        location: Location,
        geometry: ChartGeometry,
        viewport: Viewport,
    ) -> Self {
        Self {
            jd,
            lst: LST::from_julian_date(&jd, &location),
            location,
            geometry,
            viewport,
        }
    }

    pub fn at(
        now: &DateTime<Utc>,
        location: Location,
        geometry: ChartGeometry,
        viewport: Viewport,
    ) -> Self {
        Self::new(JulianDate::from_datetime(now), location, geometry, viewport)
    }

    pub fn zoom(&self) -> f64 {
        self.viewport.zoom()
    }

    pub fn mirrored(&self) -> bool {
        self.viewport.mirrored
    }

    pub fn to_horizontal(&self, ra_hours: f64, dec_deg: f64) -> Horizontal {
        equatorial_to_horizontal(Equatorial::new(ra_hours, dec_deg), &self.location, &self.lst)
    }

    pub fn to_equatorial(&self, hz: Horizontal) -> Equatorial {
        horizontal_to_equatorial(hz, &self.location, &self.lst)
    }

    pub fn project_equatorial(&self, ra_hours: f64, dec_deg: f64) -> ScreenPoint {
        self.project_horizontal(self.to_horizontal(ra_hours, dec_deg))
    }

    /// Direct alt/az projection, used for the mount reticle and calibration points.
    pub fn project_horizontal(&self, hz: Horizontal) -> ScreenPoint {
        let (x, y) = self.geometry.project(hz);
        let (sx, sy) = self.viewport.to_screen(&self.geometry, x, y);
        ScreenPoint {
            x: sx,
            y: sy,
            alt_deg: hz.alt_deg,
            az_deg: hz.az_deg,
        }
    }

    /// Chart center and horizon radius in screen pixels.
    pub fn screen_disc(&self) -> (f64, f64, f64) {
        let (cx, cy) = self
            .viewport
            .to_screen(&self.geometry, self.geometry.cx, self.geometry.cy);
        (cx, cy, self.geometry.radius * self.viewport.zoom())
    }

    /// True when the screen point lies within the canvas grown by `padding` on every side.
    pub fn in_viewport(&self, x: f64, y: f64, padding: f64) -> bool {
        x >= -padding
            && x <= self.geometry.width + padding
            && y >= -padding
            && y <= self.geometry.height + padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn frame(viewport: Viewport) -> FrameTransform {
        let t = Utc.with_ymd_and_hms(2024, 1, 15, 2, 0, 0).unwrap();
        FrameTransform::at(
            &t,
            Location::new(40.0, -74.0).unwrap(),
            ChartGeometry::for_canvas(800.0, 800.0),
            viewport,
        )
    }

    #[test]
    fn test_lst_derived_from_clock() {
        let f = frame(Viewport::default());
        let expected = LST::from_julian_date(&f.jd, &f.location);
        assert_eq!(f.lst, expected);
    }

    #[test]
    fn test_zenith_projects_to_disc_center() {
        let f = frame(Viewport::new(2.0, 30.0, -10.0, false));
        let p = f.project_horizontal(Horizontal::new(90.0, 0.0));
        let (cx, cy, r) = f.screen_disc();
        assert!((p.x - cx).abs() < 1e-9 && (p.y - cy).abs() < 1e-9);
        assert!((r - 760.0).abs() < 1e-9);
    }

    #[test]
    fn test_equatorial_projection_matches_horizontal() {
        let f = frame(Viewport::default());
        let hz = f.to_horizontal(5.9, 7.4);
        let a = f.project_equatorial(5.9, 7.4);
        let b = f.project_horizontal(hz);
        assert_eq!(a, b);
        let eq = f.to_equatorial(hz);
        assert!((eq.ra_hours - 5.9).abs() < 1e-9);
    }

    #[test]
    fn test_viewport_padding() {
        let f = frame(Viewport::default());
        assert!(f.in_viewport(-99.0, 400.0, 100.0));
        assert!(!f.in_viewport(-101.0, 400.0, 100.0));
        assert!(f.in_viewport(899.0, 899.0, 100.0));
    }
}

//! Visibility and adaptive culling.
//!
//! An object is drawn only when all of these hold:
//!
//! 1. its altitude is above 0°;
//! 2. its magnitude is strictly below the effective ceiling for its class,
//!    the minimum of the device-tier ceiling, the optional user ceiling and
//!    the zoom ceiling;
//! 3. when the profile enables viewport culling, its screen point lies inside
//!    the canvas grown by [`VIEWPORT_PADDING`] pixels.
//!
//! Every ceiling is non-decreasing in zoom, so zooming in never hides an
//! object that was visible.

use crate::catalog::ObjectClass;
use crate::profile::{CeilingGroup, CeilingTable, DeviceProfile};
use skyview_coords::{FrameTransform, ScreenPoint};
use std::collections::BTreeMap;

pub const VIEWPORT_PADDING: f64 = 100.0;

pub const STAR_SLIDER_MAX: u8 = 18;
pub const GALAXY_SLIDER_MAX: u8 = 20;

const GALAXY_SLIDER_STEPS: [f64; 6] = [2.2, 8.0, 10.0, 11.0, 12.0, 13.0];

/// Star slider position (1..=18) to limiting magnitude, half a magnitude per step.
pub fn star_slider_ceiling(position: u8) -> f64 {
    position.clamp(1, STAR_SLIDER_MAX) as f64 * 0.5
}

/// Galaxy slider position (1..=20) to limiting magnitude.
///
/// The first six steps are coarse; above them each step adds half a magnitude.
pub fn galaxy_slider_ceiling(position: u8) -> f64 {
    let pos = position.clamp(1, GALAXY_SLIDER_MAX);
    if pos <= 6 {
        GALAXY_SLIDER_STEPS[(pos - 1) as usize]
    } else {
        13.0 + (pos - 6) as f64 * 0.5
    }
}

/// Zoom-dependent ceiling; only galaxies are limited.
pub fn zoom_ceiling(class: ObjectClass, zoom: f64) -> f64 {
    match class {
        ObjectClass::Galaxy => {
            if zoom < 1.2 {
                11.0
            } else if zoom < 2.0 {
                12.5
            } else if zoom < 3.0 {
                14.0
            } else if zoom < 5.0 {
                15.5
            } else {
                17.0
            }
        }
        _ => f64::INFINITY,
    }
}

/// Faintest named star that gets a label at this zoom (inclusive).
pub fn star_label_ceiling(zoom: f64) -> f64 {
    if zoom < 1.5 {
        2.5
    } else if zoom < 3.0 {
        3.5
    } else if zoom < 5.0 {
        4.5
    } else {
        6.0
    }
}

/// Faintest named deep-sky object that gets a label at this zoom (inclusive).
pub fn deep_sky_label_ceiling(zoom: f64) -> f64 {
    if zoom < 1.2 {
        7.0
    } else if zoom < 2.0 {
        9.5
    } else {
        12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    BelowHorizon,
    TooFaint,
    OffScreen,
}

#[derive(Debug, Clone)]
pub struct VisibilityPolicy {
    table: CeilingTable,
    viewport_culling: bool,
    user: BTreeMap<ObjectClass, f64>,
}

impl VisibilityPolicy {
    pub fn new(profile: &DeviceProfile) -> Self {
        Self {
            table: profile.ceiling_table(),
            viewport_culling: profile.viewport_culling,
            user: BTreeMap::new(),
        }
    }

    pub fn set_user_ceiling(&mut self, class: ObjectClass, magnitude: Option<f64>) {
        match magnitude {
            Some(m) => self.user.insert(class, m),
            None => self.user.remove(&class),
        };
    }

    pub fn user_ceiling(&self, class: ObjectClass) -> Option<f64> {
        self.user.get(&class).copied()
    }

    pub fn effective_ceiling(&self, class: ObjectClass, zoom: f64) -> f64 {
        match class {
            ObjectClass::SolarSystem | ObjectClass::Constellation | ObjectClass::Calibration => {
                f64::INFINITY
            }
            _ => {
                let device = self.table.ceiling(CeilingGroup::for_class(class), zoom);
                let user = self.user_ceiling(class).unwrap_or(f64::INFINITY);
                device.min(user).min(zoom_ceiling(class, zoom))
            }
        }
    }

    /// Checks one projected object against the horizon, its ceiling and the viewport.
    pub fn check(
        &self,
        class: ObjectClass,
        magnitude: f64,
        point: &ScreenPoint,
        frame: &FrameTransform,
    ) -> Result<(), Rejection> {
        if !point.is_visible() {
            return Err(Rejection::BelowHorizon);
        }
        if !(magnitude < self.effective_ceiling(class, frame.zoom())) {
            return Err(Rejection::TooFaint);
        }
        if self.viewport_culling && !frame.in_viewport(point.x, point.y, VIEWPORT_PADDING) {
            return Err(Rejection::OffScreen);
        }
        Ok(())
    }
}

/// Per-frame culling tallies, for the debug log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    pub drawn: usize,
    pub below_horizon: usize,
    pub too_faint: usize,
    pub off_screen: usize,
}

impl CullStats {
    pub fn record(&mut self, outcome: Result<(), Rejection>) -> bool {
        match outcome {
            Ok(()) => {
                self.drawn += 1;
                true
            }
            Err(Rejection::BelowHorizon) => {
                self.below_horizon += 1;
                false
            }
            Err(Rejection::TooFaint) => {
                self.too_faint += 1;
                false
            }
            Err(Rejection::OffScreen) => {
                self.off_screen += 1;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DeviceTier;
    use chrono::TimeZone;
    use skyview_coords::{ChartGeometry, Horizontal, Viewport};
    use skyview_core::Location;

    fn frame(zoom: f64, pan_x: f64) -> FrameTransform {
        FrameTransform::at(
            &chrono::Utc.with_ymd_and_hms(2024, 2, 1, 4, 0, 0).unwrap(),
            Location::new(45.0, 7.0).unwrap(),
            ChartGeometry::for_canvas(600.0, 600.0),
            Viewport::new(zoom, pan_x, 0.0, false),
        )
    }

    #[test]
    fn test_slider_mappings() {
        assert_eq!(star_slider_ceiling(18), 9.0);
        assert_eq!(star_slider_ceiling(0), 0.5);
        assert_eq!(galaxy_slider_ceiling(1), 2.2);
        assert_eq!(galaxy_slider_ceiling(6), 13.0);
        assert_eq!(galaxy_slider_ceiling(8), 14.0);
        assert_eq!(galaxy_slider_ceiling(99), 20.0);
    }

    #[test]
    fn test_galaxy_ceiling_is_minimum_of_three() {
        let mut policy = VisibilityPolicy::new(&DeviceProfile::for_tier(DeviceTier::High));
        // device 10, zoom 11 at zoom 1
        assert_eq!(policy.effective_ceiling(ObjectClass::Galaxy, 1.0), 10.0);
        // device 19, zoom 17 at zoom 7
        assert_eq!(policy.effective_ceiling(ObjectClass::Galaxy, 7.0), 17.0);
        policy.set_user_ceiling(ObjectClass::Galaxy, Some(galaxy_slider_ceiling(2)));
        assert_eq!(policy.effective_ceiling(ObjectClass::Galaxy, 7.0), 8.0);
        policy.set_user_ceiling(ObjectClass::Galaxy, None);
        assert_eq!(policy.effective_ceiling(ObjectClass::Galaxy, 7.0), 17.0);
    }

    #[test]
    fn test_ceilings_never_shrink_with_zoom() {
        for tier in [DeviceTier::Low, DeviceTier::Medium, DeviceTier::High] {
            let mut policy = VisibilityPolicy::new(&DeviceProfile::for_tier(tier));
            policy.set_user_ceiling(ObjectClass::Star, Some(star_slider_ceiling(12)));
            for class in ObjectClass::GLYPH_CLASSES {
                let mut prev = f64::NEG_INFINITY;
                for step in 0..=800 {
                    let zoom = 1.0 + step as f64 * 0.25;
                    let c = policy.effective_ceiling(class, zoom);
                    assert!(c >= prev, "{:?} {:?} zoom {}", tier, class, zoom);
                    prev = c;
                }
            }
        }
    }

    #[test]
    fn test_below_horizon_always_rejected() {
        let f = frame(1.0, 0.0);
        let policy = VisibilityPolicy::new(&DeviceProfile::default());
        for alt in [0.0, -0.001, -45.0] {
            let p = f.project_horizontal(Horizontal::new(alt, 120.0));
            assert_eq!(
                policy.check(ObjectClass::SolarSystem, -26.0, &p, &f),
                Err(Rejection::BelowHorizon)
            );
        }
    }

    #[test]
    fn test_magnitude_at_ceiling_is_rejected() {
        let f = frame(1.0, 0.0);
        let policy = VisibilityPolicy::new(&DeviceProfile::default());
        let p = f.project_horizontal(Horizontal::new(60.0, 10.0));
        assert_eq!(policy.check(ObjectClass::Star, 5.0, &p, &f), Err(Rejection::TooFaint));
        assert_eq!(policy.check(ObjectClass::Star, 4.99, &p, &f), Ok(()));
        assert_eq!(policy.check(ObjectClass::Star, f64::NAN, &p, &f), Err(Rejection::TooFaint));
    }

    #[test]
    fn test_viewport_culling_respects_profile() {
        let f = frame(4.0, -1500.0);
        let p = f.project_horizontal(Horizontal::new(10.0, 270.0));
        assert!(p.x < -VIEWPORT_PADDING);

        let culling = VisibilityPolicy::new(&DeviceProfile::default());
        assert_eq!(culling.check(ObjectClass::Star, 1.0, &p, &f), Err(Rejection::OffScreen));

        let profile = DeviceProfile {
            viewport_culling: false,
            ..DeviceProfile::default()
        };
        assert_eq!(VisibilityPolicy::new(&profile).check(ObjectClass::Star, 1.0, &p, &f), Ok(()));
    }

    #[test]
    fn test_stats_tally() {
        let mut stats = CullStats::default();
        assert!(stats.record(Ok(())));
        assert!(!stats.record(Err(Rejection::TooFaint)));
        assert_eq!((stats.drawn, stats.too_faint), (1, 1));
    }
}

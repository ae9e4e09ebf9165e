use crate::JulianDate;
use skyview_core::angle::wrap_0_24;
use skyview_core::constants::{GMST_J2000_HOURS, SIDEREAL_HOURS_PER_DAY};
use skyview_core::Angle;

/// Greenwich mean sidereal time in hours, `[0, 24)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GMST(f64);

impl GMST {
    /// Linear model: `18.697374558 + 24.06570982441908 * D`, `D` days from J2000.
    pub fn from_julian_date(jd: &JulianDate) -> Self {
        let d = jd.days_since_j2000();
        Self::from_hours(GMST_J2000_HOURS + SIDEREAL_HOURS_PER_DAY * d)
    }

    pub fn from_hours(hours: f64) -> Self {
        Self(wrap_0_24(hours))
    }

    pub fn hours(&self) -> f64 {
        self.0
    }

    pub fn angle(&self) -> Angle {
        Angle::from_hours(self.0)
    }
}

impl std::fmt::Display for GMST {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GMST {:.6}h", self.0)
    }
}

use super::GMST;
use crate::JulianDate;
use skyview_core::angle::{wrap_0_24, wrap_pm_180};
use skyview_core::constants::DEGREES_PER_HOUR;
use skyview_core::{Angle, Location};

/// Local sidereal time in hours, `[0, 24)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LST(f64);

impl LST {
    /// `GMST + longitude / 15`, wrapped.
    pub fn from_julian_date(jd: &JulianDate, location: &Location) -> Self {
        GMST::from_julian_date(jd).to_local(location)
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

    /// Hour angle of a target in degrees, `[-180, 180)`; positive west of the meridian.
    pub fn hour_angle_deg(&self, ra_hours: f64) -> f64 {
        wrap_pm_180((self.0 - ra_hours) * DEGREES_PER_HOUR)
    }
}

impl GMST {
    pub fn to_local(&self, location: &Location) -> LST {
        LST::from_hours(self.hours() + location.longitude_deg / DEGREES_PER_HOUR)
    }
}

impl std::fmt::Display for LST {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LST {:.6}h", self.0)
    }
}

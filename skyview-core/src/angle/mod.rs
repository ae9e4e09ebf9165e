//! Angles and their normalization, parsing and formatting.
//!
//! [`Angle`] stores radians internally; the chart works in degrees and hours
//! at its edges, so the constructors and accessors cover all three.

mod format;
mod normalize;
mod parse;

pub use format::{DmsFmt, HmsFmt};
pub use normalize::{clamp_latitude, wrap_0_24, wrap_0_360, wrap_pm_180};
pub use parse::{parse_dms, parse_hms, parse_sexagesimal, AngleUnits};

use crate::constants::{DEGREES_PER_HOUR, DEG_TO_RAD, RAD_TO_DEG};
use core::ops::{Add, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle {
    rad: f64,
}

impl Angle {
    pub const ZERO: Self = Self { rad: 0.0 };

    #[inline]
    pub const fn from_radians(rad: f64) -> Self {
        Self { rad }
    }

    #[inline]
    pub fn from_degrees(deg: f64) -> Self {
        Self {
            rad: deg * DEG_TO_RAD,
        }
    }

    #[inline]
    pub fn from_hours(hours: f64) -> Self {
        Self::from_degrees(hours * DEGREES_PER_HOUR)
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.rad
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.rad * RAD_TO_DEG
    }

    #[inline]
    pub fn hours(self) -> f64 {
        self.degrees() / DEGREES_PER_HOUR
    }

    #[inline]
    pub fn sin_cos(self) -> (f64, f64) {
        libm::sincos(self.rad)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.rad.is_finite()
    }

    /// Same direction, expressed in `[0, 360)` degrees.
    pub fn wrapped(self) -> Self {
        Self::from_degrees(wrap_0_360(self.degrees()))
    }

    /// Same direction, expressed in `[-180, 180)` degrees.
    pub fn wrapped_signed(self) -> Self {
        Self::from_degrees(wrap_pm_180(self.degrees()))
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.rad + rhs.rad)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_radians(self.rad - rhs.rad)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle::from_radians(-self.rad)
    }
}

impl core::fmt::Display for Angle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.6}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions_agree() {
        let a = Angle::from_hours(6.0);
        assert!((a.degrees() - 90.0).abs() < 1e-12);
        assert!((a.radians() - crate::constants::HALF_PI).abs() < 1e-12);
        assert!((Angle::from_degrees(45.0).hours() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_wrapping_helpers() {
        assert!((Angle::from_degrees(-30.0).wrapped().degrees() - 330.0).abs() < 1e-9);
        assert!((Angle::from_degrees(270.0).wrapped_signed().degrees() + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let sum = Angle::from_degrees(10.0) + Angle::from_degrees(5.0);
        assert!((sum.degrees() - 15.0).abs() < 1e-12);
        assert!(((-sum).degrees() + 15.0).abs() < 1e-12);
    }
}

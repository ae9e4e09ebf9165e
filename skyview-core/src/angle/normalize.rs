//! Angle normalization in the units the chart uses.
//!
//! | Quantity | Range | Function |
//! |----------|-------|----------|
//! | Azimuth, chart bearing | [0, 360) deg | [`wrap_0_360`] |
//! | Hour angle, azimuth jump | [-180, +180) deg | [`wrap_pm_180`] |
//! | Right ascension, sidereal time | [0, 24) h | [`wrap_0_24`] |
//! | Latitude, declination | [-90, +90] deg | [`clamp_latitude`] |
//!
//! Wrapping uses [`crate::math::fmod`] and then shifts negative remainders
//! into range; `%` alone keeps the sign of the dividend.

use crate::constants::HOURS_PER_DAY;
use crate::math::fmod;

/// Wraps degrees to `[0, 360)`.
///
/// ```
/// use skyview_core::angle::wrap_0_360;
/// assert_eq!(wrap_0_360(-90.0), 270.0);
/// assert_eq!(wrap_0_360(720.0), 0.0);
/// ```
#[inline]
pub fn wrap_0_360(deg: f64) -> f64 {
    let w = fmod(deg, 360.0);
    if w < 0.0 {
        // -1e-17 + 360 rounds to 360.0
        let shifted = w + 360.0;
        if shifted >= 360.0 {
            0.0
        } else {
            shifted
        }
    } else {
        w
    }
}

/// Wraps degrees to `[-180, 180)`.
///
/// ```
/// use skyview_core::angle::wrap_pm_180;
/// assert_eq!(wrap_pm_180(270.0), -90.0);
/// assert_eq!(wrap_pm_180(180.0), -180.0);
/// ```
#[inline]
pub fn wrap_pm_180(deg: f64) -> f64 {
    wrap_0_360(deg + 180.0) - 180.0
}

/// Wraps hours to `[0, 24)`.
#[inline]
pub fn wrap_0_24(hours: f64) -> f64 {
    let w = fmod(hours, HOURS_PER_DAY);
    if w < 0.0 {
        let shifted = w + HOURS_PER_DAY;
        if shifted >= HOURS_PER_DAY {
            0.0
        } else {
            shifted
        }
    } else {
        w
    }
}

/// Clamps degrees to `[-90, 90]`; the poles saturate rather than wrap.
#[inline]
pub fn clamp_latitude(deg: f64) -> f64 {
    deg.clamp(-90.0, 90.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_0_360_range() {
        for deg in [-721.5, -360.0, -0.25, 0.0, 359.999, 360.0, 1000.0] {
            let w = wrap_0_360(deg);
            assert!((0.0..360.0).contains(&w), "{} -> {}", deg, w);
        }
        assert!((wrap_0_360(-0.25) - 359.75).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_0_360_tiny_negative() {
        assert_eq!(wrap_0_360(-1e-17), 0.0);
    }

    #[test]
    fn test_wrap_pm_180_range() {
        assert!((wrap_pm_180(190.0) + 170.0).abs() < 1e-12);
        assert!((wrap_pm_180(-190.0) - 170.0).abs() < 1e-12);
        assert_eq!(wrap_pm_180(0.0), 0.0);
    }

    #[test]
    fn test_wrap_0_24_range() {
        assert!((wrap_0_24(-1.5) - 22.5).abs() < 1e-12);
        assert!((wrap_0_24(49.0) - 1.0).abs() < 1e-12);
        assert_eq!(wrap_0_24(24.0), 0.0);
    }

    #[test]
    fn test_clamp_latitude_saturates() {
        assert_eq!(clamp_latitude(95.0), 90.0);
        assert_eq!(clamp_latitude(-91.0), -90.0);
        assert_eq!(clamp_latitude(12.5), 12.5);
    }
}

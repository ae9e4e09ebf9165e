//! Equatorial ↔ horizontal conversion.
//!
//! The spherical identity gives azimuth measured from south through west:
//!
//! ```text
//! sin(alt) = sin(δ) sin(φ) + cos(δ) cos(φ) cos(H)
//! A_s      = atan2(sin(H) cos(δ), cos(H) cos(δ) sin(φ) − sin(δ) cos(φ))
//! ```
//!
//! Positions returned here carry the north-referenced azimuth
//! `A = A_s + 180°` in `[0, 360)` (0 = N, 90 = E). The `tan(δ)` term is
//! multiplied through by `cos(δ)` so the poles do not produce infinities.
//!
//! All functions are pure; the same inputs always give the same position.

use skyview_core::angle::{wrap_0_24, wrap_0_360};
use skyview_core::constants::{DEGREES_PER_HOUR, DEG_TO_RAD, RAD_TO_DEG};
use skyview_core::Location;
use skyview_time::LST;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equatorial {
    pub ra_hours: f64,
    pub dec_deg: f64,
}

impl Equatorial {
    pub fn new(ra_hours: f64, dec_deg: f64) -> Self {
        Self { ra_hours, dec_deg }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Horizontal {
    pub alt_deg: f64,
    pub az_deg: f64,
}

impl Horizontal {
    pub fn new(alt_deg: f64, az_deg: f64) -> Self {
        Self { alt_deg, az_deg }
    }

    pub fn is_above_horizon(&self) -> bool {
        self.alt_deg > 0.0
    }
}

pub fn equatorial_to_horizontal(eq: Equatorial, location: &Location, lst: &LST) -> Horizontal {
    let h = lst.hour_angle_deg(eq.ra_hours) * DEG_TO_RAD;
    let dec = eq.dec_deg * DEG_TO_RAD;
    let lat = location.latitude_deg * DEG_TO_RAD;

    let (sin_h, cos_h) = libm::sincos(h);
    let (sin_d, cos_d) = libm::sincos(dec);
    let (sin_p, cos_p) = libm::sincos(lat);

    let sin_alt = (sin_d * sin_p + cos_d * cos_p * cos_h).clamp(-1.0, 1.0);
    let alt = libm::asin(sin_alt);
    let az_south = libm::atan2(sin_h * cos_d, cos_h * cos_d * sin_p - sin_d * cos_p);

    Horizontal {
        alt_deg: alt * RAD_TO_DEG,
        az_deg: wrap_0_360(az_south * RAD_TO_DEG + 180.0),
    }
}

pub fn horizontal_to_equatorial(hz: Horizontal, location: &Location, lst: &LST) -> Equatorial {
    let alt = hz.alt_deg * DEG_TO_RAD;
    let az = hz.az_deg * DEG_TO_RAD;
    let lat = location.latitude_deg * DEG_TO_RAD;

    let (sin_a, cos_a) = libm::sincos(alt);
    let (sin_z, cos_z) = libm::sincos(az);
    let (sin_p, cos_p) = libm::sincos(lat);

    let sin_dec = (sin_a * sin_p + cos_a * cos_p * cos_z).clamp(-1.0, 1.0);
    let dec = libm::asin(sin_dec);
    let ha = libm::atan2(-sin_z * cos_a, sin_a * cos_p - sin_p * cos_a * cos_z);

    Equatorial {
        ra_hours: wrap_0_24(lst.hours() - ha * RAD_TO_DEG / DEGREES_PER_HOUR),
        dec_deg: dec * RAD_TO_DEG,
    }
}

//! Observer site on the Earth's surface.
//!
//! The chart only needs geodetic latitude and east-positive longitude; height
//! and the ellipsoid do not matter at screen precision.

use crate::angle::{wrap_pm_180, Angle};
use crate::{SkyError, SkyResult};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Geodetic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive, `[-180, 180)`.
    pub longitude_deg: f64,
}

impl Location {
    /// Builds a site, rejecting latitudes beyond the poles and non-finite input.
    ///
    /// Longitude is wrapped, so 286° and -74° name the same meridian.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> SkyResult<Self> {
        if !latitude_deg.is_finite() || !longitude_deg.is_finite() {
            return Err(SkyError::out_of_range(
                "observer location",
                "coordinates must be finite",
            ));
        }
        if latitude_deg.abs() > 90.0 {
            return Err(SkyError::out_of_range(
                "observer latitude",
                &format!("{} exceeds 90 degrees", latitude_deg),
            ));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg: wrap_pm_180(longitude_deg),
        })
    }

    pub fn latitude(&self) -> Angle {
        Angle::from_degrees(self.latitude_deg)
    }

    pub fn longitude(&self) -> Angle {
        Angle::from_degrees(self.longitude_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_site() {
        let site = Location::new(40.0, -74.0).unwrap();
        assert_eq!(site.latitude_deg, 40.0);
        assert_eq!(site.longitude_deg, -74.0);
        assert!((site.latitude().radians() - 40f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_wraps_longitude() {
        let site = Location::new(10.0, 286.0).unwrap();
        assert!((site.longitude_deg + 74.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_latitude() {
        assert!(Location::new(90.5, 0.0).is_err());
        assert!(Location::new(f64::NAN, 0.0).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserializes_from_json() {
        let site: Location =
            serde_json::from_str(r#"{"latitude_deg": 51.5, "longitude_deg": -0.1}"#).unwrap();
        assert_eq!(site.latitude_deg, 51.5);
    }
}

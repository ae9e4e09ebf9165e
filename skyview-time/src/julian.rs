use chrono::{DateTime, Utc};
use skyview_core::constants::{J2000_JD, MILLIS_PER_DAY, SECONDS_PER_DAY_F64, UNIX_EPOCH_JD};
use std::fmt;

/// Two-part Julian date: `jd1` holds the whole-day epoch, `jd2` the fraction.
///
/// Splitting keeps millisecond resolution that a single `f64` near 2.46e6
/// would round away.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate {
    pub jd1: f64,
    pub jd2: f64,
}

impl JulianDate {
    pub fn new(jd1: f64, jd2: f64) -> Self {
        Self { jd1, jd2 }
    }

    pub fn from_f64(jd: f64) -> Self {
        Self::new(jd, 0.0)
    }

    pub fn j2000() -> Self {
        Self::new(J2000_JD, 0.0)
    }

    pub fn unix_epoch() -> Self {
        Self::new(UNIX_EPOCH_JD, 0.0)
    }

    /// `ms / 86_400_000 + 2_440_587.5`, split at whole days.
    pub fn from_unix_millis(ms: i64) -> Self {
        let per_day = MILLIS_PER_DAY as i64;
        let days = ms.div_euclid(per_day);
        let rem = ms.rem_euclid(per_day);
        Self::new(UNIX_EPOCH_JD + days as f64, rem as f64 / MILLIS_PER_DAY)
    }

    pub fn from_datetime(t: &DateTime<Utc>) -> Self {
        Self::from_unix_millis(t.timestamp_millis())
    }

    pub fn to_f64(&self) -> f64 {
        self.jd1 + self.jd2
    }

    /// Days since J2000.0, computed from the split parts.
    pub fn days_since_j2000(&self) -> f64 {
        (self.jd1 - J2000_JD) + self.jd2
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self::new(self.jd1, self.jd2 + days)
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        self.add_days(seconds / SECONDS_PER_DAY_F64)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.to_f64())
    }
}

impl From<f64> for JulianDate {
    fn from(jd: f64) -> Self {
        Self::from_f64(jd)
    }
}

impl From<DateTime<Utc>> for JulianDate {
    fn from(t: DateTime<Utc>) -> Self {
        Self::from_datetime(&t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unix_epoch() {
        assert_eq!(JulianDate::from_unix_millis(0).to_f64(), UNIX_EPOCH_JD);
        assert_eq!(JulianDate::unix_epoch().to_f64(), UNIX_EPOCH_JD);
    }

    #[test]
    fn test_j2000_noon() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let jd = JulianDate::from_datetime(&t);
        assert_eq!(jd.to_f64(), J2000_JD);
        assert_eq!(jd.days_since_j2000(), 0.0);
    }

    #[test]
    fn test_before_epoch() {
        let jd = JulianDate::from_unix_millis(-43_200_000);
        assert_eq!(jd.to_f64(), UNIX_EPOCH_JD - 0.5);
        assert!(jd.jd2 >= 0.0);
    }

    #[test]
    fn test_arithmetic() {
        let jd = JulianDate::j2000();
        assert_eq!(jd.add_days(1.0).to_f64(), 2_451_546.0);
        let plus_hour = jd.add_seconds(3600.0);
        assert!((plus_hour.to_f64() - 2_451_545.041_666_666_5).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        assert_eq!(JulianDate::j2000().to_string(), "JD 2451545.000000000");
    }
}

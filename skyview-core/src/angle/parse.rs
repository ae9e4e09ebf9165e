//! Angle parsing from mount, catalog and user strings.
//!
//! Accepted notations:
//!
//! ```text
//! Colon-separated:  045:30:15   -12:30:45.5   +05:35:17
//! Letter markers:   45d30m15s   5h35m17s
//! Decimal:          45.504      -12.5
//! ```
//!
//! Signs are only valid at the beginning: `-12:30:45` works, `12:-30:45` does not.
//! Minutes and seconds must be below 60.
//!
//! ```
//! use skyview_core::angle::AngleUnits;
//!
//! let alt = "045:30:00".dms().unwrap();
//! assert!((alt.degrees() - 45.5).abs() < 1e-12);
//!
//! let ra = "05:30:00".hms().unwrap();
//! assert!((ra.hours() - 5.5).abs() < 1e-12);
//! ```

use super::Angle;
use crate::SkyError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Parse strings as angles with explicit unit specification.
pub trait AngleUnits {
    /// Parse as decimal degrees.
    fn deg(&self) -> Result<Angle, SkyError>;
    /// Parse as decimal hours (1 hour = 15 degrees).
    fn hours(&self) -> Result<Angle, SkyError>;
    /// Parse degrees-minutes-seconds, or fall back to decimal degrees.
    fn dms(&self) -> Result<Angle, SkyError>;
    /// Parse hours-minutes-seconds, or fall back to decimal hours.
    fn hms(&self) -> Result<Angle, SkyError>;
}

impl AngleUnits for str {
    #[inline]
    fn deg(&self) -> Result<Angle, SkyError> {
        parse_decimal(self, "decimal degrees").map(Angle::from_degrees)
    }

    #[inline]
    fn hours(&self) -> Result<Angle, SkyError> {
        parse_decimal(self, "decimal hours").map(Angle::from_hours)
    }

    #[inline]
    fn dms(&self) -> Result<Angle, SkyError> {
        parse_dms(self)
    }

    #[inline]
    fn hms(&self) -> Result<Angle, SkyError> {
        parse_hms(self)
    }
}

static COLON_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-])?(\d{1,3}):(\d{1,2}):(\d{1,2}(?:\.\d+)?)\s*$")
        .expect("colon regex is valid")
});

static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?xi)
        ^\s*
        ([+-])?                     # optional sign
        (\d{1,3})\s*[dh°]\s*        # degrees or hours
        (\d{1,2})\s*['m]\s*         # minutes
        (\d{1,2}(?:\.\d+)?)\s*      # seconds
        (?:"|''|s)?
        \s*$
        "#,
    )
    .expect("marker regex is valid")
});

/// Parses a sexagesimal triple (or a plain decimal) into its signed decimal value.
///
/// The unit is whatever the leading field is in: degrees for DMS, hours for HMS.
pub fn parse_sexagesimal(s: &str) -> Result<f64, SkyError> {
    let caps = COLON_REGEX
        .captures(s)
        .or_else(|| MARKER_REGEX.captures(s));

    let Some(caps) = caps else {
        return parse_decimal(s, "sexagesimal angle");
    };

    let sign = match caps.get(1).map(|m| m.as_str()) {
        Some("-") => -1.0,
        _ => 1.0,
    };
    let field = |i: usize| -> Result<f64, SkyError> {
        caps[i]
            .parse::<f64>()
            .map_err(|_| SkyError::malformed("sexagesimal angle", s, "field is not numeric"))
    };
    let whole = field(2)?;
    let minutes = field(3)?;
    let seconds = field(4)?;

    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(SkyError::malformed(
            "sexagesimal angle",
            s,
            "minutes and seconds must be below 60",
        ));
    }

    Ok(sign * (whole + minutes / 60.0 + seconds / 3600.0))
}

/// Parses degrees-minutes-seconds (or decimal degrees).
pub fn parse_dms(s: &str) -> Result<Angle, SkyError> {
    parse_sexagesimal(s).map(Angle::from_degrees)
}

/// Parses hours-minutes-seconds (or decimal hours).
pub fn parse_hms(s: &str) -> Result<Angle, SkyError> {
    parse_sexagesimal(s).map(Angle::from_hours)
}

fn parse_decimal(s: &str, kind: &str) -> Result<f64, SkyError> {
    let value = s
        .trim()
        .parse::<f64>()
        .map_err(|_| SkyError::malformed(kind, s, "not a number"))?;
    if !value.is_finite() {
        return Err(SkyError::malformed(kind, s, "not finite"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_mount_style_dms() {
        let v = parse_sexagesimal("045:30:15").unwrap();
        assert!((v - (45.0 + 30.0 / 60.0 + 15.0 / 3600.0)).abs() < EPSILON);

        let v = parse_sexagesimal("-12:30:45").unwrap();
        assert!((v + (12.0 + 30.0 / 60.0 + 45.0 / 3600.0)).abs() < EPSILON);
    }

    #[test]
    fn test_negative_zero_degrees_keeps_sign() {
        let v = parse_sexagesimal("-00:30:00").unwrap();
        assert!((v + 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_marker_notation() {
        assert!(("45d30m00s".dms().unwrap().degrees() - 45.5).abs() < EPSILON);
        assert!(("5h30m0s".hms().unwrap().hours() - 5.5).abs() < EPSILON);
    }

    #[test]
    fn test_decimal_fallback() {
        assert!(("123.25".dms().unwrap().degrees() - 123.25).abs() < EPSILON);
        assert!(("  -7.5 ".deg().unwrap().degrees() + 7.5).abs() < EPSILON);
        assert!(("2.5".hours().unwrap().hours() - 2.5).abs() < EPSILON);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_sexagesimal("").is_err());
        assert!(parse_sexagesimal("abc").is_err());
        assert!(parse_sexagesimal("12:-30:00").is_err());
        assert!(parse_sexagesimal("NaN").is_err());
    }

    #[test]
    fn test_rejects_out_of_range_fields() {
        let err = parse_sexagesimal("10:75:00").unwrap_err();
        assert!(matches!(err, SkyError::MalformedInput { .. }));
        assert!(parse_sexagesimal("10:00:60").is_err());
    }
}

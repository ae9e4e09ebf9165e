//! Numerical constants shared by the chart crates.
//!
//! The sidereal-time coefficients are the low-precision linear GMST model
//! (accurate to about a second over a few decades around J2000), which is
//! all a screen chart needs.

pub const PI: f64 = core::f64::consts::PI;
pub const TWOPI: f64 = 2.0 * PI;
pub const HALF_PI: f64 = 0.5 * PI;

pub const DEG_TO_RAD: f64 = PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / PI;

/// Degrees of rotation per hour of right ascension or hour angle.
pub const DEGREES_PER_HOUR: f64 = 15.0;

pub const J2000_JD: f64 = 2_451_545.0;

/// Julian date of 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
pub const SECONDS_PER_DAY_F64: f64 = 86_400.0;

/// GMST in hours at J2000.0 (linear model intercept).
pub const GMST_J2000_HOURS: f64 = 18.697_374_558;

/// Sidereal hours elapsed per mean solar day.
pub const SIDEREAL_HOURS_PER_DAY: f64 = 24.065_709_824_419_08;

pub const HOURS_PER_DAY: f64 = 24.0;

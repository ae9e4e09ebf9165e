//! Foundation types for the skyview chart engine.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`angle`] | [`Angle`], wrapping, sexagesimal parsing and formatting |
//! | [`constants`] | Unit conversions, epochs, sidereal-rate coefficients |
//! | [`errors`] | [`SkyError`] and [`SkyResult`] |
//! | [`location`] | Observer [`Location`] |
//! | [`math`] | Small numeric helpers on top of `libm` |
//!
//! Everything here is pure and allocation-free apart from error messages and
//! formatted strings.

pub mod angle;
pub mod constants;
pub mod errors;
pub mod location;
pub mod math;

pub use angle::Angle;
pub use errors::{SkyError, SkyResult};
pub use location::Location;

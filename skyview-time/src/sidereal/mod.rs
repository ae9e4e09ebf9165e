//! Low-precision sidereal time.
//!
//! The chart redraws at most a few times per second and draws to the nearest
//! pixel, so the linear GMST model is sufficient. No nutation or UT1
//! corrections are applied.

mod gmst;
mod lst;

pub use gmst::GMST;
pub use lst::LST;

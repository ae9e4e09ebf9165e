//! Time for the skyview chart: Julian dates, sidereal time and clocks.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use skyview_core::Location;
//! use skyview_time::{JulianDate, LST};
//!
//! let t = Utc.with_ymd_and_hms(2024, 6, 21, 3, 0, 0).unwrap();
//! let site = Location::new(40.0, -74.0).unwrap();
//! let lst = LST::from_julian_date(&JulianDate::from(t), &site);
//! assert!((0.0..24.0).contains(&lst.hours()));
//! ```

pub mod clock;
pub mod julian;
pub mod sidereal;

pub use clock::{FixedClock, ServerSyncedClock, SkyClock, SystemClock};
pub use julian::JulianDate;
pub use sidereal::{GMST, LST};

//! Coordinate handling for the skyview chart.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`horizontal`] | Equatorial ↔ horizontal conversion |
//! | [`projection`] | Polar disc projection, zoom/pan/mirror viewport |
//! | [`frame`] | [`FrameTransform`], the per-redraw bundle of both |

pub mod frame;
pub mod horizontal;
pub mod projection;

pub use frame::FrameTransform;
pub use horizontal::{equatorial_to_horizontal, horizontal_to_equatorial, Equatorial, Horizontal};
pub use projection::{ChartGeometry, ScreenPoint, Viewport, MAX_ZOOM, MIN_ZOOM};

pub use skyview_core::{Angle, Location};
pub use skyview_time::{JulianDate, LST};

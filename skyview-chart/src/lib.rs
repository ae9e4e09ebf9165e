//! Real-time polar sky chart.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`catalog`] | Catalog records, lenient JSON parsing, primary/fallback loading |
//! | [`profile`] | Device tiers and their magnitude ceiling tables |
//! | [`visibility`] | Per-object culling: horizon, magnitude ceiling, viewport |
//! | [`glyph`] | Glyph shapes, sizes and hit radii |
//! | [`labels`] | Collision-avoiding label placement |
//! | [`hittest`] | Per-frame pick index |
//! | [`render`] | One frame: grid, figures, glyphs, labels, overlays |
//! | [`events`] | Input throttling and periodic timers |
//! | [`session`] | [`SkyviewSession`], the mutable view state and redraw loop |
//! | [`mount`] | Mount status, goto commands and the reticle |
//! | [`state`] | Persisted view toggles |
//! | [`canvas`] / [`style`] | Drawing surface abstraction and palettes |
//! | `plot` | SVG export through plotters (feature `svg`) |
//!
//! Coordinates and time come from `skyview-coords` and `skyview-time`.

pub mod canvas;
pub mod catalog;
pub mod error;
pub mod events;
pub mod glyph;
pub mod hittest;
pub mod labels;
pub mod mount;
#[cfg(feature = "svg")]
pub mod plot;
pub mod profile;
pub mod render;
pub mod session;
pub mod state;
pub mod style;
pub mod visibility;

pub use canvas::{Canvas, RecordingCanvas};
pub use catalog::{Catalog, CatalogLoader, CatalogObject, CatalogRef, ObjectClass};
pub use error::{Error, Result};
pub use hittest::{Hit, HitIndex, HitTarget};
pub use labels::{LabelCandidate, LabelEngine, LabelLayout};
pub use session::{SessionConfig, SkyviewSession};
pub use state::{ViewState, ViewToggles};

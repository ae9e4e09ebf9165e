//! Error types shared by the chart crates.
//!
//! [`SkyError`] covers the failure modes at the edges of the engine: text that
//! does not parse, values outside their physical range, and external data that
//! could not be obtained.
//!
//! # Error Categories
//!
//! | Variant | Use Case | Recoverable? |
//! |---------|----------|--------------|
//! | [`MalformedInput`](SkyError::MalformedInput) | Angle strings, catalog records | No (record is dropped) |
//! | [`OutOfRange`](SkyError::OutOfRange) | Latitude > 90°, zoom <= 0 | No |
//! | [`DataUnavailable`](SkyError::DataUnavailable) | Catalog, profile, mount or clock source failed | Yes |
//!
//! Data-unavailable errors are always resolved by a fallback (empty catalog,
//! default device profile, no reticle) and never abort a redraw.
//!
//! ```
//! use skyview_core::SkyError;
//!
//! let err = SkyError::data_unavailable("catalog", "load stars", "file missing");
//! assert!(err.is_recoverable());
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkyError {
    /// Text or record that cannot be interpreted.
    #[error("Malformed {kind} '{input}': {message}")]
    MalformedInput {
        kind: String,
        input: String,
        message: String,
    },

    /// Numeric value outside its valid domain.
    #[error("Value out of range in {context}: {message}")]
    OutOfRange { context: String, message: String },

    /// An external source (file, service) failed to deliver data.
    ///
    /// This is the only recoverable variant.
    #[error("Data unavailable ({source_name} - {operation}): {message}")]
    DataUnavailable {
        source_name: String,
        operation: String,
        message: String,
    },
}

pub type SkyResult<T> = Result<T, SkyError>;

impl SkyError {
    pub fn malformed(kind: &str, input: &str, reason: &str) -> Self {
        Self::MalformedInput {
            kind: kind.to_string(),
            input: input.to_string(),
            message: reason.to_string(),
        }
    }

    pub fn out_of_range(context: &str, reason: &str) -> Self {
        Self::OutOfRange {
            context: context.to_string(),
            message: reason.to_string(),
        }
    }

    pub fn data_unavailable(source_name: &str, operation: &str, reason: &str) -> Self {
        Self::DataUnavailable {
            source_name: source_name.to_string(),
            operation: operation.to_string(),
            message: reason.to_string(),
        }
    }

    /// Returns `true` if a fallback or a later retry may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DataUnavailable { .. })
    }
}

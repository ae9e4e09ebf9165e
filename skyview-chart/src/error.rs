use skyview_core::SkyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Sky(#[from] SkyError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("render error: {0}")]
    Render(String),
}

impl Error {
    /// True for failures a fallback resolves: unavailable data and missing files.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Sky(e) => e.is_recoverable(),
            Self::Io(_) => true,
            Self::Json(_) | Self::Render(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sky_errors_pass_through() {
        let err: Error = SkyError::data_unavailable("mount", "status", "refused").into();
        assert!(err.is_recoverable());
        assert!(err.to_string().starts_with("Data unavailable (mount - status)"));
    }

    #[test]
    fn test_json_errors_are_fatal_for_the_record() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(!err.is_recoverable());
        assert!(err.to_string().starts_with("json error"));
    }
}

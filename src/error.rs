//! Error types
//!
//! Only construction and validation paths return errors. The per-tick
//! simulation never fails; bad runtime input is ignored instead.

/// Errors raised while building or validating game viewports and tuning
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Viewport dimensions were non-finite or not positive
    #[error("Invalid viewport: {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    /// Tuning values failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Tuning file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Config(s.to_string())
    }
}

/// Result type for lane-dash operations
pub type Result<T> = std::result::Result<T, Error>;

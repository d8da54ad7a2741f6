/// Unified error type for bib-middleware
use thiserror::Error;

use crate::error::FetchError;

#[derive(Error, Debug)]
pub enum MiddlewareError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors, raised while a stack is being assembled
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // A step that cannot continue with the current library
    #[error("Step '{step}' failed: {message}")]
    Step { step: String, message: String },

    // Boundary errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using MiddlewareError
pub type Result<T> = std::result::Result<T, MiddlewareError>;

impl MiddlewareError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a step error
    pub fn step(step: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Step {
            step: step.into(),
            message: msg.into(),
        }
    }
}

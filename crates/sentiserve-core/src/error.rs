//! Error types for sentiserve

use std::path::PathBuf;

/// Result type alias using sentiserve's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for sentiserve operations.
///
/// Each failure mode the boundary layer cares about is a distinct
/// variant so callers can map it to a status code without inspecting
/// error text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Dataset/configuration errors (malformed external dataset etc.)
    #[error("configuration error: {0}")]
    Config(String),

    /// The trained model artifact is missing at serve time
    #[error("model not found at {path}; run `sentiserve train` first")]
    ModelNotFound { path: PathBuf },

    /// Input rejected before inference (empty/whitespace-only text)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Input rejected at the boundary for exceeding the size limit
    #[error("input too large: {len} characters (maximum {max})")]
    InputTooLarge { len: usize, max: usize },

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact/metrics serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid-input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new model-not-found error
    pub fn model_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ModelNotFound { path: path.into() }
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

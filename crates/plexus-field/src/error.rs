//! Error types for plexus-field.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The host refused to queue a frame or attach a listener.
    #[error("Host error: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, FieldError>;

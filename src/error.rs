//! Error types for achievement sources

use thiserror::Error;

/// Achievement source error
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint not deployed yet (404)
    #[error("achievements endpoint not available")]
    Unavailable,

    /// Server returned an unexpected error
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
}

/// Result type for source operations
pub type Result<T> = std::result::Result<T, SourceError>;

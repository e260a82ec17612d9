//! Error types for the accounts service boundary.

use thiserror::Error;

/// Errors produced by operations against the accounts service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// There is no authenticated session with the accounts service.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The service answered with a non-success status.
    #[error("Service error: {status} - {body}")]
    Service { status: u16, body: String },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for accounts boundary operations.
pub type ApiResult<T> = Result<T, ApiError>;

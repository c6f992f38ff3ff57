//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Structured error returned by the server (`ApiResponse` body)
    #[error("API error {}: {}", .0.code, .0.message)]
    Api(AppError),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Local cart file could not be written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Server error code, when the failure came from the server
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api(err) => Some(err.code),
            _ => None,
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        Self::Api(err)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

//! Transport layer error types.

use crate::error::{GeminiError, NetworkError};

/// Transport error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to create HTTP client: {0}")]
    Build(String),
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Timeout")]
    Timeout,
    #[error("Request error: {0}")]
    Request(String),
}

impl From<TransportError> for GeminiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => GeminiError::Network(NetworkError::Timeout),
            other => GeminiError::Network(NetworkError::ConnectionFailed {
                message: other.to_string(),
            }),
        }
    }
}

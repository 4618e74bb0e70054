//! Main error type for the Gemini API client.

use std::time::Duration;
use thiserror::Error;
use super::categories::*;

/// Result type alias for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Top-level error type for the crate.
#[derive(Error, Debug, Clone)]
pub enum GeminiError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    #[error("Rate limit error: {0}")]
    RateLimit(#[from] RateLimitError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl GeminiError {
    /// Returns true if this error is retryable.
    ///
    /// Nothing in this crate retries; the flag is for callers composing
    /// their own backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GeminiError::RateLimit(_)
                | GeminiError::Network(NetworkError::Timeout | NetworkError::ConnectionFailed { .. })
                | GeminiError::Server(
                    ServerError::ServiceUnavailable { .. } | ServerError::ModelOverloaded { .. }
                )
        )
    }

    /// Returns the retry-after duration if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            GeminiError::RateLimit(e) => e.retry_after(),
            GeminiError::Server(ServerError::ServiceUnavailable { retry_after }) => *retry_after,
            _ => None,
        }
    }

    /// Returns true if the error came back from a call to the backend.
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            GeminiError::Authentication(_)
                | GeminiError::Request(_)
                | GeminiError::RateLimit(_)
                | GeminiError::Network(_)
                | GeminiError::Server(_)
                | GeminiError::Response(_)
                | GeminiError::Resource(_)
        )
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(err: serde_json::Error) -> Self {
        GeminiError::Response(ResponseError::DeserializationError {
            message: err.to_string(),
        })
    }
}

impl From<url::ParseError> for GeminiError {
    fn from(err: url::ParseError) -> Self {
        GeminiError::Configuration(ConfigurationError::InvalidBaseUrl {
            url: err.to_string(),
        })
    }
}

//! Error category types for granular error handling.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Credential resolution errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Environment variable {variable} not set")]
    MissingCredential { variable: String },

    #[error("API key cannot be empty")]
    EmptyCredential,
}

/// Configuration-related errors.
#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("error creating client: {message}")]
    ClientConstruction { message: String },
}

/// Authentication-related errors.
#[derive(Error, Debug, Clone)]
pub enum AuthenticationError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Quota exceeded for API key")]
    QuotaExceeded,
}

/// Request validation errors.
#[derive(Error, Debug, Clone)]
pub enum RequestError {
    #[error("Validation error: {message}")]
    ValidationError { message: String, details: Vec<ValidationDetail> },

    #[error("Payload too large: {message}")]
    PayloadTooLarge { message: String },
}

/// Validation detail for field-level errors.
#[derive(Debug, Clone)]
pub struct ValidationDetail {
    pub field: String,
    pub description: String,
}

/// Rate limiting errors.
#[derive(Error, Debug, Clone)]
pub enum RateLimitError {
    #[error("Too many requests")]
    TooManyRequests { retry_after: Option<Duration> },

    #[error("Quota exceeded")]
    QuotaExceeded { retry_after: Option<Duration> },
}

impl RateLimitError {
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            RateLimitError::TooManyRequests { retry_after }
            | RateLimitError::QuotaExceeded { retry_after } => *retry_after,
        }
    }
}

/// Network-related errors.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timed out")]
    Timeout,
}

/// Server-side errors.
#[derive(Error, Debug, Clone)]
pub enum ServerError {
    #[error("Internal server error: {message}")]
    InternalError { message: String },

    #[error("Service unavailable")]
    ServiceUnavailable { retry_after: Option<Duration> },

    #[error("Model overloaded: {message}")]
    ModelOverloaded { message: String },
}

/// Response parsing errors.
#[derive(Error, Debug, Clone)]
pub enum ResponseError {
    #[error("Failed to deserialize response: {message}")]
    DeserializationError { message: String },

    #[error("Unexpected response format: {message}")]
    UnexpectedFormat { message: String },
}

/// Resource-related errors.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Resource not found: {message}")]
    NotFound { message: String },
}

/// Errors raised while turning a generation response into a file.
#[derive(Error, Debug, Clone)]
pub enum ArtifactError {
    #[error("invalid or empty response from model")]
    EmptyResponse,

    #[error("response candidate has no content")]
    EmptyContent,

    #[error("no text found in response candidate parts")]
    NoTextFound,

    #[error("failed to write file {}: {message}", .path.display())]
    WriteFailure { path: PathBuf, kind: io::ErrorKind, message: String },

    #[error("failed to read back file {}: {message}", .path.display())]
    ReadBackFailure { path: PathBuf, kind: io::ErrorKind, message: String },

    #[error("failed to read file {}: {message}", .path.display())]
    ReadFailure { path: PathBuf, kind: io::ErrorKind, message: String },
}

impl ArtifactError {
    pub(crate) fn write_failure(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        ArtifactError::WriteFailure {
            path: path.into(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub(crate) fn read_back_failure(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        ArtifactError::ReadBackFailure {
            path: path.into(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub(crate) fn read_failure(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        ArtifactError::ReadFailure {
            path: path.into(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

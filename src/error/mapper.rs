//! Error mapping utilities for HTTP status codes and API responses.

use serde::Deserialize;
use super::categories::*;
use super::types::GeminiError;

/// Structured API error response from Gemini.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Detailed error information from API.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

/// Maps HTTP status codes and response body to appropriate GeminiError variants.
///
/// The body is parsed as the Google API error envelope when possible and
/// falls back to the raw text otherwise.
pub fn map_http_status_with_body(status: u16, body: &[u8]) -> GeminiError {
    let (message, error_details) = match serde_json::from_slice::<ApiErrorResponse>(body) {
        Ok(error_response) => (error_response.error.message.clone(), Some(error_response.error)),
        Err(_) => (String::from_utf8_lossy(body).to_string(), None),
    };

    match status {
        400 if error_details.as_ref().is_some_and(has_invalid_key_reason) => {
            GeminiError::Authentication(AuthenticationError::InvalidApiKey)
        }

        400 => {
            let details = error_details
                .as_ref()
                .map(|e| parse_validation_details(&e.details))
                .unwrap_or_default();

            GeminiError::Request(RequestError::ValidationError { message, details })
        }

        401 => GeminiError::Authentication(AuthenticationError::InvalidApiKey),

        403 => {
            if message.to_lowercase().contains("quota") {
                GeminiError::Authentication(AuthenticationError::QuotaExceeded)
            } else {
                GeminiError::Authentication(AuthenticationError::PermissionDenied { message })
            }
        }

        404 => {
            if message.to_lowercase().contains("model") {
                GeminiError::Resource(ResourceError::ModelNotFound {
                    model: extract_resource_name(&message),
                })
            } else {
                GeminiError::Resource(ResourceError::NotFound { message })
            }
        }

        413 => GeminiError::Request(RequestError::PayloadTooLarge { message }),

        // retry_after is filled in from headers by the response parser
        429 => GeminiError::RateLimit(RateLimitError::TooManyRequests { retry_after: None }),

        503 => {
            if message.to_lowercase().contains("overload") {
                GeminiError::Server(ServerError::ModelOverloaded { message })
            } else {
                GeminiError::Server(ServerError::ServiceUnavailable { retry_after: None })
            }
        }

        500..=599 => GeminiError::Server(ServerError::InternalError { message }),

        _ => GeminiError::Response(ResponseError::UnexpectedFormat {
            message: format!("HTTP {status}: {message}"),
        }),
    }
}

/// Extracts resource name from error message (simple heuristic).
fn extract_resource_name(message: &str) -> String {
    if let Some(found) = message
        .split_whitespace()
        .find(|s| s.starts_with("models/"))
    {
        return found
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '/' && c != '-' && c != '_' && c != '.')
            .to_string();
    }

    for quote in ['\'', '"'] {
        if let Some(start) = message.find(quote) {
            if let Some(end) = message[start + 1..].find(quote) {
                return message[start + 1..start + 1 + end].to_string();
            }
        }
    }

    "unknown".to_string()
}

/// Parses validation details from error response details array.
fn has_invalid_key_reason(error: &ApiErrorDetail) -> bool {
    error
        .details
        .iter()
        .any(|d| d.get("reason").and_then(|r| r.as_str()) == Some("API_KEY_INVALID"))
}

fn parse_validation_details(details: &[serde_json::Value]) -> Vec<ValidationDetail> {
    details
        .iter()
        .filter_map(|detail| {
            let obj = detail.as_object()?;
            let field = obj.get("field")
                .or_else(|| obj.get("fieldPath"))
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            let description = obj.get("description")
                .or_else(|| obj.get("message"))
                .and_then(|v| v.as_str())
                .filter(|d| !d.is_empty())?;

            Some(ValidationDetail {
                field: field.to_string(),
                description: description.to_string(),
            })
        })
        .collect()
}

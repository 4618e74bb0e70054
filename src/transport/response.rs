//! HTTP response parser for the Gemini API.
//!
//! This module provides the `ResponseParser` for parsing HTTP responses,
//! handling errors, and extracting metadata like retry-after headers.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{map_http_status_with_body, GeminiError, RateLimitError, ServerError};
use super::http::HttpResponse;

/// Parser for HTTP responses from the Gemini API.
pub struct ResponseParser;

impl ResponseParser {
    /// Parses a successful HTTP response into the expected type, or maps a
    /// non-2xx response to a `GeminiError`.
    ///
    /// # Example
    ///
    /// ```
    /// use gemini_llm_utils::transport::{ResponseParser, HttpResponse};
    /// use bytes::Bytes;
    /// use serde::Deserialize;
    /// use std::collections::HashMap;
    ///
    /// #[derive(Deserialize)]
    /// struct ModelResponse {
    ///     name: String,
    /// }
    ///
    /// let response = HttpResponse {
    ///     status: 200,
    ///     headers: HashMap::new(),
    ///     body: Bytes::from(r#"{"name":"models/gemini-pro"}"#),
    /// };
    ///
    /// let parsed: ModelResponse = ResponseParser::parse_response(response).unwrap();
    /// assert_eq!(parsed.name, "models/gemini-pro");
    /// ```
    pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, GeminiError> {
        if response.is_success() {
            Ok(serde_json::from_slice(&response.body)?)
        } else {
            Err(Self::parse_error_response(&response))
        }
    }

    /// Maps an error response to the appropriate error type, filling in
    /// `retry_after` from the headers for rate limit and unavailable errors.
    pub fn parse_error_response(response: &HttpResponse) -> GeminiError {
        let retry_after = Self::parse_retry_after(&response.headers);
        let request_id = Self::extract_request_id(&response.headers);

        let mut error = map_http_status_with_body(response.status, &response.body);

        match error {
            GeminiError::RateLimit(
                RateLimitError::TooManyRequests { retry_after: ref mut ra }
                | RateLimitError::QuotaExceeded { retry_after: ref mut ra },
            )
            | GeminiError::Server(ServerError::ServiceUnavailable { retry_after: ref mut ra }) => {
                *ra = retry_after;
            }
            _ => {}
        }

        tracing::debug!(
            request_id = request_id.as_deref().unwrap_or("-"),
            status = response.status,
            error = %error,
            "API error response"
        );

        error
    }

    /// Parses the Retry-After header (delay in seconds) from the response.
    ///
    /// # Example
    ///
    /// ```
    /// use gemini_llm_utils::transport::ResponseParser;
    /// use std::collections::HashMap;
    /// use std::time::Duration;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert("retry-after".to_string(), "60".to_string());
    ///
    /// assert_eq!(ResponseParser::parse_retry_after(&headers), Some(Duration::from_secs(60)));
    /// ```
    pub fn parse_retry_after(headers: &HashMap<String, String>) -> Option<Duration> {
        headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("retry-after"))
            .and_then(|(_, value)| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Extracts the request ID from response headers for debugging.
    pub fn extract_request_id(headers: &HashMap<String, String>) -> Option<String> {
        const REQUEST_ID_HEADERS: [&str; 3] = ["x-request-id", "x-goog-request-id", "request-id"];

        headers
            .iter()
            .find(|(key, _)| {
                REQUEST_ID_HEADERS
                    .iter()
                    .any(|candidate| key.eq_ignore_ascii_case(candidate))
            })
            .map(|(_, value)| value.clone())
    }
}

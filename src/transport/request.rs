//! HTTP request builder for the Gemini API.
//!
//! This module provides the `RequestBuilder` for constructing HTTP requests
//! with proper authentication, headers, and URL formatting.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

use crate::auth::AuthManager;
use crate::error::GeminiError;
use super::http::{HttpRequest, HttpMethod};

/// Builder for constructing HTTP requests to the Gemini API.
///
/// The `RequestBuilder` handles:
/// - URL construction with API version prefixes
/// - Authentication via the configured auth manager
/// - Query parameters and the JSON `Content-Type` header
/// - Request body serialization
pub struct RequestBuilder {
    base_url: Url,
    api_version: String,
    auth_manager: Box<dyn AuthManager>,
}

impl Clone for RequestBuilder {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            api_version: self.api_version.clone(),
            auth_manager: self.auth_manager.clone_box(),
        }
    }
}

impl RequestBuilder {
    /// Creates a new request builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gemini_llm_utils::transport::RequestBuilder;
    /// use gemini_llm_utils::auth::ApiKeyAuthManager;
    /// use gemini_llm_utils::config::GeminiConfig;
    /// use secrecy::SecretString;
    ///
    /// let config = GeminiConfig::builder()
    ///     .api_key(SecretString::new("test-key".into()))
    ///     .build()
    ///     .unwrap();
    ///
    /// let builder = RequestBuilder::new(
    ///     config.base_url.clone(),
    ///     config.api_version.clone(),
    ///     Box::new(ApiKeyAuthManager::from_config(&config)),
    /// );
    /// ```
    pub fn new(
        base_url: Url,
        api_version: String,
        auth_manager: Box<dyn AuthManager>,
    ) -> Self {
        Self {
            base_url,
            api_version,
            auth_manager,
        }
    }

    /// Returns a copy of this builder targeting another API version.
    pub fn with_api_version(&self, api_version: &str) -> Self {
        let mut builder = self.clone();
        builder.api_version = api_version.to_string();
        builder
    }

    /// The API version requests are built against.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Builds a complete URL for the given path.
    ///
    /// The API version is prepended to the path, query pairs are appended
    /// in order, and the auth query parameter (if any) goes last.
    pub fn build_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, GeminiError> {
        let path = path.trim_start_matches('/');
        let full_path = format!("{}/{}", self.api_version, path);

        // `join` replaces the last segment unless the base ends with '/'.
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        let mut url = base.join(&full_path)?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Builds an authenticated HTTP request.
    ///
    /// A body, when present, is serialized to JSON and the `Content-Type`
    /// header is set.
    pub fn build_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        body: Option<&T>,
    ) -> Result<HttpRequest, GeminiError> {
        let mut url = self.build_url(path, query)?;
        let mut headers = HashMap::new();

        if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        self.auth_manager.authenticate(&mut headers, &mut url);

        let body_bytes = match body {
            Some(body) => Some(Bytes::from(serde_json::to_vec(body)?)),
            None => None,
        };

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body: body_bytes,
        })
    }

    /// Builds a body-less GET request.
    pub fn get(&self, path: &str, query: &[(&str, String)]) -> Result<HttpRequest, GeminiError> {
        self.build_request::<()>(HttpMethod::Get, path, query, None)
    }

    /// Builds a JSON POST request.
    pub fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<HttpRequest, GeminiError> {
        self.build_request(HttpMethod::Post, path, &[], Some(body))
    }
}

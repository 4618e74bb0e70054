//! Test doubles.
//!
//! [`MockHttpTransport`] and [`MockAuthManager`] stand in for the network
//! layer so services and the client can be exercised without a backend.
//! The closure-backed `Mock*` capability doubles stand in for a whole
//! client when testing code written against the capability traits.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::auth::{AuthManager, API_KEY_HEADER, API_KEY_QUERY_PARAM};
use crate::capabilities::{ContentGenerator, ModelGetter, ModelLister};
use crate::error::GeminiResult;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::types::{
    Content, GenerateContentConfig, GenerateContentResponse, GetModelConfig, ListModelsParams,
    ListModelsResponse, Model,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock HTTP transport that replays queued responses and records requests.
///
/// # Example
///
/// ```
/// use gemini_llm_utils::mocks::MockHttpTransport;
/// use gemini_llm_utils::transport::{HttpMethod, HttpRequest, HttpTransport};
/// use std::collections::HashMap;
///
/// # #[tokio::main]
/// # async fn main() {
/// let transport = MockHttpTransport::new();
/// transport.enqueue_json_response(200, r#"{"models": []}"#);
///
/// let request = HttpRequest {
///     method: HttpMethod::Get,
///     url: "https://example.com/v1beta/models".to_string(),
///     headers: HashMap::new(),
///     body: None,
/// };
///
/// let response = transport.send(request).await.unwrap();
/// assert_eq!(response.status, 200);
/// transport.verify_request_count(1);
/// # }
/// ```
#[derive(Clone, Default)]
pub struct MockHttpTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockHttpTransport {
    /// Create a new mock HTTP transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a response to be returned by the next request.
    pub fn enqueue_response(&self, response: Result<HttpResponse, TransportError>) {
        lock(&self.responses).push_back(response);
    }

    /// Enqueue a JSON response with the given status code and body.
    pub fn enqueue_json_response(&self, status: u16, body: &str) {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        self.enqueue_response(Ok(HttpResponse {
            status,
            headers,
            body: Bytes::from(body.to_string()),
        }));
    }

    /// Enqueue a transport failure.
    pub fn enqueue_error(&self, error: TransportError) {
        self.enqueue_response(Err(error));
    }

    /// All requests made so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Panics unless exactly `expected` requests were made.
    pub fn verify_request_count(&self, expected: usize) {
        let actual = lock(&self.requests).len();
        assert_eq!(actual, expected, "Expected {expected} requests, got {actual}");
    }

    /// Panics unless request `index` used `method` and its URL contains
    /// `url_contains`.
    pub fn verify_request(&self, index: usize, method: HttpMethod, url_contains: &str) {
        let requests = lock(&self.requests);
        let request = requests
            .get(index)
            .unwrap_or_else(|| panic!("No request at index {index}"));

        assert_eq!(request.method, method, "Unexpected method for request {index}");
        assert!(
            request.url.contains(url_contains),
            "Expected URL to contain '{url_contains}', got '{}'",
            request.url
        );
    }

    /// Panics unless request `index` carried `header_name: header_value`.
    pub fn verify_header(&self, index: usize, header_name: &str, header_value: &str) {
        let requests = lock(&self.requests);
        let request = requests
            .get(index)
            .unwrap_or_else(|| panic!("No request at index {index}"));

        assert_eq!(
            request.headers.get(header_name).map(String::as_str),
            Some(header_value),
            "Unexpected value for header '{header_name}'"
        );
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.requests).push(request);

        lock(&self.responses).pop_front().unwrap_or_else(|| {
            Err(TransportError::Connection(
                "No response configured in MockHttpTransport".to_string(),
            ))
        })
    }
}

/// Auth manager with a plain-text key, for tests that build requests by hand.
#[derive(Debug, Clone)]
pub struct MockAuthManager {
    api_key: String,
    use_header: bool,
}

impl MockAuthManager {
    /// Header authentication with `api_key`.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            use_header: true,
        }
    }

    /// Query parameter authentication with `api_key`.
    pub fn with_query_param(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            use_header: false,
        }
    }
}

impl AuthManager for MockAuthManager {
    fn auth_header(&self) -> Option<(String, String)> {
        self.use_header
            .then(|| (API_KEY_HEADER.to_string(), self.api_key.clone()))
    }

    fn auth_query_param(&self) -> Option<(String, String)> {
        (!self.use_header).then(|| (API_KEY_QUERY_PARAM.to_string(), self.api_key.clone()))
    }

    fn clone_box(&self) -> Box<dyn AuthManager> {
        Box::new(self.clone())
    }
}

/// [`ModelLister`] answering from a closure.
///
/// ```
/// use gemini_llm_utils::mocks::MockModelLister;
/// use gemini_llm_utils::types::ListModelsResponse;
///
/// let lister = MockModelLister::new(|_params| Ok(ListModelsResponse::default()));
/// ```
pub struct MockModelLister<F> {
    respond: F,
}

impl<F> MockModelLister<F>
where
    F: Fn(Option<ListModelsParams>) -> GeminiResult<ListModelsResponse> + Send + Sync,
{
    /// A lister that calls `respond` for every request.
    pub fn new(respond: F) -> Self {
        Self { respond }
    }
}

#[async_trait]
impl<F> ModelLister for MockModelLister<F>
where
    F: Fn(Option<ListModelsParams>) -> GeminiResult<ListModelsResponse> + Send + Sync,
{
    async fn list_models(&self, config: Option<ListModelsParams>) -> GeminiResult<ListModelsResponse> {
        (self.respond)(config)
    }
}

/// [`ModelGetter`] answering from a closure.
pub struct MockModelGetter<F> {
    respond: F,
}

impl<F> MockModelGetter<F>
where
    F: Fn(&str, Option<GetModelConfig>) -> GeminiResult<Model> + Send + Sync,
{
    /// A getter that calls `respond` for every request.
    pub fn new(respond: F) -> Self {
        Self { respond }
    }
}

#[async_trait]
impl<F> ModelGetter for MockModelGetter<F>
where
    F: Fn(&str, Option<GetModelConfig>) -> GeminiResult<Model> + Send + Sync,
{
    async fn get_model(&self, name: &str, config: Option<GetModelConfig>) -> GeminiResult<Model> {
        (self.respond)(name, config)
    }
}

/// [`ContentGenerator`] answering from a closure.
pub struct MockContentGenerator<F> {
    respond: F,
}

impl<F> MockContentGenerator<F>
where
    F: Fn(&str, Vec<Content>, Option<GenerateContentConfig>) -> GeminiResult<GenerateContentResponse>
        + Send
        + Sync,
{
    /// A generator that calls `respond` for every request.
    pub fn new(respond: F) -> Self {
        Self { respond }
    }
}

#[async_trait]
impl<F> ContentGenerator for MockContentGenerator<F>
where
    F: Fn(&str, Vec<Content>, Option<GenerateContentConfig>) -> GeminiResult<GenerateContentResponse>
        + Send
        + Sync,
{
    async fn generate(
        &self,
        model: &str,
        contents: Vec<Content>,
        config: Option<GenerateContentConfig>,
    ) -> GeminiResult<GenerateContentResponse> {
        (self.respond)(model, contents, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RequestBuilder;
    use url::Url;

    fn get_request(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: HashMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn test_responses_replay_in_order() {
        let transport = MockHttpTransport::new();
        transport.enqueue_json_response(200, r#"{"id": 1}"#);
        transport.enqueue_json_response(404, r#"{"id": 2}"#);

        let first = transport.send(get_request("https://example.com/1")).await.unwrap();
        let second = transport.send(get_request("https://example.com/2")).await.unwrap();

        assert_eq!(first.status, 200);
        assert_eq!(second.status, 404);
        transport.verify_request_count(2);
        transport.verify_request(1, HttpMethod::Get, "/2");
    }

    #[tokio::test]
    async fn test_empty_queue_is_connection_error() {
        let transport = MockHttpTransport::new();

        let result = transport.send(get_request("https://example.com")).await;

        assert!(matches!(result, Err(TransportError::Connection(_))));
        transport.verify_request_count(1);
    }

    #[test]
    fn test_mock_auth_with_request_builder() {
        let base = Url::parse("https://example.com").unwrap();

        let header = RequestBuilder::new(base.clone(), "v1beta".into(), Box::new(MockAuthManager::new("k")))
            .get("/models", &[])
            .unwrap();
        assert_eq!(header.headers.get(API_KEY_HEADER).map(String::as_str), Some("k"));

        let query = RequestBuilder::new(base, "v1beta".into(), Box::new(MockAuthManager::with_query_param("k")))
            .get("/models", &[])
            .unwrap();
        assert!(query.url.ends_with("/v1beta/models?key=k"));
        assert!(query.headers.is_empty());
    }

    #[tokio::test]
    async fn test_content_generator_double_sees_inputs() {
        let generator = MockContentGenerator::new(|model, contents, config| {
            assert_eq!(model, "models/gemini-2.0-flash");
            assert_eq!(contents.len(), 1);
            assert!(config.is_none());
            Ok(GenerateContentResponse::default())
        });

        let response = generator
            .generate(
                "models/gemini-2.0-flash",
                vec![Content::from_text("hi", crate::types::Role::User)],
                None,
            )
            .await
            .unwrap();

        assert!(response.candidates.is_empty());
    }
}

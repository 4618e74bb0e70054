//! API key authentication for outgoing requests.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::config::{AuthMethod, GeminiConfig};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Query parameter carrying the API key.
pub const API_KEY_QUERY_PARAM: &str = "key";

/// Attaches credentials to outgoing requests.
pub trait AuthManager: Send + Sync {
    /// Header name and value to send, if header auth is in use.
    fn auth_header(&self) -> Option<(String, String)>;

    /// Query parameter name and value to send, if query auth is in use.
    fn auth_query_param(&self) -> Option<(String, String)>;

    /// Clone the auth manager into a boxed trait object.
    fn clone_box(&self) -> Box<dyn AuthManager>;

    /// Apply whichever credential form this manager uses.
    fn authenticate(&self, headers: &mut HashMap<String, String>, url: &mut Url) {
        if let Some((name, value)) = self.auth_header() {
            headers.insert(name, value);
        }
        if let Some((key, value)) = self.auth_query_param() {
            url.query_pairs_mut().append_pair(&key, &value);
        }
    }
}

/// API key authentication manager.
pub struct ApiKeyAuthManager {
    api_key: SecretString,
    auth_method: AuthMethod,
}

impl ApiKeyAuthManager {
    /// Create a new API key auth manager.
    pub fn new(api_key: SecretString, auth_method: AuthMethod) -> Self {
        Self { api_key, auth_method }
    }

    /// Create from config.
    pub fn from_config(config: &GeminiConfig) -> Self {
        Self::new(config.api_key.clone(), config.auth_method)
    }
}

impl AuthManager for ApiKeyAuthManager {
    fn auth_header(&self) -> Option<(String, String)> {
        match self.auth_method {
            AuthMethod::Header => Some((
                API_KEY_HEADER.to_string(),
                self.api_key.expose_secret().to_string(),
            )),
            AuthMethod::QueryParam => None,
        }
    }

    fn auth_query_param(&self) -> Option<(String, String)> {
        match self.auth_method {
            AuthMethod::QueryParam => Some((
                API_KEY_QUERY_PARAM.to_string(),
                self.api_key.expose_secret().to_string(),
            )),
            AuthMethod::Header => None,
        }
    }

    fn clone_box(&self) -> Box<dyn AuthManager> {
        Box::new(Self {
            api_key: self.api_key.clone(),
            auth_method: self.auth_method,
        })
    }
}

impl std::fmt::Debug for ApiKeyAuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuthManager")
            .field("api_key", &"<redacted>")
            .field("auth_method", &self.auth_method)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(method: AuthMethod) -> ApiKeyAuthManager {
        ApiKeyAuthManager::new(SecretString::new("test-key".into()), method)
    }

    #[test]
    fn test_header_auth() {
        let manager = manager(AuthMethod::Header);

        let (name, value) = manager.auth_header().unwrap();
        assert_eq!(name, "x-goog-api-key");
        assert_eq!(value, "test-key");
        assert!(manager.auth_query_param().is_none());
    }

    #[test]
    fn test_query_param_auth() {
        let manager = manager(AuthMethod::QueryParam);

        assert!(manager.auth_header().is_none());
        let (name, value) = manager.auth_query_param().unwrap();
        assert_eq!(name, "key");
        assert_eq!(value, "test-key");
    }

    #[test]
    fn test_authenticate_header_leaves_url_alone() {
        let mut headers = HashMap::new();
        let mut url = Url::parse("https://example.com/v1beta/models").unwrap();

        manager(AuthMethod::Header).authenticate(&mut headers, &mut url);

        assert_eq!(headers.get("x-goog-api-key").map(String::as_str), Some("test-key"));
        assert!(url.query().is_none());
    }

    #[test]
    fn test_authenticate_query_param() {
        let mut headers = HashMap::new();
        let mut url = Url::parse("https://example.com/v1beta/models?pageSize=5").unwrap();

        manager(AuthMethod::QueryParam).authenticate(&mut headers, &mut url);

        assert!(headers.is_empty());
        assert_eq!(url.query(), Some("pageSize=5&key=test-key"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", manager(AuthMethod::Header));
        assert!(!rendered.contains("test-key"));
    }
}

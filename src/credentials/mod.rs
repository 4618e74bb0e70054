//! Credential resolution and client construction.
//!
//! [`new_client`] is the only function in the crate that reads the process
//! environment. Everything else takes its key or configuration explicitly,
//! so tests can build clients without touching global state.

use secrecy::{ExposeSecret, SecretString};

use crate::client::GenAiClient;
use crate::config::{GeminiConfig, API_KEY_ENV_VAR};
use crate::error::{CredentialError, GeminiResult};

/// Builds a client from `GEMINI_API_KEY`, applying the optional
/// `GEMINI_BASE_URL`, `GEMINI_API_VERSION` and `GEMINI_TIMEOUT_SECS`
/// overrides.
///
/// # Errors
///
/// - `CredentialError::MissingCredential` if the variable is unset.
/// - `CredentialError::EmptyCredential` if it is set to an empty string.
/// - `ConfigurationError::ClientConstruction` if the HTTP transport cannot
///   be created.
pub fn new_client() -> GeminiResult<GenAiClient> {
    let lookup = |name: &str| std::env::var(name).ok();

    let api_key = resolve_api_key(&lookup)?;
    let config = GeminiConfig::builder()
        .api_key(api_key)
        .env_overrides(&lookup)?
        .build()?;

    new_client_with_config(config)
}

/// Builds a client from an explicit key, with default configuration.
///
/// ```
/// use gemini_llm_utils::credentials::new_client_with_api_key;
/// use gemini_llm_utils::error::{CredentialError, GeminiError};
///
/// assert!(new_client_with_api_key("my-key").is_ok());
/// assert!(matches!(
///     new_client_with_api_key(""),
///     Err(GeminiError::Credential(CredentialError::EmptyCredential))
/// ));
/// ```
pub fn new_client_with_api_key(api_key: &str) -> GeminiResult<GenAiClient> {
    if api_key.is_empty() {
        return Err(CredentialError::EmptyCredential.into());
    }

    let config = GeminiConfig::builder()
        .api_key(SecretString::new(api_key.to_string()))
        .build()?;

    new_client_with_config(config)
}

/// Builds a client from a complete configuration.
pub fn new_client_with_config(config: GeminiConfig) -> GeminiResult<GenAiClient> {
    if config.api_key.expose_secret().is_empty() {
        return Err(CredentialError::EmptyCredential.into());
    }

    GenAiClient::builder(config).build()
}

/// Resolves the API key through `lookup`, which maps a variable name to its
/// value.
///
/// ```
/// use gemini_llm_utils::credentials::resolve_api_key;
/// use secrecy::ExposeSecret;
///
/// let key = resolve_api_key(|_| Some("abc".to_string())).unwrap();
/// assert_eq!(key.expose_secret(), "abc");
///
/// let err = resolve_api_key(|_| None).unwrap_err();
/// assert_eq!(err.to_string(), "Environment variable GEMINI_API_KEY not set");
/// ```
pub fn resolve_api_key<F>(lookup: F) -> GeminiResult<SecretString>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(API_KEY_ENV_VAR) {
        None => Err(CredentialError::MissingCredential {
            variable: API_KEY_ENV_VAR.to_string(),
        }
        .into()),
        Some(value) if value.is_empty() => Err(CredentialError::EmptyCredential.into()),
        Some(value) => Ok(SecretString::new(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GeminiClient;
    use crate::config::Backend;
    use crate::error::GeminiError;
    use serial_test::serial;

    fn restore(var: &str, previous: Option<String>) {
        match previous {
            Some(value) => std::env::set_var(var, value),
            None => std::env::remove_var(var),
        }
    }

    #[test]
    fn test_resolve_only_consults_key_variable() {
        let key = resolve_api_key(|name| (name == "GEMINI_API_KEY").then(|| "k".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "k");
    }

    #[test]
    fn test_resolve_empty() {
        let err = resolve_api_key(|_| Some(String::new())).unwrap_err();
        assert!(matches!(err, GeminiError::Credential(CredentialError::EmptyCredential)));
        assert_eq!(err.to_string(), "API key cannot be empty");
    }

    #[test]
    fn test_with_api_key_binds_backend() {
        let client = new_client_with_api_key("test-key").unwrap();
        assert_eq!(client.backend(), Backend::GeminiApi);
        assert_eq!(client.config().api_key.expose_secret(), "test-key");
    }

    #[test]
    fn test_with_config_rejects_empty_key() {
        let config = GeminiConfig::builder()
            .api_key(SecretString::new(String::new()))
            .build()
            .unwrap();

        let err = new_client_with_config(config).unwrap_err();
        assert!(matches!(err, GeminiError::Credential(CredentialError::EmptyCredential)));
    }

    #[test]
    #[serial]
    fn test_new_client_env_unset() {
        let previous = std::env::var(API_KEY_ENV_VAR).ok();
        std::env::remove_var(API_KEY_ENV_VAR);

        let result = new_client();

        restore(API_KEY_ENV_VAR, previous);
        assert!(matches!(
            result,
            Err(GeminiError::Credential(CredentialError::MissingCredential { .. }))
        ));
    }

    #[test]
    #[serial]
    fn test_new_client_env_empty() {
        let previous = std::env::var(API_KEY_ENV_VAR).ok();
        std::env::set_var(API_KEY_ENV_VAR, "");

        let result = new_client();

        restore(API_KEY_ENV_VAR, previous);
        assert!(matches!(
            result,
            Err(GeminiError::Credential(CredentialError::EmptyCredential))
        ));
    }

    #[test]
    #[serial]
    fn test_new_client_env_set() {
        let previous = std::env::var(API_KEY_ENV_VAR).ok();
        std::env::set_var(API_KEY_ENV_VAR, "env-key");

        let result = new_client();

        restore(API_KEY_ENV_VAR, previous);
        assert!(result.is_ok());
    }
}

//! Builder for creating Gemini client instances.

use std::sync::Arc;

use crate::auth::ApiKeyAuthManager;
use crate::config::GeminiConfig;
use crate::error::{ConfigurationError, GeminiError};
use crate::observability::{Logger, StructuredLogger};
use crate::transport::{HttpTransport, RequestBuilder, ReqwestTransport};

use super::client::GenAiClient;

/// Builder for a [`GenAiClient`].
///
/// The transport and logger can be replaced, which is how tests run the
/// client against `MockHttpTransport`.
pub struct GenAiClientBuilder {
    config: GeminiConfig,

    // Injectable dependencies for testing
    transport: Option<Arc<dyn HttpTransport>>,
    logger: Option<Arc<dyn Logger>>,
}

impl GenAiClientBuilder {
    /// Creates a builder from a configuration.
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            transport: None,
            logger: None,
        }
    }

    /// Sets a custom HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom logger.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ClientConstruction` if the default HTTP
    /// transport cannot be created.
    pub fn build(self) -> Result<GenAiClient, GeminiError> {
        let config = self.config;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::new(config.timeout, config.connect_timeout).map_err(|e| {
                    ConfigurationError::ClientConstruction {
                        message: e.to_string(),
                    }
                })?,
            ),
        };

        let logger = self.logger.unwrap_or_else(|| {
            Arc::new(StructuredLogger::new("gemini").with_level(config.log_level))
        });

        let request_builder = RequestBuilder::new(
            config.base_url.clone(),
            config.api_version.clone(),
            Box::new(ApiKeyAuthManager::from_config(&config)),
        );

        tracing::debug!(
            backend = ?config.backend,
            base_url = %config.base_url,
            api_version = %config.api_version,
            "Gemini client constructed"
        );

        Ok(GenAiClient::from_parts(config, transport, request_builder, logger))
    }
}

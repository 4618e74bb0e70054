//! Main client implementation for Gemini API.

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::config::{Backend, GeminiConfig};
use crate::observability::Logger;
use crate::services::{
    ContentService, ContentServiceImpl, ModelsService, ModelsServiceImpl,
};
use crate::transport::{HttpTransport, RequestBuilder};

use super::builder::GenAiClientBuilder;
use super::traits::GeminiClient;

/// Client bound to one backend with one credential.
///
/// Services are created on first access and share the client's transport.
///
/// # Example
///
/// ```no_run
/// use gemini_llm_utils::{GeminiClient, GeminiConfig, GenAiClient};
/// use secrecy::SecretString;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GeminiConfig::builder()
///     .api_key(SecretString::new("your-api-key".into()))
///     .build()?;
/// let client = GenAiClient::builder(config).build()?;
///
/// let page = client.models().list(None).await?;
/// # Ok(())
/// # }
/// ```
pub struct GenAiClient {
    config: GeminiConfig,
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
    logger: Arc<dyn Logger>,

    models_service: OnceCell<ModelsServiceImpl>,
    content_service: OnceCell<ContentServiceImpl>,
}

impl GenAiClient {
    /// Creates a client builder for `config`.
    pub fn builder(config: GeminiConfig) -> GenAiClientBuilder {
        GenAiClientBuilder::new(config)
    }

    pub(super) fn from_parts(
        config: GeminiConfig,
        transport: Arc<dyn HttpTransport>,
        request_builder: RequestBuilder,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            config,
            transport,
            request_builder,
            logger,
            models_service: OnceCell::new(),
            content_service: OnceCell::new(),
        }
    }

    /// The backend this client talks to.
    pub fn backend(&self) -> Backend {
        self.config.backend
    }
}

impl GeminiClient for GenAiClient {
    fn models(&self) -> &dyn ModelsService {
        self.models_service.get_or_init(|| {
            ModelsServiceImpl::new(
                Arc::clone(&self.transport),
                self.request_builder.clone(),
                Arc::clone(&self.logger),
            )
        })
    }

    fn content(&self) -> &dyn ContentService {
        self.content_service.get_or_init(|| {
            ContentServiceImpl::new(
                Arc::clone(&self.transport),
                self.request_builder.clone(),
                Arc::clone(&self.logger),
            )
        })
    }

    fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

impl std::fmt::Debug for GenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAiClient")
            .field("backend", &self.config.backend)
            .field("base_url", &self.config.base_url.as_str())
            .field("api_version", &self.config.api_version)
            .finish_non_exhaustive()
    }
}

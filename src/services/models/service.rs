//! Models service implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::ModelsService;
use crate::error::GeminiError;
use crate::observability::Logger;
use crate::transport::{endpoints, HttpTransport, RequestBuilder, ResponseParser};
use crate::types::{GetModelConfig, ListModelsParams, ListModelsResponse, Model};

/// Implementation of the ModelsService.
///
/// Every call goes to the backend; nothing is cached.
pub struct ModelsServiceImpl {
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
    logger: Arc<dyn Logger>,
}

impl ModelsServiceImpl {
    /// Create a new models service implementation.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        request_builder: RequestBuilder,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            transport,
            request_builder,
            logger,
        }
    }
}

#[async_trait]
impl ModelsService for ModelsServiceImpl {
    async fn list(
        &self,
        params: Option<ListModelsParams>,
    ) -> Result<ListModelsResponse, GeminiError> {
        let query = params.as_ref().map(ListModelsParams::to_query).unwrap_or_default();
        let request = self.request_builder.get(endpoints::MODELS, &query)?;

        self.logger.debug("Listing models", json!({
            "page_size": params.as_ref().and_then(|p| p.page_size),
            "has_page_token": params.as_ref().is_some_and(|p| p.page_token.is_some()),
        }));

        let response = self.transport.send(request).await?;
        let page: ListModelsResponse = ResponseParser::parse_response(response)?;

        self.logger.debug("Listed models", json!({
            "count": page.models.len(),
            "has_next_page": page.next_page_token.as_deref().is_some_and(|t| !t.is_empty()),
        }));

        Ok(page)
    }

    async fn get(
        &self,
        model: &str,
        config: Option<&GetModelConfig>,
    ) -> Result<Model, GeminiError> {
        let builder = match config.and_then(|c| c.api_version.as_deref()) {
            Some(version) => self.request_builder.with_api_version(version),
            None => self.request_builder.clone(),
        };
        let request = builder.get(&endpoints::model(model), &[])?;

        self.logger.debug("Getting model", json!({
            "model": model,
            "api_version": builder.api_version(),
        }));

        let response = self.transport.send(request).await?;
        ResponseParser::parse_response(response)
    }
}

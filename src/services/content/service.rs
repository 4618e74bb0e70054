//! Content service implementation for generating content with Gemini models.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::json;

use super::validation::validate_generate_request;
use super::ContentService;
use crate::error::GeminiError;
use crate::observability::Logger;
use crate::transport::{endpoints, HttpTransport, RequestBuilder, ResponseParser};
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Implementation of the ContentService.
pub struct ContentServiceImpl {
    transport: Arc<dyn HttpTransport>,
    request_builder: RequestBuilder,
    logger: Arc<dyn Logger>,
}

impl ContentServiceImpl {
    /// Create a new content service implementation.
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

    fn log_completion(&self, model: &str, response: &GenerateContentResponse, started: Instant) {
        let mut fields = json!({
            "model": model,
            "duration_ms": started.elapsed().as_millis() as u64,
            "candidates": response.candidates.len(),
        });

        if let Some(usage) = &response.usage_metadata {
            fields["prompt_tokens"] = json!(usage.prompt_token_count);
            fields["completion_tokens"] = json!(usage.candidates_token_count.unwrap_or(0));
            fields["total_tokens"] = json!(usage.total_token_count);
        }

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_ref())
        {
            self.logger.warn("Prompt was blocked", json!({
                "model": model,
                "block_reason": format!("{reason:?}"),
            }));
        }

        self.logger.debug("Content generation completed", fields);
    }
}

#[async_trait]
impl ContentService for ContentServiceImpl {
    async fn generate(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let started = Instant::now();

        self.logger.debug("Starting content generation", json!({
            "model": model,
            "contents_count": request.contents.len(),
            "has_system_instruction": request.system_instruction.is_some(),
            "has_generation_config": request.generation_config.is_some(),
        }));

        validate_generate_request(&request)?;

        let http_request = self
            .request_builder
            .post(&endpoints::generate_content(model), &request)?;

        let http_response = self.transport.send(http_request).await.map_err(|e| {
            let error = GeminiError::from(e);
            self.logger.error("Network error during content generation", json!({
                "model": model,
                "error": error.to_string(),
            }));
            error
        })?;

        let response: GenerateContentResponse = ResponseParser::parse_response(http_response)?;
        self.log_completion(model, &response, started);

        Ok(response)
    }
}

//! Narrow capability interfaces over the Gemini client.
//!
//! Each trait exposes exactly one backend operation, so code that only
//! needs to list models depends on [`ModelLister`] and nothing else. The
//! `GenAi*` adapters implement the traits on top of a [`GeminiClient`];
//! tests substitute the doubles in [`crate::mocks`] or their own.

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::GeminiClient;
use crate::error::GeminiResult;
use crate::types::{
    Content, GenerateContentConfig, GenerateContentResponse, GetModelConfig, ListModelsParams,
    ListModelsResponse, Model,
};

/// Lists models available to the caller.
#[async_trait]
pub trait ModelLister: Send + Sync {
    /// Fetch one page of models. `None` means no page size and no page
    /// token, i.e. the first page with backend defaults.
    async fn list_models(&self, config: Option<ListModelsParams>) -> GeminiResult<ListModelsResponse>;
}

/// Fetches a single model descriptor.
#[async_trait]
pub trait ModelGetter: Send + Sync {
    /// Fetch the model called `name`.
    async fn get_model(&self, name: &str, config: Option<GetModelConfig>) -> GeminiResult<Model>;
}

/// Generates content from a model.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Run one generation over `contents`.
    async fn generate(
        &self,
        model: &str,
        contents: Vec<Content>,
        config: Option<GenerateContentConfig>,
    ) -> GeminiResult<GenerateContentResponse>;
}

/// [`ModelLister`] backed by a client.
#[derive(Clone)]
pub struct GenAiModelLister {
    client: Arc<dyn GeminiClient>,
}

impl GenAiModelLister {
    /// Wraps `client`.
    pub fn new(client: Arc<dyn GeminiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelLister for GenAiModelLister {
    async fn list_models(&self, config: Option<ListModelsParams>) -> GeminiResult<ListModelsResponse> {
        self.client.models().list(config).await
    }
}

/// [`ModelGetter`] backed by a client.
#[derive(Clone)]
pub struct GenAiModelGetter {
    client: Arc<dyn GeminiClient>,
}

impl GenAiModelGetter {
    /// Wraps `client`.
    pub fn new(client: Arc<dyn GeminiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelGetter for GenAiModelGetter {
    async fn get_model(&self, name: &str, config: Option<GetModelConfig>) -> GeminiResult<Model> {
        self.client.models().get(name, config.as_ref()).await
    }
}

/// [`ContentGenerator`] backed by a client.
#[derive(Clone)]
pub struct GenAiContentGenerator {
    client: Arc<dyn GeminiClient>,
}

impl GenAiContentGenerator {
    /// Wraps `client`.
    pub fn new(client: Arc<dyn GeminiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentGenerator for GenAiContentGenerator {
    async fn generate(
        &self,
        model: &str,
        contents: Vec<Content>,
        config: Option<GenerateContentConfig>,
    ) -> GeminiResult<GenerateContentResponse> {
        let request = config.unwrap_or_default().into_request(contents);
        self.client.content().generate(model, request).await
    }
}

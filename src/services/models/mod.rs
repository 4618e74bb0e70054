//! Models service for Gemini API.

mod service;

use async_trait::async_trait;
use crate::error::GeminiError;
use crate::types::{GetModelConfig, ListModelsParams, ListModelsResponse, Model};

pub use service::ModelsServiceImpl;

/// Service for listing and retrieving model information.
#[async_trait]
pub trait ModelsService: Send + Sync {
    /// Fetch one page of the model listing. `None` requests the first page
    /// with the backend's default page size.
    async fn list(
        &self,
        params: Option<ListModelsParams>,
    ) -> Result<ListModelsResponse, GeminiError>;

    /// Get a specific model by name. Bare ids get the `models/` prefix.
    async fn get(
        &self,
        model: &str,
        config: Option<&GetModelConfig>,
    ) -> Result<Model, GeminiError>;
}

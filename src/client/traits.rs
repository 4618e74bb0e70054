//! Client trait definitions for Gemini API.

use crate::config::GeminiConfig;
use crate::services::{ContentService, ModelsService};

/// Handle to a Gemini backend, exposing the services used by the adapters.
pub trait GeminiClient: Send + Sync {
    /// Access the models service.
    fn models(&self) -> &dyn ModelsService;

    /// Access the content generation service.
    fn content(&self) -> &dyn ContentService;

    /// The configuration the client was built from.
    fn config(&self) -> &GeminiConfig;
}

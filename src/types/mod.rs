//! Core types for the Gemini API.
//!
//! This module contains the request, response, and configuration types
//! used for model discovery and content generation.

pub mod content;
pub mod generation;
pub mod models;

pub use content::{Blob, Content, FunctionCall, FunctionResponse, Part, Role};

pub use generation::{
    BlockReason, Candidate, FinishReason, GenerateContentConfig, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, PromptFeedback, UsageMetadata,
};

pub use models::{GetModelConfig, ListModelsParams, ListModelsResponse, Model};

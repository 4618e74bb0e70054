//! # Gemini LLM utilities
//!
//! Model discovery, content generation and response materialization on top
//! of the Google Gemini REST API.
//!
//! ## Features
//!
//! - Narrow capability traits (`ModelLister`, `ModelGetter`,
//!   `ContentGenerator`) with adapters over a real client and test doubles
//! - Model directory helpers: first page, full listing, lookup, filtering by
//!   supported action
//! - Response materialization: extract the first candidate's text,
//!   normalize escaped newlines, write it to disk and read it back
//! - Credential resolution from `GEMINI_API_KEY`, kept in one place
//! - Secure credential handling with `SecretString`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gemini_llm_utils::{credentials, directory, GenAiModelLister};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(credentials::new_client()?);
//!     let lister = GenAiModelLister::new(client);
//!
//!     let page = directory::list_models(&lister).await?;
//!     for name in directory::filter_models_by_action(&page.models, "generateContent") {
//!         println!("{name}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `credentials` - API key resolution and client construction
//! - `client` - Client handle with lazily created services
//! - `capabilities` - Capability traits and their client adapters
//! - `directory` - Model listing, lookup and filtering
//! - `materialize` - Response-to-file round trip and prompt file reading
//! - `config` - Configuration types and builder
//! - `auth` - API key header/query authentication
//! - `transport` - HTTP transport layer
//! - `error` - Error types and taxonomy
//! - `types` - Wire types for models and content generation
//! - `services` - Models and content services

#![warn(missing_docs)]

pub mod auth;
pub mod capabilities;
pub mod client;
pub mod config;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod materialize;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;

// Development/testing modules - always available for integration tests
pub mod fixtures;
pub mod mocks;

pub use auth::{ApiKeyAuthManager, AuthManager};
pub use capabilities::{
    ContentGenerator, GenAiContentGenerator, GenAiModelGetter, GenAiModelLister, ModelGetter,
    ModelLister,
};
pub use client::{GeminiClient, GenAiClient, GenAiClientBuilder};
pub use config::{
    AuthMethod, Backend, GeminiConfig, GeminiConfigBuilder, LogLevel, DEFAULT_API_VERSION,
    DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
pub use credentials::{new_client, new_client_with_api_key, new_client_with_config};
pub use error::{ArtifactError, CredentialError, GeminiError, GeminiResult};
pub use types::{
    Content, GenerateContentConfig, GenerateContentResponse, GetModelConfig, ListModelsParams,
    ListModelsResponse, Model, Part, Role,
};

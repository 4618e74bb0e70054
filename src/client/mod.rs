//! Client handle for the Gemini API.
//!
//! Provides `GenAiClient` with a builder and lazily initialized services.

mod builder;
mod client;
mod traits;

pub use builder::GenAiClientBuilder;
pub use client::GenAiClient;
pub use traits::GeminiClient;

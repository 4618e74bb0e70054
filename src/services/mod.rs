//! Service implementations for the Gemini API.

pub mod content;
pub mod models;

pub use content::{ContentService, ContentServiceImpl};
pub use models::{ModelsService, ModelsServiceImpl};

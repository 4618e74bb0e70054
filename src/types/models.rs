//! Model-related types for the Gemini API.

use serde::{Deserialize, Serialize};

/// Information about a Gemini model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// The resource name of the model, e.g. `models/gemini-2.0-flash`.
    pub name: String,
    /// The version of the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// The display name of the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// The description of the model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The input token limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_token_limit: Option<i32>,
    /// The output token limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_token_limit: Option<i32>,
    /// Actions (API methods) the model supports, e.g. `generateContent`.
    #[serde(
        default,
        rename = "supportedGenerationMethods",
        alias = "supportedActions",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub supported_actions: Vec<String>,
    /// The default temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// The default top_p.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// The default top_k.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    /// The maximum temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<f32>,
}

impl Model {
    /// True if `action` is one of the supported actions (exact match).
    pub fn supports(&self, action: &str) -> bool {
        self.supported_actions.iter().any(|a| a == action)
    }
}

/// One page of the model listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListModelsResponse {
    /// The models on this page.
    #[serde(default)]
    pub models: Vec<Model>,
    /// Token for the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Parameters for listing models.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListModelsParams {
    /// The page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    /// The page token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

impl ListModelsParams {
    /// Query pairs for the list endpoint.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page_size) = self.page_size {
            query.push(("pageSize", page_size.to_string()));
        }
        if let Some(ref page_token) = self.page_token {
            query.push(("pageToken", page_token.clone()));
        }
        query
    }
}

/// Per-call options for fetching one model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetModelConfig {
    /// API version to query instead of the client's default.
    pub api_version: Option<String>,
}

//! Endpoint paths for the Gemini REST API.
//!
//! Paths are relative to `{base_url}/{api_version}`.

/// Base path for models endpoints.
pub const MODELS: &str = "/models";

/// Resource prefix carried by model names.
pub const MODEL_PREFIX: &str = "models/";

/// Adds the `models/` prefix to a bare model id.
///
/// # Example
///
/// ```
/// use gemini_llm_utils::transport::endpoints;
///
/// assert_eq!(endpoints::normalize_model_name("gemini-2.0-flash"), "models/gemini-2.0-flash");
/// assert_eq!(endpoints::normalize_model_name("models/gemini-2.0-flash"), "models/gemini-2.0-flash");
/// ```
pub fn normalize_model_name(name: &str) -> String {
    if name.starts_with(MODEL_PREFIX) {
        name.to_string()
    } else {
        format!("{MODEL_PREFIX}{name}")
    }
}

/// Path for a specific model.
///
/// # Example
///
/// ```
/// use gemini_llm_utils::transport::endpoints;
///
/// assert_eq!(endpoints::model("gemini-1.5-pro"), "/models/gemini-1.5-pro");
/// ```
pub fn model(name: &str) -> String {
    format!("/{}", normalize_model_name(name))
}

/// Path for the generateContent endpoint of a model.
///
/// # Example
///
/// ```
/// use gemini_llm_utils::transport::endpoints;
///
/// let path = endpoints::generate_content("models/gemini-2.0-flash");
/// assert_eq!(path, "/models/gemini-2.0-flash:generateContent");
/// ```
pub fn generate_content(model: &str) -> String {
    format!("/{}:generateContent", normalize_model_name(model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_path() {
        assert_eq!(model("gemini-pro"), "/models/gemini-pro");
        assert_eq!(model("models/gemini-pro"), "/models/gemini-pro");
    }

    #[test]
    fn test_generate_content_path() {
        assert_eq!(
            generate_content("gemini-pro"),
            "/models/gemini-pro:generateContent"
        );
        assert_eq!(
            generate_content("models/gemini-2.5-pro"),
            "/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_normalize_empty_name() {
        assert_eq!(normalize_model_name(""), "models/");
    }
}

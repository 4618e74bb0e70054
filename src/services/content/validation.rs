//! Local checks on generate content requests.
//!
//! These catch requests the backend would reject anyway, before a network
//! round trip is spent on them.

use crate::error::{GeminiError, GeminiResult, RequestError, ValidationDetail};
use crate::types::{Content, GenerateContentRequest, GenerationConfig, Part};

/// Validate a generate content request.
pub fn validate_generate_request(request: &GenerateContentRequest) -> GeminiResult<()> {
    let mut details = Vec::new();

    if request.contents.is_empty() {
        details.push(detail("contents", "Contents array cannot be empty"));
    }

    for (idx, content) in request.contents.iter().enumerate() {
        validate_content(content, &format!("contents[{idx}]"), &mut details);
    }

    if let Some(system_instruction) = &request.system_instruction {
        validate_content(system_instruction, "system_instruction", &mut details);
    }

    if let Some(config) = &request.generation_config {
        validate_generation_config(config, &mut details);
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(GeminiError::Request(RequestError::ValidationError {
            message: "Invalid generate content request".to_string(),
            details,
        }))
    }
}

fn validate_content(content: &Content, prefix: &str, details: &mut Vec<ValidationDetail>) {
    if content.parts.is_empty() {
        details.push(detail(
            &format!("{prefix}.parts"),
            "Content must have at least one part",
        ));
    }

    for (idx, part) in content.parts.iter().enumerate() {
        let field = format!("{prefix}.parts[{idx}]");
        match part {
            Part::InlineData { inline_data } if inline_data.mime_type.is_empty() => {
                details.push(detail(&format!("{field}.inline_data.mime_type"), "MIME type is required"));
            }
            Part::FunctionCall { function_call } if function_call.name.is_empty() => {
                details.push(detail(&format!("{field}.function_call.name"), "Function name is required"));
            }
            Part::FunctionResponse { function_response } if function_response.name.is_empty() => {
                details.push(detail(&format!("{field}.function_response.name"), "Function name is required"));
            }
            _ => {}
        }
    }
}

fn validate_generation_config(config: &GenerationConfig, details: &mut Vec<ValidationDetail>) {
    if let Some(temperature) = config.temperature {
        if !(0.0..=2.0).contains(&temperature) {
            details.push(detail(
                "generation_config.temperature",
                "Temperature must be between 0.0 and 2.0",
            ));
        }
    }

    if let Some(top_p) = config.top_p {
        if !(0.0..=1.0).contains(&top_p) {
            details.push(detail("generation_config.top_p", "top_p must be between 0.0 and 1.0"));
        }
    }

    if config.top_k.is_some_and(|k| k < 1) {
        details.push(detail("generation_config.top_k", "top_k must be >= 1"));
    }

    if config.max_output_tokens.is_some_and(|m| m < 1) {
        details.push(detail(
            "generation_config.max_output_tokens",
            "max_output_tokens must be >= 1",
        ));
    }

    if config.candidate_count.is_some_and(|c| c < 1) {
        details.push(detail("generation_config.candidate_count", "candidate_count must be >= 1"));
    }
}

fn detail(field: &str, description: &str) -> ValidationDetail {
    ValidationDetail {
        field: field.to_string(),
        description: description.to_string(),
    }
}

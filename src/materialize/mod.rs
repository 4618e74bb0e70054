//! Turning generation responses into files, and reading prompt files back.
//!
//! Only the first candidate of a response is materialized. Its text parts
//! are concatenated, literal `\n` sequences become line feeds, and the
//! result replaces whatever was at the target path.

use std::fs;
use std::path::Path;

use crate::error::ArtifactError;
use crate::types::GenerateContentResponse;

/// Concatenated text of the first candidate.
///
/// # Errors
///
/// - `EmptyResponse` if there are no candidates.
/// - `EmptyContent` if the first candidate has no content or no parts.
/// - `NoTextFound` if none of its parts carries non-empty text.
pub fn extract_text(response: &GenerateContentResponse) -> Result<String, ArtifactError> {
    let candidate = response.candidates.first().ok_or(ArtifactError::EmptyResponse)?;

    let parts = match &candidate.content {
        Some(content) if !content.parts.is_empty() => &content.parts,
        _ => return Err(ArtifactError::EmptyContent),
    };

    let text: String = parts.iter().filter_map(|part| part.as_text()).collect();

    if text.is_empty() {
        Err(ArtifactError::NoTextFound)
    } else {
        Ok(text)
    }
}

/// Replaces each literal backslash-n pair with a line feed. No other
/// escape sequence is interpreted.
///
/// ```
/// use gemini_llm_utils::materialize::normalize;
///
/// assert_eq!(normalize(r"a\nb"), "a\nb");
/// assert_eq!(normalize(r"a\tb"), r"a\tb");
/// ```
pub fn normalize(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Writes `text` to `path`, creating or truncating the file.
///
/// The parent directory must already exist.
pub fn write_artifact(text: &str, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
    let path = path.as_ref();
    fs::write(path, text).map_err(|e| ArtifactError::write_failure(path, &e))
}

/// Extracts, normalizes and writes the response text, then reads the file
/// back and returns what is on disk.
///
/// Calling this twice with the same response and path returns the same
/// string both times.
pub fn round_trip(
    response: &GenerateContentResponse,
    path: impl AsRef<Path>,
) -> Result<String, ArtifactError> {
    let path = path.as_ref();
    let text = normalize(&extract_text(response)?);

    write_artifact(&text, path)?;
    read_back(path)
}

fn read_back(path: &Path) -> Result<String, ArtifactError> {
    fs::read_to_string(path).map_err(|e| ArtifactError::read_back_failure(path, &e))
}

/// Reads a whole UTF-8 file.
pub fn read_text_from_file(path: impl AsRef<Path>) -> Result<String, ArtifactError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| ArtifactError::read_failure(path, &e))
}

/// Reads a prompt file, dropping leading blank lines and a Markdown header
/// line if the first non-blank line is one.
pub fn read_prompt_from_file(path: impl AsRef<Path>) -> Result<String, ArtifactError> {
    read_text_from_file(path).map(|text| strip_prompt_header(&text))
}

/// The prompt text of a file's contents; see [`read_prompt_from_file`].
///
/// ```
/// use gemini_llm_utils::materialize::strip_prompt_header;
///
/// assert_eq!(strip_prompt_header("\n\n# Task\nSummarize this.\n"), "Summarize this.");
/// assert_eq!(strip_prompt_header("No header here.\n"), "No header here.");
/// ```
pub fn strip_prompt_header(text: &str) -> String {
    let mut lines = text
        .split_inclusive('\n')
        .skip_while(|line| line.trim().is_empty())
        .peekable();

    if lines.peek().is_some_and(|line| line.trim().starts_with('#')) {
        lines.next();
    }

    lines.collect::<String>().trim().to_string()
}

/// Text of every text part of every candidate, in order.
pub fn response_texts(response: &GenerateContentResponse) -> Vec<&str> {
    response
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.as_text())
        .collect()
}

//! Structured logging for the Gemini client.
//!
//! Services log through the [`Logger`] trait so tests can swap in a silent
//! logger. Field values whose key looks like a credential are redacted
//! before they reach any subscriber.

use serde_json::Value;

use crate::config::LogLevel;

const REDACTED: &str = "***REDACTED***";

const SENSITIVE_KEYS: [&str; 11] = [
    "api_key",
    "apiKey",
    "key",
    "token",
    "access_token",
    "accessToken",
    "secret",
    "password",
    "credential",
    "authorization",
    "x-goog-api-key",
];

/// Logger trait for structured logging.
pub trait Logger: Send + Sync {
    /// Log a debug message with structured context.
    fn debug(&self, message: &str, fields: Value);

    /// Log an info message with structured context.
    fn info(&self, message: &str, fields: Value);

    /// Log a warning message with structured context.
    fn warn(&self, message: &str, fields: Value);

    /// Log an error message with structured context.
    fn error(&self, message: &str, fields: Value);
}

/// Logger that forwards to `tracing`, tagging each event with its name.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    name: String,
    level: LogLevel,
}

impl StructuredLogger {
    /// Creates a logger tagged with `name`, e.g. `gemini.content`.
    ///
    /// ```
    /// use gemini_llm_utils::observability::{Logger, StructuredLogger};
    /// use serde_json::json;
    ///
    /// let logger = StructuredLogger::new("gemini.models");
    /// logger.info("listing models", json!({"page_size": 50}));
    /// ```
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: LogLevel::Info,
        }
    }

    /// Set the minimum log level for this logger.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level.verbosity() <= self.level.verbosity()
    }
}

/// Replaces credential-looking values, recursing into nested objects and arrays.
pub fn redact_sensitive_fields(mut fields: Value) -> Value {
    redact_in_place(&mut fields);
    fields
}

fn redact_in_place(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            for (key, field) in obj.iter_mut() {
                if SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key)) {
                    *field = Value::String(REDACTED.to_string());
                } else {
                    redact_in_place(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_in_place),
        _ => {}
    }
}

impl Logger for StructuredLogger {
    fn debug(&self, message: &str, fields: Value) {
        if self.enabled(LogLevel::Debug) {
            let fields = redact_sensitive_fields(fields);
            tracing::debug!(logger = %self.name, fields = %fields, "{message}");
        }
    }

    fn info(&self, message: &str, fields: Value) {
        if self.enabled(LogLevel::Info) {
            let fields = redact_sensitive_fields(fields);
            tracing::info!(logger = %self.name, fields = %fields, "{message}");
        }
    }

    fn warn(&self, message: &str, fields: Value) {
        if self.enabled(LogLevel::Warn) {
            let fields = redact_sensitive_fields(fields);
            tracing::warn!(logger = %self.name, fields = %fields, "{message}");
        }
    }

    fn error(&self, message: &str, fields: Value) {
        if self.enabled(LogLevel::Error) {
            let fields = redact_sensitive_fields(fields);
            tracing::error!(logger = %self.name, fields = %fields, "{message}");
        }
    }
}

/// Logger that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str, _fields: Value) {}
    fn info(&self, _message: &str, _fields: Value) {}
    fn warn(&self, _message: &str, _fields: Value) {}
    fn error(&self, _message: &str, _fields: Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_filtering() {
        let logger = StructuredLogger::new("test").with_level(LogLevel::Info);
        assert!(logger.enabled(LogLevel::Error));
        assert!(logger.enabled(LogLevel::Warn));
        assert!(logger.enabled(LogLevel::Info));
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(!logger.enabled(LogLevel::Trace));
    }

    #[test]
    fn test_redact_top_level() {
        let redacted = redact_sensitive_fields(json!({
            "api_key": "secret-key-123",
            "model": "models/gemini-2.0-flash",
        }));

        assert_eq!(redacted["api_key"], REDACTED);
        assert_eq!(redacted["model"], "models/gemini-2.0-flash");
    }

    #[test]
    fn test_redact_nested_and_arrays() {
        let redacted = redact_sensitive_fields(json!({
            "request": {"X-Goog-Api-Key": "k", "path": "/models"},
            "attempts": [{"token": "t"}, {"status": 200}],
        }));

        assert_eq!(redacted["request"]["X-Goog-Api-Key"], REDACTED);
        assert_eq!(redacted["request"]["path"], "/models");
        assert_eq!(redacted["attempts"][0]["token"], REDACTED);
        assert_eq!(redacted["attempts"][1]["status"], 200);
    }

    #[test]
    fn test_non_object_untouched() {
        assert_eq!(redact_sensitive_fields(json!("key")), json!("key"));
    }
}

//! Observability for the Gemini client.
//!
//! Events are emitted through `tracing`; installing a subscriber is left to
//! the binary. Library code never logs the API key.

pub mod logging;

pub use logging::{redact_sensitive_fields, Logger, NoopLogger, StructuredLogger};

//! Integration tests for content generation through the client and the
//! `ContentGenerator` adapter.

use gemini_llm_utils::error::{RequestError, ServerError};
use gemini_llm_utils::fixtures::load_fixture;
use gemini_llm_utils::mocks::MockHttpTransport;
use gemini_llm_utils::observability::Logger;
use gemini_llm_utils::transport::HttpMethod;
use gemini_llm_utils::types::{BlockReason, Content, FinishReason, GenerateContentRequest, Role};
use gemini_llm_utils::{
    ContentGenerator, GeminiClient, GeminiConfig, GeminiError, GenAiClient, GenAiContentGenerator,
    GenerateContentConfig,
};
use secrecy::SecretString;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Logger that keeps every record for inspection.
#[derive(Default)]
struct RecordingLogger {
    records: Mutex<Vec<(&'static str, String, Value)>>,
}

impl RecordingLogger {
    fn messages(&self, level: &str) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _, _)| *l == level)
            .map(|(_, m, _)| m.clone())
            .collect()
    }

    fn push(&self, level: &'static str, message: &str, fields: Value) {
        self.records.lock().unwrap().push((level, message.to_string(), fields));
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: &str, fields: Value) {
        self.push("debug", message, fields);
    }

    fn info(&self, message: &str, fields: Value) {
        self.push("info", message, fields);
    }

    fn warn(&self, message: &str, fields: Value) {
        self.push("warn", message, fields);
    }

    fn error(&self, message: &str, fields: Value) {
        self.push("error", message, fields);
    }
}

fn create_test_client(transport: Arc<MockHttpTransport>, logger: Arc<RecordingLogger>) -> GenAiClient {
    let config = GeminiConfig::builder()
        .api_key(SecretString::new("test-key".into()))
        .build()
        .unwrap();

    GenAiClient::builder(config)
        .transport(transport)
        .logger(logger)
        .build()
        .unwrap()
}

fn sent_body(transport: &MockHttpTransport) -> Value {
    let request = transport.last_request().unwrap();
    serde_json::from_slice(&request.body.unwrap()).unwrap()
}

#[tokio::test]
async fn test_generate_content_success() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, &load_fixture("content/success_response.json"));
    let logger = Arc::new(RecordingLogger::default());
    let client = create_test_client(transport.clone(), logger.clone());
    let request = GenerateContentRequest {
        contents: vec![Content::from_text("Hello, what model are you?", Role::User)],
        ..Default::default()
    };

    // Act
    let response = client.content().generate("models/gemini-2.0-flash", request).await.unwrap();

    // Assert
    assert_eq!(response.candidates.len(), 1);
    assert_eq!(response.candidates[0].finish_reason, Some(FinishReason::Stop));
    assert_eq!(response.model_version.as_deref(), Some("gemini-2.0-flash"));
    assert_eq!(response.usage_metadata.as_ref().map(|u| u.total_token_count), Some(18));

    transport.verify_request_count(1);
    transport.verify_request(0, HttpMethod::Post, "/v1beta/models/gemini-2.0-flash:generateContent");
    transport.verify_header(0, "Content-Type", "application/json");
    assert!(logger.messages("debug").contains(&"Content generation completed".to_string()));
}

#[tokio::test]
async fn test_generator_sends_sampling_options_and_system_instruction() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, &load_fixture("content/success_response.json"));
    let client: Arc<dyn GeminiClient> =
        Arc::new(create_test_client(transport.clone(), Arc::default()));
    let generator = GenAiContentGenerator::new(client);

    let config = GenerateContentConfig {
        temperature: Some(0.3),
        top_k: Some(20),
        top_p: Some(1.0),
        max_output_tokens: Some(8192),
        candidate_count: Some(1),
        seed: Some(5),
        response_mime_type: Some("text/plain".to_string()),
        stop_sequences: vec!["STOP!".to_string()],
        ..Default::default()
    }
    .with_system_text(["You are terse.", "Answer in English."]);

    // Act
    generator
        .generate(
            "models/gemini-2.0-flash",
            vec![Content::from_text("Hello, what model are you?", Role::User)],
            Some(config),
        )
        .await
        .unwrap();

    // Assert
    let body = sent_body(&transport);
    let generation = &body["generationConfig"];
    assert_eq!(generation["topK"], 20);
    assert_eq!(generation["maxOutputTokens"], 8192);
    assert_eq!(generation["candidateCount"], 1);
    assert_eq!(generation["seed"], 5);
    assert_eq!(generation["responseMimeType"], "text/plain");
    assert_eq!(generation["stopSequences"], serde_json::json!(["STOP!"]));

    let system_parts = body["systemInstruction"]["parts"].as_array().unwrap();
    assert_eq!(system_parts.len(), 2);
    assert_eq!(system_parts[1]["text"], "Answer in English.");
    assert_eq!(body["contents"][0]["role"], "user");
}

#[tokio::test]
async fn test_generator_without_config_sends_only_contents() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, &load_fixture("content/success_response.json"));
    let client: Arc<dyn GeminiClient> =
        Arc::new(create_test_client(transport.clone(), Arc::default()));
    let generator = GenAiContentGenerator::new(client);

    // Act
    generator
        .generate("gemini-2.0-flash", vec![Content::from_text("hi", Role::User)], None)
        .await
        .unwrap();

    // Assert
    let body = sent_body(&transport);
    assert!(body.get("generationConfig").is_none());
    assert!(body.get("systemInstruction").is_none());
    transport.verify_request(0, HttpMethod::Post, "/models/gemini-2.0-flash:generateContent");
}

#[tokio::test]
async fn test_blocked_prompt_is_returned_and_logged() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(200, &load_fixture("content/empty_candidates.json"));
    let logger = Arc::new(RecordingLogger::default());
    let client = create_test_client(transport, logger.clone());
    let request = GenerateContentRequest {
        contents: vec![Content::from_text("something unsafe", Role::User)],
        ..Default::default()
    };

    // Act
    let response = client.content().generate("gemini-2.0-flash", request).await.unwrap();

    // Assert
    assert!(response.candidates.is_empty());
    assert_eq!(
        response.prompt_feedback.and_then(|f| f.block_reason),
        Some(BlockReason::Safety)
    );
    assert_eq!(logger.messages("warn"), vec!["Prompt was blocked".to_string()]);
}

#[tokio::test]
async fn test_empty_contents_rejected_before_sending() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    let client = create_test_client(transport.clone(), Arc::default());

    // Act
    let result = client
        .content()
        .generate("gemini-2.0-flash", GenerateContentRequest::default())
        .await;

    // Assert
    assert!(matches!(
        result,
        Err(GeminiError::Request(RequestError::ValidationError { .. }))
    ));
    transport.verify_request_count(0);
}

#[tokio::test]
async fn test_out_of_range_temperature_rejected() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    let client: Arc<dyn GeminiClient> =
        Arc::new(create_test_client(transport.clone(), Arc::default()));
    let generator = GenAiContentGenerator::new(client);
    let config = GenerateContentConfig {
        temperature: Some(2.5),
        ..Default::default()
    };

    // Act
    let result = generator
        .generate("gemini-2.0-flash", vec![Content::from_text("hi", Role::User)], Some(config))
        .await;

    // Assert
    match result {
        Err(GeminiError::Request(RequestError::ValidationError { details, .. })) => {
            assert!(details.iter().any(|d| d.field.contains("temperature")));
        }
        other => panic!("Expected ValidationError, got {other:?}"),
    }
    transport.verify_request_count(0);
}

#[tokio::test]
async fn test_server_error_is_passed_through() {
    // Arrange
    let transport = Arc::new(MockHttpTransport::new());
    transport.enqueue_json_response(
        500,
        r#"{"error":{"code":500,"message":"Internal error encountered.","status":"INTERNAL"}}"#,
    );
    let logger = Arc::new(RecordingLogger::default());
    let client = create_test_client(transport.clone(), logger);
    let request = GenerateContentRequest {
        contents: vec![Content::from_text("hi", Role::User)],
        ..Default::default()
    };

    // Act
    let result = client.content().generate("gemini-2.0-flash", request).await;

    // Assert
    match result {
        Err(GeminiError::Server(ServerError::InternalError { message })) => {
            assert_eq!(message, "Internal error encountered.");
        }
        other => panic!("Expected InternalError, got {other:?}"),
    }
    transport.verify_request_count(1);
}

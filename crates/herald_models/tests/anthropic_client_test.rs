//! HTTP contract tests for the Anthropic client.

use herald_core::GenerateRequest;
use herald_error::FailureKind;
use herald_interface::TextGenerator;
use herald_models::AnthropicClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "claude-sonnet-4-20250514";

fn request() -> GenerateRequest {
    GenerateRequest::builder()
        .system("You are the Bioscope social media writer.")
        .prompt("Post Type: gene\nContent Data:\n{\"gene\": \"COMT\"}")
        .max_tokens(1500u32)
        .build()
        .unwrap()
}

fn text_response(text: &str) -> serde_json::Value {
    json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "model": MODEL,
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 42, "output_tokens": 7}
    })
}

#[tokio::test]
async fn test_request_carries_system_prompt_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "model": MODEL,
            "max_tokens": 1500,
            "system": "You are the Bioscope social media writer.",
            "messages": [{"role": "user"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("🧬 Meet COMT")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AnthropicClient::new("test-key", MODEL).with_base_url(mock_server.uri());
    let response = client.generate(&request()).await.unwrap();

    assert_eq!(response.text(), "🧬 Meet COMT");
    assert_eq!(client.provider_name(), "anthropic");
    assert_eq!(client.model_name(), MODEL);
}

#[tokio::test]
async fn test_non_success_status_is_generation_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(529).set_body_string(r#"{"type":"error","error":{"type":"overloaded_error"}}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AnthropicClient::new("test-key", MODEL).with_base_url(mock_server.uri());
    let err = client.generate(&request()).await.unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::GenerationFailed));
    assert!(err.to_string().contains("529"));
}

#[tokio::test]
async fn test_malformed_body_is_generation_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = AnthropicClient::new("test-key", MODEL).with_base_url(mock_server.uri());
    let err = client.generate(&request()).await.unwrap_err();

    assert_eq!(err.failure_kind(), Some(FailureKind::GenerationFailed));
}

#[tokio::test]
async fn test_response_without_text_blocks_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_empty",
            "content": [],
            "stop_reason": "end_turn"
        })))
        .mount(&mock_server)
        .await;

    let client = AnthropicClient::new("test-key", MODEL).with_base_url(mock_server.uri());
    let response = client.generate(&request()).await.unwrap();

    assert!(response.text().is_empty());
}

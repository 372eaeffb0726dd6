//! Integration tests for OpenAIProvider (OpenAI and Groq) using wiremock

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gitnexus_llm::domain::{CompletionRequest, LlmError, LlmProvider, StopReason};
use gitnexus_llm::infrastructure::providers::OpenAIProvider;

fn create_groq_provider(mock_server: &MockServer) -> OpenAIProvider {
    OpenAIProvider::groq("gsk_test", "llama-3.3-70b-versatile")
        .with_base_url(mock_server.uri())
        .with_timeout(10)
}

fn create_analysis_request() -> CompletionRequest {
    CompletionRequest::new()
        .with_system("Respond with JSON only.")
        .with_user("Analyze octocat/Hello-World")
        .with_max_tokens(8000)
        .with_temperature(0.3)
        .with_json_response()
}

fn chat_body(content: &str, finish_reason: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1_717_000_000u64,
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": finish_reason
        }],
        "usage": { "prompt_tokens": 900, "completion_tokens": 400, "total_tokens": 1300 }
    })
}

#[tokio::test]
async fn test_groq_complete_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("{\"summary\":\"ok\"}", "stop")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_groq_provider(&mock_server);
    let response = provider.complete(create_analysis_request()).await.unwrap();

    assert_eq!(provider.info().name, "Groq");
    assert_eq!(response.id, "chatcmpl-123");
    assert_eq!(response.content, "{\"summary\":\"ok\"}");
    assert_eq!(response.stop_reason, StopReason::EndTurn);
    assert_eq!(response.usage.completion_tokens, 400);
    assert_eq!(response.created, Some(1_717_000_000));
}

#[tokio::test]
async fn test_request_uses_json_mode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama-3.3-70b-versatile",
            "temperature": 0.3,
            "max_tokens": 8000,
            "response_format": { "type": "json_object" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("{}", "stop")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = create_groq_provider(&mock_server)
        .complete(create_analysis_request())
        .await;
    assert!(result.is_ok(), "unexpected error: {:?}", result.err());
}

#[tokio::test]
async fn test_openai_organization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("OpenAI-Organization", "org-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("{}", "stop")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = OpenAIProvider::new("sk-test", "gpt-4o-mini")
        .with_base_url(mock_server.uri())
        .with_organization("org-42");

    assert!(provider.complete(create_analysis_request()).await.is_ok());
}

#[tokio::test]
async fn test_length_finish_is_truncated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("{\"sum", "length")))
        .mount(&mock_server)
        .await;

    let response = create_groq_provider(&mock_server)
        .complete(create_analysis_request())
        .await
        .unwrap();
    assert!(response.is_truncated());
}

#[tokio::test]
async fn test_rate_limited_reads_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("retry-after", "12")
                .set_body_json(serde_json::json!({
                    "error": { "message": "Rate limit reached for model", "type": "tokens" }
                })),
        )
        .mount(&mock_server)
        .await;

    let err = create_groq_provider(&mock_server)
        .complete(create_analysis_request())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LlmError::RateLimited {
            retry_after: Some(12),
            message: "Rate limit reached for model".to_string(),
        }
    );
}

#[tokio::test]
async fn test_invalid_api_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "Invalid API Key", "type": "invalid_request_error" }
        })))
        .mount(&mock_server)
        .await;

    let err = create_groq_provider(&mock_server)
        .complete(create_analysis_request())
        .await
        .unwrap_err();

    assert_eq!(err, LlmError::Authentication("Invalid API Key".to_string()));
}

#[tokio::test]
async fn test_unknown_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": { "message": "The model `nope` does not exist" }
        })))
        .mount(&mock_server)
        .await;

    let err = create_groq_provider(&mock_server)
        .complete(create_analysis_request().with_model("nope"))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::ModelNotFound(msg) if msg.contains("nope")));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let err = create_groq_provider(&mock_server)
        .complete(create_analysis_request())
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let provider = OpenAIProvider::new("sk-test", "gpt-4o-mini")
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(5);

    let err = provider
        .complete(create_analysis_request())
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Network(_)));
}

#[tokio::test]
async fn test_empty_choices_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chatcmpl-empty",
            "object": "chat.completion",
            "created": 1_717_000_000u64,
            "model": "llama-3.3-70b-versatile",
            "choices": []
        })))
        .mount(&mock_server)
        .await;

    let err = create_groq_provider(&mock_server)
        .complete(create_analysis_request())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LlmError::InvalidResponse("No choices in response".to_string())
    );
}

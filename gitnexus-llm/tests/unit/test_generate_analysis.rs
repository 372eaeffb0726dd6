//! Unit tests for GenerateAnalysisUseCase

use rstest::rstest;
use std::sync::Arc;

use gitnexus_llm::application::use_cases::GenerateAnalysisUseCase;
use gitnexus_llm::domain::{LlmError, ProviderCapabilities, ResponseFormat, Role};
use gitnexus_llm::infrastructure::prompts::{ContextCompiler, SYSTEM_PROMPT};
use gitnexus_llm::parse_analysis;

#[allow(dead_code)]
mod common {
    include!("../common/mod.rs");
}

use common::{
    MockLlmProvider, SAMPLE_TREE, create_test_config, sample_files, sample_metadata, sample_stats,
};

fn compiled_prompt() -> gitnexus_llm::prompts::CompiledPrompt {
    ContextCompiler::default().compile(&sample_metadata(), &sample_stats(), SAMPLE_TREE, &sample_files())
}

#[tokio::test]
async fn test_execute_sends_one_json_request() {
    let mock = MockLlmProvider::with_text("{\"summary\":\"fine\"}");
    let captured = mock.captured_requests.clone();
    let use_case = GenerateAnalysisUseCase::new(Arc::new(mock), create_test_config());

    let prompt = compiled_prompt();
    let text = use_case.execute(&prompt).await.unwrap();
    assert_eq!(text, "{\"summary\":\"fine\"}");

    let requests = captured.lock().await;
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, Role::System);
    assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
    assert_eq!(request.messages[1].role, Role::User);
    assert_eq!(request.messages[1].content, prompt.as_str());
    assert_eq!(request.temperature, Some(0.3));
    assert_eq!(request.max_tokens, Some(8000));
    assert_eq!(request.response_format, ResponseFormat::Json);
    assert_eq!(request.model.as_deref(), Some("test-model"));
}

#[tokio::test]
async fn test_provider_default_model_when_unset() {
    let mock = MockLlmProvider::with_text("{}");
    let captured = mock.captured_requests.clone();
    let mut config = create_test_config();
    config.default_model = None;

    GenerateAnalysisUseCase::new(Arc::new(mock), config)
        .execute(&compiled_prompt())
        .await
        .unwrap();

    assert_eq!(captured.lock().await[0].model, None);
}

#[test]
fn test_json_hint_only_for_capable_providers() {
    let text_only = MockLlmProvider::new().with_capabilities(ProviderCapabilities {
        json_mode: false,
        max_output_tokens: 0,
    });
    let use_case = GenerateAnalysisUseCase::new(Arc::new(text_only), create_test_config());

    let request = use_case.build_request(&compiled_prompt());
    assert_eq!(request.response_format, ResponseFormat::Text);
    assert_eq!(request.max_tokens, Some(8000));
}

#[test]
fn test_output_ceiling_capped_by_provider() {
    let small = MockLlmProvider::new().with_capabilities(ProviderCapabilities::json(4096));
    let use_case = GenerateAnalysisUseCase::new(Arc::new(small), create_test_config());

    let request = use_case.build_request(&compiled_prompt());
    assert_eq!(request.max_tokens, Some(4096));
    assert_eq!(request.response_format, ResponseFormat::Json);
}

#[rstest]
#[case(LlmError::rate_limited("slow down", Some(30)))]
#[case(LlmError::Authentication("bad key".to_string()))]
#[case(LlmError::Timeout { seconds: 120 })]
#[case(LlmError::Configuration("GROQ_API_KEY is not set".to_string()))]
#[tokio::test]
async fn test_provider_errors_propagate(#[case] error: LlmError) {
    let mock = MockLlmProvider::new().with_error(error.clone());
    let use_case = GenerateAnalysisUseCase::new(Arc::new(mock), create_test_config());

    let result = use_case.execute(&compiled_prompt()).await;
    assert_eq!(result.unwrap_err(), error);
}

#[tokio::test]
async fn test_fenced_output_parses() {
    let body = "```json\n{\"summary\":\"A tidy service.\",\"projectType\":\"api\",\"scores\":{\"overall\":81}}\n```";
    let use_case =
        GenerateAnalysisUseCase::new(Arc::new(MockLlmProvider::with_text(body)), create_test_config());

    let text = use_case.execute(&compiled_prompt()).await.unwrap();
    let result = parse_analysis(&text).unwrap();

    assert_eq!(result.summary, "A tidy service.");
    assert_eq!(result.scores.overall, 81.0);
    assert!(!result.demo);
}

#[test]
fn test_provider_name() {
    let use_case = GenerateAnalysisUseCase::new(Arc::new(MockLlmProvider::new()), create_test_config());
    assert_eq!(use_case.provider_name(), "Mock Provider");
}

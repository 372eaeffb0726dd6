// Common test utilities and mock implementations

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use gitnexus_core::domain::{FileStats, ImportantFiles, RepoMetadata};
use gitnexus_llm::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderCapabilities,
    ProviderInfo, StopReason, Usage,
};

/// Mock LLM provider recording every request it receives
pub struct MockLlmProvider {
    pub response: Option<CompletionResponse>,
    pub error: Option<LlmError>,
    pub captured_requests: Arc<Mutex<Vec<CompletionRequest>>>,
    pub capabilities: ProviderCapabilities,
}

impl MockLlmProvider {
    pub fn new() -> Self {
        Self {
            response: None,
            error: None,
            captured_requests: Arc::new(Mutex::new(Vec::new())),
            capabilities: ProviderCapabilities::json(8192),
        }
    }

    pub fn with_capabilities(mut self, capabilities: ProviderCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_response(mut self, response: CompletionResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_error(mut self, error: LlmError) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_text(content: &str) -> Self {
        Self::new().with_response(create_completion_response(content))
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "mock",
            name: "Mock Provider",
            version: "test",
            capabilities: self.capabilities.clone(),
        }
    }

    fn default_model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.captured_requests.lock().await.push(request);

        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        self.response
            .clone()
            .ok_or_else(|| LlmError::Other("No response configured".to_string()))
    }
}

pub fn create_completion_response(content: &str) -> CompletionResponse {
    CompletionResponse {
        id: "test-response-id".to_string(),
        model: "test-model".to_string(),
        content: content.to_string(),
        stop_reason: StopReason::EndTurn,
        usage: Usage {
            prompt_tokens: 100,
            completion_tokens: 50,
            total_tokens: 150,
        },
        created: Some(1234567890),
    }
}

pub fn create_test_config() -> gitnexus_core::config::LlmConfig {
    use gitnexus_core::config::LlmConfig;

    LlmConfig {
        provider: "groq".to_string(),
        default_model: Some("test-model".to_string()),
        temperature: 0.3,
        max_tokens: 8000,
        timeout_seconds: 30,
        ..Default::default()
    }
}

pub fn sample_metadata() -> RepoMetadata {
    RepoMetadata {
        full_name: "octocat/Hello-World".to_string(),
        description: Some("My first repository on GitHub!".to_string()),
        language: Some("TypeScript".to_string()),
        stars: 2_345_678,
        forks: 1_234,
        open_issues: 42,
        size_kb: 5_120,
        license: Some("MIT License".to_string()),
        default_branch: "main".to_string(),
        created_at: "2011-01-26T19:01:12Z".parse().unwrap(),
        updated_at: "2024-06-01T12:00:00Z".parse().unwrap(),
    }
}

pub fn sample_stats() -> FileStats {
    let mut stats = FileStats {
        total_files: 120,
        total_directories: 18,
        ..Default::default()
    };
    for (lang, count) in [("TypeScript", 80), ("JSON", 20), ("Markdown", 12), ("CSS", 8)] {
        stats.languages.insert(lang.to_string(), count);
    }
    stats
}

pub const SAMPLE_TREE: &str = "src/\nsrc/app.ts\nsrc/app.test.ts\n.github/workflows/ci.yml\ntsconfig.json";

pub fn sample_files() -> ImportantFiles {
    [
        (
            "package.json",
            r#"{"name":"hello","dependencies":{"express":"^4.18.2"},"devDependencies":{"vitest":"^1.0.0"},"scripts":{"test":"vitest"}}"#,
        ),
        ("README.md", "# Hello World\n\nA sample project."),
    ]
    .into_iter()
    .collect()
}

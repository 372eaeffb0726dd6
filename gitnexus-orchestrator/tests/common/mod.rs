// Shared mocks and fixtures for orchestrator tests

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use gitnexus_core::config::{AnalysisConfig, LlmConfig, ServerConfig};
use gitnexus_core::domain::{
    FileTreeNode, ImportantFiles, RepoMetadata, RepoRef, RepositorySource, RetrievalError,
};
use gitnexus_core::infrastructure::current_request_github_token;
use gitnexus_llm::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderCapabilities,
    ProviderInfo, StopReason, Usage,
};
use gitnexus_llm::GenerateAnalysisUseCase;
use gitnexus_orchestrator::{AnalysisPipeline, OrchestratorState, create_router};

pub const VALID_ANALYSIS_JSON: &str = r#"{
  "summary": "A small greeting service with clear structure.",
  "projectType": "api",
  "maturity": "beta",
  "techStack": ["TypeScript", "Express"],
  "scores": {
    "overall": 78, "codeQuality": 80, "security": 70, "maintainability": 79,
    "documentation": 65, "testing": 72, "performance": 81, "developerExperience": 77
  },
  "insights": [
    {"type": "strength", "title": "Typed codebase", "description": "tsconfig.json enables strict mode.", "priority": "medium"},
    {"type": "weakness", "title": "Thin docs", "description": "README lacks setup steps.", "priority": "low"},
    {"type": "security", "title": "Pin dependencies", "description": "Caret ranges in package.json.", "priority": "high"}
  ],
  "architecture": [{"name": "HTTP server", "type": "backend", "description": "Express app in src/app.ts"}],
  "quickWins": ["Add a setup section to README.md"]
}"#;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn sample_metadata() -> RepoMetadata {
    RepoMetadata {
        full_name: "octocat/Hello-World".to_string(),
        description: Some("My first repository on GitHub!".to_string()),
        language: Some("TypeScript".to_string()),
        stars: 1_500,
        forks: 42,
        open_issues: 3,
        size_kb: 2_048,
        license: Some("MIT License".to_string()),
        default_branch: "main".to_string(),
        created_at: "2011-01-26T19:01:12Z".parse().unwrap(),
        updated_at: "2024-06-01T12:00:00Z".parse().unwrap(),
    }
}

pub fn sample_tree() -> Vec<FileTreeNode> {
    vec![
        FileTreeNode::directory(
            "src",
            vec![
                FileTreeNode::file("src/app.ts", 1_200),
                FileTreeNode::file("src/app.test.ts", 800),
            ],
        ),
        FileTreeNode::file("README.md", 300),
        FileTreeNode::file("package.json", 200),
    ]
}

pub fn sample_files() -> ImportantFiles {
    [
        (
            "package.json",
            r#"{"name":"hello","dependencies":{"express":"^4.18.2"}}"#,
        ),
        ("README.md", "# Hello World"),
    ]
    .into_iter()
    .collect()
}

// ---------------------------------------------------------------------------
// Repository source
// ---------------------------------------------------------------------------

/// In-memory repository source with per-call counters
pub struct MockRepositorySource {
    pub metadata: Result<RepoMetadata, RetrievalError>,
    pub tree: Result<Vec<FileTreeNode>, RetrievalError>,
    pub files: Result<ImportantFiles, RetrievalError>,
    pub listing: Result<Vec<FileTreeNode>, RetrievalError>,
    pub file: Result<String, RetrievalError>,
    pub calls: AtomicUsize,
    /// Token visible to each `fetch_metadata` call
    pub seen_tokens: Mutex<Vec<Option<String>>>,
    pub requested_paths: Mutex<Vec<String>>,
}

impl MockRepositorySource {
    pub fn healthy() -> Self {
        Self {
            metadata: Ok(sample_metadata()),
            tree: Ok(sample_tree()),
            files: Ok(sample_files()),
            listing: Ok(sample_tree()),
            file: Ok("fn main() {}\n".to_string()),
            calls: AtomicUsize::new(0),
            seen_tokens: Mutex::new(Vec::new()),
            requested_paths: Mutex::new(Vec::new()),
        }
    }

    pub fn with_metadata_error(mut self, error: RetrievalError) -> Self {
        self.metadata = Err(error);
        self
    }

    pub fn with_tree_error(mut self, error: RetrievalError) -> Self {
        self.tree = Err(error);
        self
    }

    pub fn with_listing_error(mut self, error: RetrievalError) -> Self {
        self.listing = Err(error);
        self
    }

    pub fn with_file_error(mut self, error: RetrievalError) -> Self {
        self.file = Err(error);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RepositorySource for MockRepositorySource {
    async fn fetch_metadata(&self, _repo: &RepoRef) -> Result<RepoMetadata, RetrievalError> {
        self.hit();
        self.seen_tokens
            .lock()
            .unwrap()
            .push(current_request_github_token());
        self.metadata.clone()
    }

    async fn fetch_tree(&self, _repo: &RepoRef) -> Result<Vec<FileTreeNode>, RetrievalError> {
        self.hit();
        self.tree.clone()
    }

    async fn fetch_important_files(
        &self,
        _repo: &RepoRef,
    ) -> Result<ImportantFiles, RetrievalError> {
        self.hit();
        self.files.clone()
    }

    async fn list_contents(
        &self,
        _repo: &RepoRef,
        path: &str,
    ) -> Result<Vec<FileTreeNode>, RetrievalError> {
        self.hit();
        self.requested_paths.lock().unwrap().push(path.to_string());
        self.listing.clone()
    }

    async fn fetch_file(&self, _repo: &RepoRef, path: &str) -> Result<String, RetrievalError> {
        self.hit();
        self.requested_paths.lock().unwrap().push(path.to_string());
        self.file.clone()
    }
}

// ---------------------------------------------------------------------------
// LLM provider
// ---------------------------------------------------------------------------

/// Provider returning a fixed text or error and counting its calls
pub struct MockLlmProvider {
    pub result: Result<String, LlmError>,
    pub calls: AtomicUsize,
}

impl MockLlmProvider {
    pub fn with_text(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn valid() -> Self {
        Self::with_text(VALID_ANALYSIS_JSON)
    }

    pub fn with_error(error: LlmError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: "mock",
            name: "Mock",
            version: "test",
            capabilities: ProviderCapabilities::json(8192),
        }
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let content = self.result.clone()?;
        Ok(CompletionResponse {
            id: "mock-1".to_string(),
            model: "mock-model".to_string(),
            content,
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
            created: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

pub fn build_pipeline(
    source: Arc<MockRepositorySource>,
    provider: Arc<MockLlmProvider>,
) -> Arc<AnalysisPipeline> {
    let generator = GenerateAnalysisUseCase::new(provider, LlmConfig::default());
    Arc::new(AnalysisPipeline::new(
        source,
        Arc::new(generator),
        &AnalysisConfig::default(),
    ))
}

pub fn build_state(
    source: Arc<MockRepositorySource>,
    provider: Arc<MockLlmProvider>,
) -> OrchestratorState {
    OrchestratorState {
        pipeline: build_pipeline(source.clone(), provider),
        source,
        demo_mode: false,
    }
}

pub fn test_server(state: OrchestratorState) -> TestServer {
    let config = ServerConfig {
        enable_docs: false,
        ..Default::default()
    };
    TestServer::new(create_router(state, &config)).unwrap()
}

/// JSON payloads of the `data:` frames of an SSE body
pub fn sse_events(body: &str) -> Vec<serde_json::Value> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| serde_json::from_str(data.trim()).unwrap())
        .collect()
}

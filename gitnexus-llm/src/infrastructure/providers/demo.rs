//! Demo-mode and unconfigured provider wrappers
//!
//! [`DemoFallbackProvider`] replaces a failed generation with a canned report
//! that is labelled as such (`"demo": true`, summary prefixed `[DEMO]`). It is
//! only ever installed when `llm.demo_mode` is switched on.
//!
//! [`UnconfiguredProvider`] stands in for a provider whose API key is missing
//! so that startup succeeds and every call fails with a configuration error.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::domain::{
    CompletionRequest, CompletionResponse, LlmError, LlmProvider, ProviderCapabilities,
    ProviderInfo, StopReason, Usage,
};

pub const DEMO_SUMMARY_PREFIX: &str = "[DEMO]";

/// Canned report returned in demo mode
pub const DEMO_ANALYSIS_JSON: &str = r#"{
  "summary": "[DEMO] This is a sample report generated without contacting a language model. It illustrates the report layout only and says nothing about the requested repository.",
  "projectType": "library",
  "maturity": "beta",
  "techStack": ["Rust", "Tokio", "Axum"],
  "scores": {
    "overall": 72,
    "codeQuality": 75,
    "security": 70,
    "maintainability": 74,
    "documentation": 65,
    "testing": 68,
    "performance": 78,
    "developerExperience": 71
  },
  "insights": [
    {
      "type": "strength",
      "title": "Clear module boundaries",
      "description": "Sample insight: code is grouped by responsibility with narrow public interfaces.",
      "priority": "medium"
    },
    {
      "type": "weakness",
      "title": "Sparse integration tests",
      "description": "Sample insight: end-to-end paths are not exercised by automated tests.",
      "priority": "high"
    },
    {
      "type": "suggestion",
      "title": "Add continuous integration",
      "description": "Sample insight: run formatting, lint and tests on every pull request.",
      "priority": "medium"
    },
    {
      "type": "security",
      "title": "Review secret handling",
      "description": "Sample insight: make sure credentials are read from the environment and never committed.",
      "priority": "high"
    }
  ],
  "architecture": [
    {
      "name": "HTTP API",
      "type": "backend",
      "description": "Sample component: request handling and routing."
    },
    {
      "name": "Core library",
      "type": "service",
      "description": "Sample component: domain logic shared by the entry points."
    }
  ],
  "dependencies": {
    "status": "healthy",
    "outdated": 0,
    "vulnerabilities": 0,
    "heaviest": [],
    "suggestions": []
  },
  "quickWins": ["Add a CONTRIBUTING guide", "Enable dependency update automation"],
  "longTermImprovements": ["Introduce performance benchmarks"],
  "demo": true
}"#;

/// Wraps a provider and substitutes [`DEMO_ANALYSIS_JSON`] for any failure.
pub struct DemoFallbackProvider {
    inner: Arc<dyn LlmProvider>,
}

impl DemoFallbackProvider {
    pub fn new(inner: Arc<dyn LlmProvider>) -> Self {
        Self { inner }
    }

    fn canned_response(&self, model: String) -> CompletionResponse {
        CompletionResponse {
            id: "demo".to_string(),
            model,
            content: DEMO_ANALYSIS_JSON.to_string(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
            created: None,
        }
    }
}

#[async_trait]
impl LlmProvider for DemoFallbackProvider {
    fn info(&self) -> ProviderInfo {
        self.inner.info()
    }

    fn default_model(&self) -> &str {
        self.inner.default_model()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.inner.default_model().to_string());

        match self.inner.complete(request).await {
            Ok(response) => Ok(response),
            Err(e) => {
                warn!(
                    provider = self.inner.info().id,
                    error = %e,
                    "Generation failed; returning demo analysis"
                );
                Ok(self.canned_response(model))
            }
        }
    }
}

/// Provider whose API key was never configured
pub struct UnconfiguredProvider {
    id: &'static str,
    name: &'static str,
    model: String,
    hint: String,
}

impl UnconfiguredProvider {
    pub fn new(
        id: &'static str,
        name: &'static str,
        model: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name,
            model: model.into(),
            hint: hint.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for UnconfiguredProvider {
    fn info(&self) -> ProviderInfo {
        ProviderInfo {
            id: self.id,
            name: self.name,
            version: "unconfigured",
            capabilities: ProviderCapabilities::default(),
        }
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        Err(LlmError::Configuration(self.hint.clone()))
    }
}

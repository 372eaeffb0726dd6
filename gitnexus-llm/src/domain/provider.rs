//! LLM Provider trait and related types

use async_trait::async_trait;

use crate::domain::error::LlmError;
use crate::domain::messages::{CompletionRequest, CompletionResponse};

/// Provider capability flags
#[derive(Debug, Clone, Default)]
pub struct ProviderCapabilities {
    /// Honours [`ResponseFormat::Json`](crate::domain::ResponseFormat::Json)
    pub json_mode: bool,
    /// Largest completion the upstream accepts; 0 when unknown
    pub max_output_tokens: u32,
}

impl ProviderCapabilities {
    pub fn json(max_output: u32) -> Self {
        Self {
            json_mode: true,
            max_output_tokens: max_output,
        }
    }

    /// `requested` capped at the provider ceiling, when one is known
    pub fn clamp_output(&self, requested: u32) -> u32 {
        match self.max_output_tokens {
            0 => requested,
            ceiling => requested.min(ceiling),
        }
    }
}

/// Metadata about a provider
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    /// Identifier such as "groq" or "google_ai"
    pub id: &'static str,
    /// Human-readable name, shown in progress events
    pub name: &'static str,
    pub version: &'static str,
    pub capabilities: ProviderCapabilities,
}

/// Core trait for LLM providers
///
/// One call in, one text blob out. Implementations are stateless apart from
/// their HTTP client and never retry.
///
/// ```rust,ignore
/// use gitnexus_llm::{CompletionRequest, LlmProvider};
///
/// async fn ask(provider: &dyn LlmProvider) -> Result<String, LlmError> {
///     let request = CompletionRequest::new().with_user("Summarize this repository");
///     Ok(provider.complete(request).await?.content)
/// }
/// ```
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn info(&self) -> ProviderInfo;

    /// Model used when the request does not name one
    fn default_model(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

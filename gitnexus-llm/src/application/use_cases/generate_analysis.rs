use std::sync::Arc;
use tracing::{debug, warn};

use gitnexus_core::config::LlmConfig;

use crate::domain::{CompletionRequest, LlmError, LlmProvider};
use crate::infrastructure::prompts::{CompiledPrompt, SYSTEM_PROMPT};

/// Sends one compiled prompt to the configured provider.
///
/// Exactly one upstream call per execution, with low temperature and the
/// configured output ceiling (capped by the provider's own). The JSON
/// response hint is only sent to providers that honour it.
pub struct GenerateAnalysisUseCase {
    provider: Arc<dyn LlmProvider>,
    config: LlmConfig,
}

impl GenerateAnalysisUseCase {
    pub fn new(provider: Arc<dyn LlmProvider>, config: LlmConfig) -> Self {
        Self { provider, config }
    }

    /// Human-readable provider name, e.g. "Groq"
    pub fn provider_name(&self) -> &'static str {
        self.provider.info().name
    }

    pub fn build_request(&self, prompt: &CompiledPrompt) -> CompletionRequest {
        let capabilities = self.provider.info().capabilities;
        let mut request = CompletionRequest::new()
            .with_system(SYSTEM_PROMPT)
            .with_user(prompt.as_str())
            .with_temperature(self.config.temperature)
            .with_max_tokens(capabilities.clamp_output(self.config.max_tokens));
        if capabilities.json_mode {
            request = request.with_json_response();
        }
        if let Some(ref model) = self.config.default_model {
            request = request.with_model(model);
        }
        request
    }

    /// Raw response text
    pub async fn execute(&self, prompt: &CompiledPrompt) -> Result<String, LlmError> {
        let request = self.build_request(prompt);
        let provider = self.provider.info().id;

        debug!(provider, prompt_chars = prompt.char_len(), "Requesting analysis");
        let response = self.provider.complete(request).await?;

        if response.is_truncated() {
            warn!(
                provider,
                max_tokens = self.config.max_tokens,
                "Analysis hit the output token ceiling; JSON may be incomplete"
            );
        }
        debug!(
            provider,
            model = %response.model,
            completion_tokens = response.usage.completion_tokens,
            "Analysis generated"
        );

        Ok(response.content)
    }
}

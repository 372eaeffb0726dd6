//! Provider selection from configuration

use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use gitnexus_core::config::LlmConfig;

use crate::domain::{LlmError, LlmProvider};
use crate::infrastructure::providers::{
    DemoFallbackProvider, GoogleAIProvider, OpenAIProvider, UnconfiguredProvider,
};

/// Provider type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    GoogleAI,
    Groq,
    OpenAI,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoogleAI => "google_ai",
            Self::Groq => "groq",
            Self::OpenAI => "openai",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GoogleAI => "Gemini",
            Self::Groq => "Groq",
            Self::OpenAI => "OpenAI",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::GoogleAI => "gemini-2.0-flash",
            Self::Groq => "llama-3.3-70b-versatile",
            Self::OpenAI => "gpt-4o-mini",
        }
    }

    /// Conventional environment variable holding the key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::GoogleAI => "GEMINI_API_KEY",
            Self::Groq => "GROQ_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
        }
    }
}

impl FromStr for ProviderType {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google_ai" | "gemini" | "google" => Ok(Self::GoogleAI),
            "groq" => Ok(Self::Groq),
            "openai" | "gpt" => Ok(Self::OpenAI),
            other => Err(LlmError::Configuration(format!(
                "Unknown provider: {}. Valid options: groq, google_ai, openai",
                other
            ))),
        }
    }
}

fn api_key(config: &LlmConfig, provider: ProviderType) -> Option<&str> {
    let key = match provider {
        ProviderType::GoogleAI => config.google_ai.api_key.as_deref(),
        ProviderType::Groq => config.groq.api_key.as_deref(),
        ProviderType::OpenAI => config.openai.api_key.as_deref(),
    };
    key.map(str::trim).filter(|k| !k.is_empty())
}

/// Create the configured provider. Fails when its API key is missing.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let provider_type: ProviderType = config.provider.parse()?;
    let model = config
        .default_model
        .clone()
        .unwrap_or_else(|| provider_type.default_model().to_string());

    let api_key = api_key(config, provider_type).ok_or_else(|| {
        LlmError::Configuration(format!(
            "{} API key not configured. Set llm.{}.api_key or the {} environment variable",
            provider_type.display_name(),
            provider_type.as_str(),
            provider_type.api_key_env()
        ))
    })?;

    let provider: Arc<dyn LlmProvider> = match provider_type {
        ProviderType::GoogleAI => Arc::new(
            GoogleAIProvider::new(api_key, model)
                .with_base_url(&config.google_ai.base_url)
                .with_timeout(config.timeout_seconds),
        ),
        ProviderType::Groq => Arc::new(
            OpenAIProvider::groq(api_key, model)
                .with_base_url(&config.groq.base_url)
                .with_timeout(config.timeout_seconds),
        ),
        ProviderType::OpenAI => {
            let mut provider = OpenAIProvider::new(api_key, model)
                .with_base_url(&config.openai.base_url)
                .with_timeout(config.timeout_seconds);
            if let Some(ref org) = config.openai.organization_id {
                provider = provider.with_organization(org);
            }
            Arc::new(provider)
        }
    };

    Ok(provider)
}

/// Provider used by the analysis pipeline.
///
/// A missing API key is not fatal at startup: it is logged and every
/// generation call then fails with [`LlmError::Configuration`]. In demo mode
/// the provider is wrapped in [`DemoFallbackProvider`].
pub fn build_generation_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let provider_type: ProviderType = config.provider.parse()?;

    let provider = match create_provider(config) {
        Ok(provider) => provider,
        Err(LlmError::Configuration(hint)) => {
            warn!(
                provider = provider_type.as_str(),
                env = provider_type.api_key_env(),
                "LLM API key is not set; analysis requests will fail"
            );
            let model = config
                .default_model
                .clone()
                .unwrap_or_else(|| provider_type.default_model().to_string());
            Arc::new(UnconfiguredProvider::new(
                provider_type.as_str(),
                provider_type.display_name(),
                model,
                hint,
            ))
        }
        Err(e) => return Err(e),
    };

    info!(
        provider = provider.info().id,
        model = provider.default_model(),
        "LLM provider initialized"
    );

    if config.demo_mode {
        warn!("Demo mode is ON: failed generations return a canned report labelled as demo");
        return Ok(Arc::new(DemoFallbackProvider::new(provider)));
    }

    Ok(provider)
}

//! Configuration validation module

use crate::config::{AnalysisConfig, CacheConfig, GitHubConfig, LlmConfig, ServerConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("GitHub configuration error: {message}")]
    GitHub { message: String },

    #[error("LLM configuration error: {message}")]
    Llm { message: String },

    #[error("Cache configuration error: {message}")]
    Cache { message: String },

    #[error("Analysis configuration error: {message}")]
    Analysis { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn github(message: impl Into<String>) -> Self {
        Self::GitHub {
            message: message.into(),
        }
    }

    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::server("Port must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::server(
                "request_timeout_seconds must be greater than 0",
            ));
        }
        if self.host.trim().is_empty() {
            return Err(ValidationError::server("Host cannot be empty"));
        }
        Ok(())
    }
}

impl Validate for GitHubConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::github(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(ValidationError::github("timeout_seconds must be greater than 0"));
        }
        Ok(())
    }
}

impl Validate for LlmConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.provider.to_lowercase().as_str() {
            "groq" | "google_ai" | "gemini" | "google" | "openai" => {}
            other => {
                return Err(ValidationError::llm(format!(
                    "Unknown provider '{}'; expected groq, google_ai or openai",
                    other
                )));
            }
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::llm("temperature must be within [0.0, 2.0]"));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::llm("max_tokens must be greater than 0"));
        }
        if self.timeout_seconds == 0 {
            return Err(ValidationError::llm("LLM timeout must be > 0"));
        }
        Ok(())
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_seconds == 0 {
            return Err(ValidationError::cache("ttl_seconds must be greater than 0"));
        }
        if self.max_entries == 0 {
            return Err(ValidationError::cache("max_entries must be greater than 0"));
        }
        Ok(())
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.tree_max_entries == 0 {
            return Err(ValidationError::analysis(
                "tree_max_entries must be greater than 0",
            ));
        }
        if self.file_char_budget == 0 {
            return Err(ValidationError::analysis(
                "file_char_budget must be greater than 0",
            ));
        }
        if self.top_languages == 0 {
            return Err(ValidationError::analysis("top_languages must be greater than 0"));
        }
        Ok(())
    }
}

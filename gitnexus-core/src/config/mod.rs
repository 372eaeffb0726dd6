//! Configuration management

pub mod validation;

use serde::{Deserialize, Serialize};

pub use validation::{Validate, ValidationError};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub github: GitHubConfig,
    pub llm: LlmConfig,
    pub cache: CacheConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whether to expose interactive API docs (Swagger UI).
    pub enable_docs: bool,
    /// Global request timeout in seconds applied at the HTTP layer.
    /// Must cover the slowest LLM call plus retrieval.
    pub request_timeout_seconds: u64,
    /// Allowed CORS origins. Use ["*"] to allow any (development only).
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_docs: true,
            request_timeout_seconds: 180,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// GitHub REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub base_url: String,
    /// Fallback token used when a request does not carry its own (can also use GITHUB_TOKEN env var)
    pub token: Option<String>,
    /// Per-call timeout; there is no retry.
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            token: None,
            timeout_seconds: 30,
            user_agent: concat!("gitnexus/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider: "groq", "google_ai" or "openai"
    pub provider: String,
    /// Model override; each provider has its own default
    pub default_model: Option<String>,
    /// Temperature for generation
    pub temperature: f64,
    /// Output-size ceiling; must hold the full analysis JSON
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Replace failed generations with a canned, labeled demo analysis.
    /// Never enable in production.
    pub demo_mode: bool,

    #[serde(default)]
    pub google_ai: GoogleAIConfig,
    #[serde(default)]
    pub groq: GroqConfig,
    #[serde(default)]
    pub openai: OpenAIConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            default_model: None,
            temperature: 0.3,
            max_tokens: 8000,
            timeout_seconds: 120,
            demo_mode: false,
            google_ai: GoogleAIConfig::default(),
            groq: GroqConfig::default(),
            openai: OpenAIConfig::default(),
        }
    }
}

/// Google AI (Gemini) provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleAIConfig {
    /// API Key (can also use GEMINI_API_KEY env var)
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for GoogleAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

/// Groq provider configuration (OpenAI-compatible API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroqConfig {
    /// API Key (can also use GROQ_API_KEY env var)
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".to_string(),
        }
    }
}

/// OpenAI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAIConfig {
    /// API Key (can also use OPENAI_API_KEY env var)
    pub api_key: Option<String>,
    pub base_url: String,
    pub organization_id: Option<String>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            organization_id: None,
        }
    }
}

/// Content cache configuration (file-browsing endpoints only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 300, // 5 minutes
            max_entries: 10_000,
        }
    }
}

/// Bounds applied while compiling the analysis context
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum number of entries rendered in the compact tree
    pub tree_max_entries: usize,
    /// Character budget for each important file
    pub file_char_budget: usize,
    /// Number of languages listed in the statistics section
    pub top_languages: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tree_max_entries: 50,
            file_char_budget: 4000,
            top_languages: 10,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "json" or "pretty"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.github.validate()?;
        self.llm.validate()?;
        self.cache.validate()?;
        self.analysis.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Local config and environment variables last (highest priority)
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("GITNEXUS").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;
        config.apply_conventional_env();
        config.validate()?;

        Ok(config)
    }

    /// Fill unset secrets from the conventional variables (GITHUB_TOKEN, GEMINI_API_KEY, ...)
    fn apply_conventional_env(&mut self) {
        fill_from_env(&mut self.github.token, "GITHUB_TOKEN");
        fill_from_env(&mut self.llm.google_ai.api_key, "GEMINI_API_KEY");
        fill_from_env(&mut self.llm.groq.api_key, "GROQ_API_KEY");
        fill_from_env(&mut self.llm.openai.api_key, "OPENAI_API_KEY");
    }
}

fn fill_from_env(slot: &mut Option<String>, var: &str) {
    if slot.as_deref().is_some_and(|v| !v.is_empty()) {
        return;
    }
    if let Ok(value) = std::env::var(var)
        && !value.trim().is_empty()
    {
        *slot = Some(value);
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}

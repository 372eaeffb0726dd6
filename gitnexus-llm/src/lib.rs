//! Prompt compilation, LLM providers and response normalization for GitNexus

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::GenerateAnalysisUseCase;
pub use domain::*;
pub use infrastructure::prompts;
pub use infrastructure::providers::{
    DemoFallbackProvider, GoogleAIProvider, OpenAIProvider, UnconfiguredProvider,
};
pub use infrastructure::{
    ParseError, ProviderType, build_generation_provider, create_provider, parse_analysis,
    strip_code_fence,
};

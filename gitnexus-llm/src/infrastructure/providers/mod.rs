//! LLM provider implementations

pub mod demo;
pub mod google_ai;
pub mod openai;

pub use demo::{DEMO_ANALYSIS_JSON, DEMO_SUMMARY_PREFIX, DemoFallbackProvider, UnconfiguredProvider};
pub use google_ai::GoogleAIProvider;
pub use openai::OpenAIProvider;

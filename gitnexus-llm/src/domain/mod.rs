//! Domain layer for LLM generation
//!
//! Provider-agnostic request/response types, the provider trait, and the
//! structured analysis model the pipeline produces.

pub mod analysis;
pub mod error;
pub mod messages;
pub mod provider;

pub use analysis::*;
pub use error::LlmError;
pub use messages::*;
pub use provider::{LlmProvider, ProviderCapabilities, ProviderInfo};

//! Prompt templates and the context compiler

pub mod context;
pub mod templates;

pub use context::{
    CompiledPrompt, ContextCompiler, FeatureFlags, ManifestKind, ManifestSummary, PromptLimits,
    detect_features, parse_manifest, truncate_chars,
};
pub use templates::{ANALYSIS_INSTRUCTIONS, ANALYSIS_INTRO, SCHEMA_FIELDS, SCORE_FIELDS, SYSTEM_PROMPT};

//! Orchestrator application layer

pub mod pipeline;

pub use pipeline::{AnalysisPipeline, EVENT_BUFFER, PipelineError};

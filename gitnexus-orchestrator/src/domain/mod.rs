//! Orchestrator domain - pipeline state and progress events

pub mod pipeline;

pub use pipeline::{
    PipelineEvent, PipelineStep, ProgressEvent, StageTimings, StepStatus, thousands_label,
};

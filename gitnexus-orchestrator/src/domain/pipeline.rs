//! Pipeline steps, progress events and stage timings

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use gitnexus_llm::AnalysisResult;

/// Stages of one analysis, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PipelineStep {
    Metadata,
    Tree,
    Files,
    Stats,
    Prompt,
    Ai,
    Parse,
    Complete,
}

impl PipelineStep {
    pub const ALL: [PipelineStep; 8] = [
        PipelineStep::Metadata,
        PipelineStep::Tree,
        PipelineStep::Files,
        PipelineStep::Stats,
        PipelineStep::Prompt,
        PipelineStep::Ai,
        PipelineStep::Parse,
        PipelineStep::Complete,
    ];

    pub const TOTAL: usize = Self::ALL.len();

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn id(&self) -> &'static str {
        match self {
            PipelineStep::Metadata => "metadata",
            PipelineStep::Tree => "tree",
            PipelineStep::Files => "files",
            PipelineStep::Stats => "stats",
            PipelineStep::Prompt => "prompt",
            PipelineStep::Ai => "ai",
            PipelineStep::Parse => "parse",
            PipelineStep::Complete => "complete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PipelineStep::Metadata => "Fetching repository metadata...",
            PipelineStep::Tree => "Retrieving file structure...",
            PipelineStep::Files => "Extracting important files...",
            PipelineStep::Stats => "Calculating file statistics...",
            PipelineStep::Prompt => "Building analysis context...",
            PipelineStep::Ai => "Running deep AI research...",
            PipelineStep::Parse => "Parsing results...",
            PipelineStep::Complete => "Analysis complete!",
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Active,
    Complete,
    Error,
}

/// Per-step status update. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub step: usize,
    pub total_steps: usize,
    pub step_id: &'static str,
    pub label: &'static str,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl ProgressEvent {
    pub fn new(step: PipelineStep, status: StepStatus, details: Option<String>) -> Self {
        Self {
            step: step.index(),
            total_steps: PipelineStep::TOTAL,
            step_id: step.id(),
            label: step.label(),
            status,
            details,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Frame sent over the analysis stream.
///
/// A stream is any number of `Progress` frames followed by exactly one
/// `Result` or `Error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PipelineEvent {
    Progress(ProgressEvent),
    Result { data: Box<AnalysisResult> },
    Error { error: String },
}

impl PipelineEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PipelineEvent::Progress(_))
    }
}

/// Elapsed time per completed stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageTimings {
    stages: Vec<(PipelineStep, u64)>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, step: PipelineStep, elapsed: Duration) {
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        match self.stages.iter_mut().find(|(s, _)| *s == step) {
            Some(entry) => entry.1 = millis,
            None => self.stages.push((step, millis)),
        }
    }

    /// Sum of recorded stages. Concurrent stages overlap, so this can exceed
    /// wall-clock time.
    pub fn total_ms(&self) -> u64 {
        self.stages.iter().map(|(_, ms)| ms).sum()
    }
}

impl fmt::Display for StageTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (step, ms)) in self.stages.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}ms", step, ms)?;
        }
        Ok(())
    }
}

/// `1234` -> `"1K"`, rounding to the nearest thousand
pub fn thousands_label(len: usize) -> String {
    format!("{}K", (len + 500) / 1000)
}

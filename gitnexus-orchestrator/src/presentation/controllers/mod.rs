//! Orchestrator API controllers

pub mod analysis;
pub mod health;
pub mod repository;

use std::sync::Arc;

use gitnexus_core::domain::RepositorySource;

use crate::application::AnalysisPipeline;

/// Application state shared by every handler
#[derive(Clone)]
pub struct OrchestratorState {
    pub pipeline: Arc<AnalysisPipeline>,
    /// Read-through source for the browsing endpoints
    pub source: Arc<dyn RepositorySource>,
    pub demo_mode: bool,
}

pub use analysis::{analyze, analyze_stream};
pub use health::{health_check, root};
pub use repository::{get_file, list_contents};

//! GitNexus - GitHub repository health reports
//!
//! Binary crate that wires retrieval, generation and the HTTP surface together.

mod app;
mod shutdown;

pub use app::create_app;
pub use shutdown::{drain_deadline, shutdown_signal};
pub use gitnexus_core::{Config, init_tracing};
pub use gitnexus_orchestrator::OrchestratorState;

pub use gitnexus_core;
pub use gitnexus_llm;
pub use gitnexus_orchestrator;

//! GitNexus Orchestrator - analysis pipeline and HTTP surface
//!
//! # Architecture
//!
//! ```text
//! gitnexus-orchestrator/
//! ├── domain/           # Pipeline steps, progress events, stage timings
//! ├── application/      # AnalysisPipeline (sync and streaming variants)
//! └── presentation/     # HTTP layer
//!     ├── controllers/  # Request handlers
//!     ├── middleware.rs # Request logging, GitHub token scoping, error mapping
//!     ├── models.rs     # DTOs with OpenAPI schemas
//!     └── routes.rs     # Router and middleware stack
//! ```
//!
//! # API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/analyze` | POST | Run an analysis and return the report |
//! | `/analyze-stream` | POST | Same, streaming progress as server-sent events |
//! | `/repos/{owner}/{repo}/contents` | GET | Directory listing (cached) |
//! | `/repos/{owner}/{repo}/file` | GET | Raw file text (cached) |
//! | `/health` | GET | Health check |
//! | `/docs` | GET | Swagger UI |

pub mod application;
pub mod domain;
pub mod presentation;

pub use application::{AnalysisPipeline, PipelineError};
pub use presentation::{OrchestratorState, create_router};

//! GitNexus Core - Foundation crate for the GitNexus analysis service
//!
//! This crate provides the pieces shared by the LLM and orchestration crates:
//!
//! # Modules
//!
//! - [`config`] - Strongly-typed configuration with TOML and environment variable support
//! - [`domain`] - Repository model (metadata, file tree, statistics) and the retrieval seam
//! - [`application`] - Statistics reduction over retrieved file trees
//! - [`infrastructure`] - GitHub REST client and the content cache
//! - [`logging`] - Structured logging with tracing
//!
//! # Architecture
//!
//! ```text
//! gitnexus-core/
//! ├── domain/           # RepoMetadata, FileTreeNode, FileStats, RepositorySource
//! ├── application/      # Statistics reducer and compact tree renderer
//! ├── infrastructure/
//! │   ├── github/       # GitHub REST retrieval adapter + request-scoped token
//! │   └── cache/        # TTL content cache (moka)
//! └── config/           # Configuration management
//! ```
//!
//! # Configuration
//!
//! ```rust,ignore
//! use gitnexus_core::Config;
//!
//! let config = Config::load()?;
//! ```
//!
//! Environment variables use the `GITNEXUS__` prefix with double underscore separators:
//!
//! ```bash
//! GITNEXUS__SERVER__PORT=3000
//! GITNEXUS__LLM__PROVIDER=groq
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;

//! Application setup and wiring

use std::sync::Arc;

use anyhow::Context;
use axum::Router;

use gitnexus_core::Config;
use gitnexus_core::domain::RepositorySource;
use gitnexus_core::infrastructure::{GitHubClient, MemoryContentCache};
use gitnexus_llm::{GenerateAnalysisUseCase, build_generation_provider};
use gitnexus_orchestrator::{AnalysisPipeline, OrchestratorState, create_router};

/// Build the router from configuration.
///
/// A missing LLM API key does not fail startup; analysis requests then fail
/// with a configuration error instead.
pub async fn create_app(config: &Config) -> anyhow::Result<Router> {
    let cache = Arc::new(MemoryContentCache::from_config(&config.cache));
    tracing::info!(
        ttl_seconds = config.cache.ttl_seconds,
        max_entries = config.cache.max_entries,
        "Content cache initialized"
    );

    let github = GitHubClient::new(&config.github, cache)
        .context("Failed to create GitHub client")?;
    let source: Arc<dyn RepositorySource> = Arc::new(github);
    tracing::info!(
        base_url = %config.github.base_url,
        authenticated = config.github.token.is_some(),
        "GitHub client initialized"
    );

    let provider =
        build_generation_provider(&config.llm).context("Failed to create LLM provider")?;
    let generator = Arc::new(GenerateAnalysisUseCase::new(provider, config.llm.clone()));

    let pipeline = Arc::new(AnalysisPipeline::new(
        source.clone(),
        generator,
        &config.analysis,
    ));

    let state = OrchestratorState {
        pipeline,
        source,
        demo_mode: config.llm.demo_mode,
    };

    Ok(create_router(state, &config.server))
}

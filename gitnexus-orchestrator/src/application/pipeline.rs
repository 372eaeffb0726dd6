//! Analysis pipeline: the retrieval, reduction, generation and parsing
//! sequence behind both `/analyze` endpoints.
//!
//! ```text
//! AnalysisPipeline     RepositorySource     ContextCompiler     LlmProvider
//!     │                     │                     │                  │
//!     ├─ metadata ─────────►│                     │                  │
//!     ├─ tree ─────────────►│                     │                  │
//!     ├─ important files ──►│                     │                  │
//!     ├─ stats (local)      │                     │                  │
//!     ├─ prompt ───────────────────────────────► │                  │
//!     ├─ generate ─────────────────────────────────────────────────►│
//!     ├─ parse (local)      │                     │                  │
//!     ▼ AnalysisResult
//! ```
//!
//! [`AnalysisPipeline::run`] fetches the three retrieval inputs concurrently.
//! [`AnalysisPipeline::run_streaming`] runs every stage in sequence and
//! reports each one over a bounded channel. Any failure ends the run; nothing
//! is retried and no partial result is produced.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use gitnexus_core::application::summarize_tree;
use gitnexus_core::config::AnalysisConfig;
use gitnexus_core::domain::{RepoRef, RepositorySource, RetrievalError};
use gitnexus_core::infrastructure::with_request_github_token;
use gitnexus_llm::prompts::{CompiledPrompt, ContextCompiler, PromptLimits};
use gitnexus_llm::{AnalysisResult, GenerateAnalysisUseCase, LlmError, ParseError, parse_analysis};

use crate::domain::{
    PipelineEvent, PipelineStep, ProgressEvent, StageTimings, StepStatus, thousands_label,
};

/// Capacity of the progress channel. A slow client applies back-pressure to
/// the pipeline rather than growing a queue.
pub const EVENT_BUFFER: usize = 16;

/// Failure of one pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error("AI generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("Failed to parse AI response: {0}")]
    Parse(#[from] ParseError),
}

/// Why a streaming run stopped early
enum Interrupt {
    Failed(PipelineStep, PipelineError),
    Disconnected,
}

/// Sends progress frames; a closed channel means the client went away.
struct ProgressSink<'a> {
    tx: &'a mpsc::Sender<PipelineEvent>,
}

impl ProgressSink<'_> {
    async fn send(&self, event: PipelineEvent) -> Result<(), Interrupt> {
        self.tx
            .send(event)
            .await
            .map_err(|_| Interrupt::Disconnected)
    }

    async fn progress(
        &self,
        step: PipelineStep,
        status: StepStatus,
        details: Option<String>,
    ) -> Result<(), Interrupt> {
        self.send(PipelineEvent::Progress(ProgressEvent::new(step, status, details)))
            .await
    }

    /// Announce `step`, run `work`, then report it complete with `describe`'s
    /// summary of the output.
    async fn stage<T, Fut>(
        &self,
        timings: &mut StageTimings,
        step: PipelineStep,
        active_details: Option<String>,
        work: Fut,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<T, Interrupt>
    where
        Fut: Future<Output = Result<T, PipelineError>>,
    {
        self.progress(step, StepStatus::Active, active_details).await?;

        let started = Instant::now();
        let value = work.await.map_err(|e| Interrupt::Failed(step, e))?;
        timings.record(step, started.elapsed());

        self.progress(step, StepStatus::Complete, Some(describe(&value)))
            .await?;
        Ok(value)
    }
}

/// Sequences one analysis from repository coordinates to a parsed report.
pub struct AnalysisPipeline {
    source: Arc<dyn RepositorySource>,
    generator: Arc<GenerateAnalysisUseCase>,
    compiler: ContextCompiler,
    tree_max_entries: usize,
}

impl AnalysisPipeline {
    pub fn new(
        source: Arc<dyn RepositorySource>,
        generator: Arc<GenerateAnalysisUseCase>,
        analysis: &AnalysisConfig,
    ) -> Self {
        Self {
            source,
            generator,
            compiler: ContextCompiler::new(PromptLimits::from(analysis)),
            tree_max_entries: analysis.tree_max_entries,
        }
    }

    /// Run every stage and return the report.
    pub async fn run(&self, repo: &RepoRef) -> Result<AnalysisResult, PipelineError> {
        let started = Instant::now();
        let mut timings = StageTimings::new();

        info!(repo = %repo, "Starting analysis");

        let ((metadata, metadata_time), (tree, tree_time), (files, files_time)) = tokio::try_join!(
            timed(self.source.fetch_metadata(repo)),
            timed(self.source.fetch_tree(repo)),
            timed(self.source.fetch_important_files(repo)),
        )
        .inspect_err(|e| warn!(repo = %repo, error = %e, "Repository retrieval failed"))?;
        timings.record(PipelineStep::Metadata, metadata_time);
        timings.record(PipelineStep::Tree, tree_time);
        timings.record(PipelineStep::Files, files_time);

        let stage = Instant::now();
        let summary = summarize_tree(&tree, self.tree_max_entries);
        timings.record(PipelineStep::Stats, stage.elapsed());

        let stage = Instant::now();
        let prompt = self
            .compiler
            .compile(&metadata, &summary.stats, &summary.compact_tree, &files);
        timings.record(PipelineStep::Prompt, stage.elapsed());

        let stage = Instant::now();
        let text = self.generate(repo, &prompt).await?;
        timings.record(PipelineStep::Ai, stage.elapsed());

        let stage = Instant::now();
        let result = parse(repo, &text)?;
        timings.record(PipelineStep::Parse, stage.elapsed());

        info!(
            repo = %repo,
            duration_ms = started.elapsed().as_millis(),
            timings = %timings,
            stage_total_ms = timings.total_ms(),
            insights = result.insights.len(),
            "Analysis complete"
        );
        Ok(result)
    }

    /// Run every stage in sequence, reporting progress on `tx`.
    ///
    /// The final frame is always a single `Result` or `Error`, unless the
    /// receiver is dropped first, in which case the run stops at the next
    /// send. An LLM call already in flight is awaited, not aborted.
    pub async fn run_streaming(&self, repo: RepoRef, tx: mpsc::Sender<PipelineEvent>) {
        let sink = ProgressSink { tx: &tx };
        let started = Instant::now();

        info!(repo = %repo, "Starting streaming analysis");

        let outcome = match self.stream_stages(&repo, &sink).await {
            Ok((result, timings)) => {
                info!(
                    repo = %repo,
                    duration_ms = started.elapsed().as_millis(),
                    timings = %timings,
                    stage_total_ms = timings.total_ms(),
                    insights = result.insights.len(),
                    "Streaming analysis complete"
                );
                sink.send(PipelineEvent::Result {
                    data: Box::new(result),
                })
                .await
            }
            Err(Interrupt::Failed(step, err)) => {
                let message = err.to_string();
                let details = Some(message.clone());
                match sink.progress(step, StepStatus::Error, details).await {
                    Ok(()) => sink.send(PipelineEvent::Error { error: message }).await,
                    Err(gone) => Err(gone),
                }
            }
            Err(Interrupt::Disconnected) => Err(Interrupt::Disconnected),
        };

        if outcome.is_err() {
            debug!(repo = %repo, "Client disconnected; analysis stream stopped");
        }
    }

    /// Start [`run_streaming`](Self::run_streaming) on its own task and
    /// return the receiving end.
    ///
    /// `github_token` is re-scoped inside the task because task-locals do not
    /// follow `tokio::spawn`.
    pub fn spawn_streaming(
        self: &Arc<Self>,
        repo: RepoRef,
        github_token: Option<String>,
    ) -> mpsc::Receiver<PipelineEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let pipeline = Arc::clone(self);

        tokio::spawn(async move {
            let run = pipeline.run_streaming(repo, tx);
            match github_token {
                Some(token) => with_request_github_token(token, run).await,
                None => run.await,
            }
        });

        rx
    }

    async fn stream_stages(
        &self,
        repo: &RepoRef,
        sink: &ProgressSink<'_>,
    ) -> Result<(AnalysisResult, StageTimings), Interrupt> {
        let mut timings = StageTimings::new();

        let metadata = sink
            .stage(
                &mut timings,
                PipelineStep::Metadata,
                None,
                async { self.source.fetch_metadata(repo).await.map_err(PipelineError::from) },
                |m| format!("{} stars, {} forks", m.stars, m.forks),
            )
            .await?;

        let tree = sink
            .stage(
                &mut timings,
                PipelineStep::Tree,
                None,
                async { self.source.fetch_tree(repo).await.map_err(PipelineError::from) },
                |tree| format!("{} root entries", tree.len()),
            )
            .await?;

        let files = sink
            .stage(
                &mut timings,
                PipelineStep::Files,
                None,
                async { self.source.fetch_important_files(repo).await.map_err(PipelineError::from) },
                |files| format!("{} files extracted", files.len()),
            )
            .await?;

        let summary = sink
            .stage(
                &mut timings,
                PipelineStep::Stats,
                None,
                async { Ok::<_, PipelineError>(summarize_tree(&tree, self.tree_max_entries)) },
                |s| {
                    format!(
                        "{} files, {} dirs",
                        s.stats.total_files, s.stats.total_directories
                    )
                },
            )
            .await?;

        let prompt = sink
            .stage(
                &mut timings,
                PipelineStep::Prompt,
                None,
                async {
                    Ok::<_, PipelineError>(self.compiler.compile(
                        &metadata,
                        &summary.stats,
                        &summary.compact_tree,
                        &files,
                    ))
                },
                |p| format!("{} chars context", thousands_label(p.char_len())),
            )
            .await?;

        let text = sink
            .stage(
                &mut timings,
                PipelineStep::Ai,
                Some(format!("{} processing...", self.generator.provider_name())),
                self.generate(repo, &prompt),
                |text| format!("{} chars response", thousands_label(text.chars().count())),
            )
            .await?;

        let result = sink
            .stage(
                &mut timings,
                PipelineStep::Parse,
                None,
                async { parse(repo, &text) },
                |r| format!("{} insights found", r.insights.len()),
            )
            .await?;

        sink.progress(
            PipelineStep::Complete,
            StepStatus::Complete,
            Some(format!("Score: {}/100", result.scores.overall)),
        )
        .await?;

        Ok((result, timings))
    }

    async fn generate(&self, repo: &RepoRef, prompt: &CompiledPrompt) -> Result<String, PipelineError> {
        self.generator.execute(prompt).await.map_err(|e| {
            error!(repo = %repo, error = %e, "AI generation failed");
            PipelineError::from(e)
        })
    }
}

fn parse(repo: &RepoRef, text: &str) -> Result<AnalysisResult, PipelineError> {
    parse_analysis(text).map_err(|e| {
        error!(repo = %repo, error = %e, response_chars = text.chars().count(), "AI response rejected");
        PipelineError::from(e)
    })
}

async fn timed<T, E>(fut: impl Future<Output = Result<T, E>>) -> Result<(T, Duration), E> {
    let started = Instant::now();
    let value = fut.await?;
    Ok((value, started.elapsed()))
}

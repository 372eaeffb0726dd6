//! Analysis controllers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{
        IntoResponse, Response, Sse,
        sse::{Event, KeepAlive},
    },
};
use futures::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

use gitnexus_core::domain::RepoRef;
use gitnexus_core::infrastructure::current_request_github_token;
use gitnexus_llm::AnalysisResult;

use crate::presentation::controllers::OrchestratorState;
use crate::presentation::middleware::{bad_request, pipeline_error_to_response};
use crate::presentation::models::{AnalyzeRequest, ErrorResponse, MISSING_REPO_MESSAGE};

/// A body that is not valid JSON counts as both fields missing.
fn requested_repo(payload: Result<Json<AnalyzeRequest>, JsonRejection>) -> Result<RepoRef, Response> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable analyze request body");
            AnalyzeRequest::default()
        }
    };
    request
        .repo_ref()
        .ok_or_else(|| bad_request(MISSING_REPO_MESSAGE))
}

/// POST /analyze - Run the full analysis and return the report
#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis report", body = AnalysisResult),
        (status = 400, description = "Owner or repo missing", body = ErrorResponse),
        (status = 500, description = "Retrieval, generation or parse failure", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn analyze(
    State(state): State<OrchestratorState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisResult>, Response> {
    let repo = requested_repo(payload)?;

    state
        .pipeline
        .run(&repo)
        .await
        .map(Json)
        .map_err(|e| pipeline_error_to_response(&e))
}

/// POST /analyze-stream - Run the analysis, streaming progress as server-sent events
///
/// Each `data:` frame is a JSON object with a `type` of `progress`, then
/// exactly one `result` or `error` before the stream closes.
#[utoipa::path(
    post,
    path = "/analyze-stream",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Progress stream", body = String, content_type = "text/event-stream"),
        (status = 400, description = "Owner or repo missing", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn analyze_stream(
    State(state): State<OrchestratorState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let repo = match requested_repo(payload) {
        Ok(repo) => repo,
        Err(response) => return response,
    };

    let events = state
        .pipeline
        .spawn_streaming(repo, current_request_github_token());

    let stream = ReceiverStream::new(events).map(|event| Event::default().json_data(event));

    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}

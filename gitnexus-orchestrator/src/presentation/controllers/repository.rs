//! Repository browsing controllers
//!
//! Thin read-through wrappers over the retrieval source. Responses come from
//! the short-lived content cache when present.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::debug;

use gitnexus_core::domain::{FileTreeNode, RepoRef};

use crate::presentation::controllers::OrchestratorState;
use crate::presentation::middleware::{bad_request, retrieval_error_to_response};
use crate::presentation::models::{ErrorResponse, MISSING_PATH_MESSAGE, PathQuery};

/// GET /repos/{owner}/{repo}/contents - One directory level
#[utoipa::path(
    get,
    path = "/repos/{owner}/{repo}/contents",
    params(
        ("owner" = String, Path, description = "Repository owner"),
        ("repo" = String, Path, description = "Repository name"),
        PathQuery
    ),
    responses(
        (status = 200, description = "Directory listing, directories first", body = Vec<FileTreeNode>),
        (status = 403, description = "Access forbidden", body = ErrorResponse),
        (status = 404, description = "Repository or path not found", body = ErrorResponse),
        (status = 429, description = "GitHub rate limit exceeded", body = ErrorResponse),
        (status = 502, description = "GitHub failure", body = ErrorResponse)
    ),
    tag = "repository"
)]
pub async fn list_contents(
    State(state): State<OrchestratorState>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<PathQuery>,
) -> Result<Json<Vec<FileTreeNode>>, Response> {
    let repo = RepoRef::new(owner, repo);
    let path = query.path().unwrap_or_default();

    debug!(repo = %repo, path, "Listing contents");

    state
        .source
        .list_contents(&repo, path)
        .await
        .map(Json)
        .map_err(|e| retrieval_error_to_response(&e))
}

/// GET /repos/{owner}/{repo}/file - Raw file text
#[utoipa::path(
    get,
    path = "/repos/{owner}/{repo}/file",
    params(
        ("owner" = String, Path, description = "Repository owner"),
        ("repo" = String, Path, description = "Repository name"),
        PathQuery
    ),
    responses(
        (status = 200, description = "File content", body = String, content_type = "text/plain"),
        (status = 400, description = "Path missing", body = ErrorResponse),
        (status = 403, description = "Access forbidden", body = ErrorResponse),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 429, description = "GitHub rate limit exceeded", body = ErrorResponse),
        (status = 502, description = "GitHub failure", body = ErrorResponse)
    ),
    tag = "repository"
)]
pub async fn get_file(
    State(state): State<OrchestratorState>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<PathQuery>,
) -> Response {
    let Some(path) = query.path() else {
        return bad_request(MISSING_PATH_MESSAGE);
    };
    let repo = RepoRef::new(owner, repo);

    match state.source.fetch_file(&repo, path).await {
        Ok(content) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            content,
        )
            .into_response(),
        Err(e) => retrieval_error_to_response(&e),
    }
}

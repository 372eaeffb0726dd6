//! HTTP middleware and error-to-response mapping

use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use std::time::Instant;
use uuid::Uuid;

use gitnexus_core::domain::RetrievalError;
use gitnexus_core::infrastructure::with_request_github_token;

use crate::application::PipelineError;
use crate::presentation::models::ErrorResponse;

/// Build an error response, logging 5xx at `error` and 4xx at `warn`.
pub fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    if status.is_server_error() {
        tracing::error!(
            http_status = %status,
            error = %body.error,
            details = body.details.as_deref().unwrap_or_default(),
            "Server error mapped to HTTP response"
        );
    } else {
        tracing::warn!(
            http_status = %status,
            error = %body.error,
            "Client error mapped to HTTP response"
        );
    }
    (status, Json(body)).into_response()
}

/// 400 with a bare message
pub fn bad_request(message: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, ErrorResponse::new(message))
}

/// Analysis failures are always 500; `details` carries the debug rendering.
pub fn pipeline_error_to_response(error: &PipelineError) -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new(error.to_string()).with_details(format!("{:?}", error)),
    )
}

/// Browsing failures keep the upstream distinction visible to the client.
pub fn retrieval_error_to_response(error: &RetrievalError) -> Response {
    let status = match error {
        RetrievalError::NotFound { .. } | RetrievalError::PathNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        RetrievalError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        RetrievalError::Forbidden { .. } => StatusCode::FORBIDDEN,
        _ => StatusCode::BAD_GATEWAY,
    };
    error_response(
        status,
        ErrorResponse::new(error.to_string()).with_details(format!("{:?}", error)),
    )
}

/// Request logging middleware with timing and request ID
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = Uuid::new_v4();
    let start_time = Instant::now();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        "Processing request"
    );

    let response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = start_time.elapsed().as_millis(),
        "Request completed"
    );

    response
}

const GITHUB_TOKEN_COOKIE: &str = "github_token";

/// Token supplied by the caller, first found wins: `X-GitHub-Token`,
/// `Authorization: Bearer <token>` / `Authorization: token <token>`, then
/// the `github_token` cookie.
pub fn github_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let explicit = headers
        .get("x-github-token")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let authorization = || {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
        value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("token "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    };

    let cookie = || {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.split_once('='))
            .filter(|(name, _)| name.trim() == GITHUB_TOKEN_COOKIE)
            .map(|(_, value)| value.trim().trim_matches('"'))
            .find(|t| !t.is_empty())
    };

    explicit
        .or_else(authorization)
        .or_else(cookie)
        .map(str::to_string)
}

/// Scope the caller's GitHub token for the rest of the request.
pub async fn github_token_middleware(request: Request, next: Next) -> Response {
    match github_token_from_headers(request.headers()) {
        Some(token) => with_request_github_token(token, next.run(request)).await,
        None => next.run(request).await,
    }
}

//! Health and service information

use axum::{Json, extract::State};

use crate::presentation::controllers::OrchestratorState;
use crate::presentation::models::{ApiInfoResponse, HealthResponse};

/// GET /health - Liveness check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<OrchestratorState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        demo_mode: state.demo_mode,
    })
}

/// GET / - Service name and routes
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = ApiInfoResponse)
    ),
    tag = "health"
)]
pub async fn root() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        name: "GitNexus".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: [
            "POST /analyze",
            "POST /analyze-stream",
            "GET /repos/{owner}/{repo}/contents?path=",
            "GET /repos/{owner}/{repo}/file?path=",
            "GET /health",
            "GET /docs",
        ]
        .iter()
        .map(|e| e.to_string())
        .collect(),
    })
}

//! Route definitions and server setup

use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use gitnexus_core::config::ServerConfig;

use crate::presentation::{
    controllers::{
        OrchestratorState, analyze, analyze_stream, get_file, health_check, list_contents, root,
    },
    middleware::{github_token_middleware, logging_middleware},
    models::*,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::analysis::analyze,
        crate::presentation::controllers::analysis::analyze_stream,
        crate::presentation::controllers::repository::list_contents,
        crate::presentation::controllers::repository::get_file,
        crate::presentation::controllers::health::health_check,
        crate::presentation::controllers::health::root
    ),
    components(
        schemas(
            AnalyzeRequest,
            ErrorResponse,
            HealthResponse,
            ApiInfoResponse,
            gitnexus_llm::AnalysisResult,
            gitnexus_core::domain::FileTreeNode
        )
    ),
    tags(
        (name = "analysis", description = "Repository health analysis"),
        (name = "repository", description = "Cached repository browsing"),
        (name = "health", description = "Service health and information")
    ),
    info(
        title = "GitNexus API",
        description = "Turns a GitHub repository into an AI-generated health report."
    )
)]
pub struct ApiDoc;

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            HeaderName::from_static("x-github-token"),
        ])
        .max_age(Duration::from_secs(3600));

    if config.allowed_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS: allowing any origin (development only)");
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| {
                    tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                })
                .ok()
        })
        .collect();
    layer.allow_origin(origins)
}

/// Create the application router with its middleware stack
pub fn create_router(state: OrchestratorState, config: &ServerConfig) -> Router {
    let api_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/analyze", post(analyze))
        .route("/analyze-stream", post(analyze_stream))
        .route("/repos/{owner}/{repo}/contents", get(list_contents))
        .route("/repos/{owner}/{repo}/file", get(get_file));

    let mut router = api_routes;
    if config.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        // Covers the time to produce response headers; streamed bodies are not cut off
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_seconds),
        ))
        .layer(middleware::from_fn(github_token_middleware))
        .layer(middleware::from_fn(logging_middleware));

    router.layer(service_builder).with_state(state)
}

//! API request and response models

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use gitnexus_core::domain::RepoRef;

pub const MISSING_REPO_MESSAGE: &str = "Owner and Repo are required";
pub const MISSING_PATH_MESSAGE: &str = "Path is required";

/// Request body for both analysis endpoints
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Repository owner (user or organization)
    #[schema(example = "octocat")]
    pub owner: Option<String>,

    /// Repository name
    #[schema(example = "Hello-World")]
    pub repo: Option<String>,
}

impl AnalyzeRequest {
    /// Both fields present and non-blank, trimmed
    pub fn repo_ref(&self) -> Option<RepoRef> {
        let owner = non_blank(self.owner.as_deref())?;
        let repo = non_blank(self.repo.as_deref())?;
        Some(RepoRef::new(owner, repo))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message, meaningful on its own
    #[schema(example = "Repository not found or inaccessible: octocat/missing")]
    pub error: String,

    /// Diagnostic detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,

    #[schema(example = "0.1.0")]
    pub version: String,

    /// Whether failed generations are replaced by a labelled demo report
    pub demo_mode: bool,
}

/// Service description served at `/`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiInfoResponse {
    #[schema(example = "GitNexus")]
    pub name: String,
    pub version: String,
    pub endpoints: Vec<String>,
}

/// `?path=` for the browsing endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PathQuery {
    /// Repository-relative path; empty or absent means the root
    #[param(example = "src/main.rs")]
    pub path: Option<String>,
}

impl PathQuery {
    pub fn path(&self) -> Option<&str> {
        non_blank(self.path.as_deref())
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
    }
}

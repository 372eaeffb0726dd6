//! Retrieval error taxonomy

use thiserror::Error;

/// Failure of a single GitHub call.
///
/// Never retried by the adapter; the variants let callers tell a missing
/// repository apart from an exhausted rate limit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RetrievalError {
    #[error("Repository not found or inaccessible: {resource}")]
    NotFound { resource: String },

    #[error("Path not found in {repository}: {path}")]
    PathNotFound { repository: String, path: String },

    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimited {
        message: String,
        /// Epoch seconds at which the quota resets (`x-ratelimit-reset`)
        reset: Option<u64>,
    },

    #[error("Access to GitHub resource forbidden: {message}")]
    Forbidden { message: String },

    #[error("Network error talking to GitHub: {0}")]
    Network(String),

    #[error("GitHub API error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid response from GitHub: {0}")]
    InvalidResponse(String),

    #[error("GitHub client misconfigured: {0}")]
    Configuration(String),
}

impl RetrievalError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn path_not_found(repository: impl Into<String>, path: impl Into<String>) -> Self {
        Self::PathNotFound {
            repository: repository.into(),
            path: path.into(),
        }
    }

    /// Either the repository or a path inside it is missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::PathNotFound { .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl From<reqwest::Error> for RetrievalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {}", err))
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RetrievalError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(format!("JSON parse error: {}", err))
    }
}

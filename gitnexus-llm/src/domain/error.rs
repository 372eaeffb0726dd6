//! LLM-specific error types
//!
//! Every variant carries the upstream detail so callers can show a
//! user-actionable message. Nothing here is retried.

use thiserror::Error;

/// LLM operation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Invalid or missing API key
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {message}")]
    RateLimited {
        /// Seconds to wait, when the provider says
        retry_after: Option<u64>,
        message: String,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Provider returned something we could not read
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LlmError::RateLimited { .. })
    }

    pub fn rate_limited(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        Self::RateLimited {
            retry_after,
            message: message.into(),
        }
    }

    /// Map a non-success HTTP status from a provider API.
    pub fn from_status(status: u16, body: impl Into<String>, retry_after: Option<u64>) -> Self {
        let body = body.into();
        match status {
            400 | 413 | 422 => LlmError::InvalidRequest(body),
            401 | 403 => LlmError::Authentication(body),
            404 => LlmError::ModelNotFound(body),
            429 => LlmError::rate_limited(body, retry_after),
            500..=599 => LlmError::ServiceUnavailable(body),
            other => LlmError::InvalidResponse(format!("API error {}: {}", other, body)),
        }
    }

    /// Map a transport failure, reporting the configured timeout when the
    /// request ran out of time.
    pub fn from_transport(err: reqwest::Error, timeout_seconds: u64) -> Self {
        if err.is_timeout() {
            LlmError::Timeout {
                seconds: timeout_seconds,
            }
        } else {
            LlmError::from(err)
        }
    }
}

/// The request URL is dropped from the message; it may carry credentials.
impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            LlmError::Timeout { seconds: 0 }
        } else if err.is_decode() {
            LlmError::InvalidResponse(err.to_string())
        } else if err.is_connect() {
            LlmError::Network(format!("Connection failed: {}", err))
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::InvalidResponse(format!("JSON parse error: {}", err))
    }
}

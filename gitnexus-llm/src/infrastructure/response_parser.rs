//! Response normalizer
//!
//! Turns the model's raw text into an [`AnalysisResult`]:
//! 1. trim surrounding whitespace;
//! 2. strip one enclosing code fence (```` ```json ````, ```` ``` ````, or none);
//! 3. parse the body as a JSON object;
//! 4. default any field that is missing, `null` or of the wrong type.
//!
//! Invalid JSON is always an error. Nothing attempts to repair it.

use thiserror::Error;
use tracing::debug;

use crate::domain::AnalysisResult;

const FENCE: &str = "```";
const REQUIRED_FIELDS: &[&str] = &["summary", "scores", "insights"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("AI response was empty")]
    EmptyResponse,

    #[error("AI response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("AI response is JSON but not an object")]
    NotAnObject,

    /// Only reachable for a root the report type cannot be read from at all
    #[error("AI response does not match the analysis schema: {0}")]
    Schema(String),
}

/// Remove one enclosing markdown code fence.
///
/// The opening fence may carry a language tag (any case). The closing fence
/// is only removed when an opening fence was found. Unfenced input comes back
/// trimmed, so applying this twice is the same as applying it once.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let body = match rest.split_once('\n') {
        Some((tag, body)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body,
        Some(_) => rest,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

/// Parse the model output into a report, defaulting absent fields.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, ParseError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(ParseError::EmptyResponse);
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    let Some(object) = value.as_object() else {
        return Err(ParseError::NotAnObject);
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| object.get(*field).is_none_or(|v| v.is_null()))
        .collect();
    if !missing.is_empty() {
        debug!(missing = ?missing, "AI response is missing fields; using defaults");
    }

    serde_json::from_value(value).map_err(|e| ParseError::Schema(e.to_string()))
}

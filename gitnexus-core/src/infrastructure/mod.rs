//! Infrastructure Layer - External concerns and implementations
//!
//! GitHub REST retrieval and the short-lived content cache.

pub mod cache;
pub mod github;

pub use cache::{ContentCache, MemoryContentCache};
pub use github::{
    GitHubClient, current_request_github_token, with_request_github_token,
};

//! GitHub REST API integration

mod client;
mod models;
mod token;

pub use client::GitHubClient;
pub use token::{current_request_github_token, with_request_github_token};

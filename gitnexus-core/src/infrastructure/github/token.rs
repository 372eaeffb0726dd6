use std::future::Future;

tokio::task_local! {
    static GITHUB_REQUEST_TOKEN: String;
}

/// Scope a request-scoped GitHub token for the lifetime of the provided future.
///
/// Task-locals do not cross `tokio::spawn`; re-scope the token inside any
/// task spawned on behalf of the request.
pub async fn with_request_github_token<F, T>(token: String, fut: F) -> T
where
    F: Future<Output = T>,
{
    GITHUB_REQUEST_TOKEN.scope(token, fut).await
}

/// Retrieve the GitHub token, if one has been scoped for the current task.
pub fn current_request_github_token() -> Option<String> {
    GITHUB_REQUEST_TOKEN
        .try_with(|token| token.clone())
        .ok()
        .filter(|token| !token.is_empty())
}

//! GitHub REST retrieval adapter

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap};
use reqwest::{Client, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::models::{ApiErrorBody, ContentsResponse, RepoResponse, TreeResponse};
use super::token::current_request_github_token;
use crate::config::GitHubConfig;
use crate::domain::repository::sibling_order;
use crate::domain::{
    FileTreeNode, IMPORTANT_FILES, ImportantFiles, RepoMetadata, RepoRef, RepositorySource,
    RetrievalError, build_tree,
};
use crate::infrastructure::cache::ContentCache;

const API_VERSION: &str = "2022-11-28";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";

/// GitHub REST client.
///
/// Every call attaches the request-scoped token (see
/// [`with_request_github_token`](super::with_request_github_token)) or, failing
/// that, the configured token, and otherwise goes out anonymously. Calls are
/// never retried.
pub struct GitHubClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    cache: Arc<dyn ContentCache>,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig, cache: Arc<dyn ContentCache>) -> Result<Self, RetrievalError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| RetrievalError::Configuration(e.to_string()))?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            RetrievalError::Configuration(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RetrievalError::Configuration(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            token: config.token.clone().filter(|t| !t.is_empty()),
            cache,
        })
    }

    fn token(&self) -> Option<String> {
        current_request_github_token().or_else(|| self.token.clone())
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(segments.into_iter().filter(|s| !s.is_empty()));
        }
        url
    }

    fn contents_url(&self, repo: &RepoRef, path: &str) -> Url {
        let base = ["repos", repo.owner.as_str(), repo.repo.as_str(), "contents"];
        self.endpoint(base.into_iter().chain(path.split('/')))
    }

    async fn get(&self, url: Url, accept: &str) -> Result<Response, RetrievalError> {
        let token = self.token();
        debug!(url = %url, authenticated = token.is_some(), "GitHub API request");

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        Ok(request.send().await?)
    }

    /// Map a non-success status onto the retrieval taxonomy.
    ///
    /// `path` is the repository-relative path the call addressed; empty means
    /// the repository itself, so a 404 there reports the repository missing.
    async fn ensure_success(
        response: Response,
        repo: &RepoRef,
        path: &str,
    ) -> Result<Response, RetrievalError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let resource = if path.is_empty() {
            repo.full_name()
        } else {
            format!("{}/{}", repo, path)
        };

        let (remaining, reset) = rate_limit_headers(response.headers());
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);

        let error = match status {
            StatusCode::NOT_FOUND if path.is_empty() => RetrievalError::not_found(resource.as_str()),
            StatusCode::NOT_FOUND => RetrievalError::path_not_found(repo.full_name(), path),
            StatusCode::TOO_MANY_REQUESTS => RetrievalError::RateLimited { message, reset },
            StatusCode::FORBIDDEN
                if remaining == Some(0) || message.to_lowercase().contains("rate limit") =>
            {
                RetrievalError::RateLimited { message, reset }
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                RetrievalError::Forbidden { message }
            }
            other => RetrievalError::Upstream {
                status: other.as_u16(),
                message,
            },
        };

        if error.is_rate_limited() {
            warn!(resource = %resource, reset = ?reset, "GitHub rate limit exhausted");
        } else {
            debug!(resource = %resource, status = %status, error = %error, "GitHub API call failed");
        }
        Err(error)
    }

    /// Raw text of one file.
    async fn fetch_raw(&self, repo: &RepoRef, path: &str) -> Result<String, RetrievalError> {
        let url = self.contents_url(repo, path);
        let response = Self::ensure_success(self.get(url, RAW_MEDIA_TYPE).await?, repo, path).await?;
        Ok(response.text().await?)
    }

    pub async fn fetch_metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, RetrievalError> {
        let url = self.endpoint(["repos", repo.owner.as_str(), repo.repo.as_str()]);
        let response = Self::ensure_success(self.get(url, JSON_MEDIA_TYPE).await?, repo, "").await?;

        let body: RepoResponse = response.json().await?;
        body.into_metadata()
            .ok_or_else(|| RetrievalError::not_found(repo.full_name()))
    }

    pub async fn fetch_tree(&self, repo: &RepoRef) -> Result<Vec<FileTreeNode>, RetrievalError> {
        let mut url = self.endpoint([
            "repos",
            repo.owner.as_str(),
            repo.repo.as_str(),
            "git",
            "trees",
            "HEAD",
        ]);
        url.query_pairs_mut().append_pair("recursive", "1");

        let response = self.get(url, JSON_MEDIA_TYPE).await?;
        // 409 Conflict: "Git Repository is empty"
        if response.status() == StatusCode::CONFLICT {
            debug!(repo = %repo, "Repository has no commits; using empty tree");
            return Ok(Vec::new());
        }
        let response = Self::ensure_success(response, repo, "").await?;

        let body: TreeResponse = response.json().await?;
        if body.truncated {
            warn!(repo = %repo, entries = body.tree.len(), "GitHub truncated the recursive tree listing");
        }

        Ok(build_tree(
            body.tree.into_iter().filter_map(|item| item.into_entry()),
        ))
    }

    pub async fn fetch_important_files(
        &self,
        repo: &RepoRef,
    ) -> Result<ImportantFiles, RetrievalError> {
        let fetches = IMPORTANT_FILES.iter().map(|name| async move {
            match self.fetch_raw(repo, name).await {
                Ok(content) => Ok(Some((*name, content))),
                Err(e) if e.is_not_found() => Ok(None),
                Err(e) => Err(e),
            }
        });

        let files: ImportantFiles = try_join_all(fetches).await?.into_iter().flatten().collect();
        debug!(repo = %repo, count = files.len(), "Fetched important files");
        Ok(files)
    }

    /// One directory level, cached for the configured TTL.
    pub async fn list_contents(
        &self,
        repo: &RepoRef,
        path: &str,
    ) -> Result<Vec<FileTreeNode>, RetrievalError> {
        let key = self.cache_key("contents", repo, path);
        self.cached(key, || async {
            let url = self.contents_url(repo, path);
            let response =
                Self::ensure_success(self.get(url, JSON_MEDIA_TYPE).await?, repo, path).await?;

            let mut nodes: Vec<FileTreeNode> = match response.json::<ContentsResponse>().await? {
                ContentsResponse::Listing(items) => items.into_iter().map(Into::into).collect(),
                ContentsResponse::Single(item) => vec![item.into()],
            };
            nodes.sort_by(sibling_order);
            Ok(nodes)
        })
        .await
    }

    /// Raw file text, cached for the configured TTL.
    pub async fn fetch_file(&self, repo: &RepoRef, path: &str) -> Result<String, RetrievalError> {
        let key = self.cache_key("file", repo, path);
        self.cached(key, || self.fetch_raw(repo, path)).await
    }

    /// Cache keys carry a fingerprint of the credential so content fetched
    /// with one token is never served to a request without it.
    fn cache_key(&self, kind: &str, repo: &RepoRef, path: &str) -> String {
        let scope = match self.token() {
            Some(token) => {
                let digest = Sha256::digest(token.as_bytes());
                format!("auth-{}", &hex::encode(digest)[..16])
            }
            None => "anon".to_string(),
        };
        format!("{}:{}:{}/{}/{}", kind, scope, repo.owner, repo.repo, path)
    }

    async fn cached<T, F, Fut>(&self, key: String, fetch: F) -> Result<T, RetrievalError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, RetrievalError>>,
    {
        if let Some(bytes) = self.cache.get(&key).await {
            match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    debug!(key = %key, "Content cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Dropping undecodable cache entry");
                    self.cache.invalidate(&key).await;
                }
            }
        }

        let value = fetch().await?;
        match serde_json::to_vec(&value) {
            Ok(bytes) => self.cache.set(&key, bytes).await,
            Err(e) => warn!(key = %key, error = %e, "Failed to serialize cache entry"),
        }
        Ok(value)
    }
}

fn rate_limit_headers(headers: &HeaderMap) -> (Option<u64>, Option<u64>) {
    let parse = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    };
    (parse("x-ratelimit-remaining"), parse("x-ratelimit-reset"))
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn fetch_metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, RetrievalError> {
        GitHubClient::fetch_metadata(self, repo).await
    }

    async fn fetch_tree(&self, repo: &RepoRef) -> Result<Vec<FileTreeNode>, RetrievalError> {
        GitHubClient::fetch_tree(self, repo).await
    }

    async fn fetch_important_files(
        &self,
        repo: &RepoRef,
    ) -> Result<ImportantFiles, RetrievalError> {
        GitHubClient::fetch_important_files(self, repo).await
    }

    async fn list_contents(
        &self,
        repo: &RepoRef,
        path: &str,
    ) -> Result<Vec<FileTreeNode>, RetrievalError> {
        GitHubClient::list_contents(self, repo, path).await
    }

    async fn fetch_file(&self, repo: &RepoRef, path: &str) -> Result<String, RetrievalError> {
        GitHubClient::fetch_file(self, repo, path).await
    }
}

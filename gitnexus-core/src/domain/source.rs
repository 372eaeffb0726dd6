//! Retrieval seam between the pipeline and GitHub

use async_trait::async_trait;

use super::errors::RetrievalError;
use super::repository::{FileTreeNode, ImportantFiles, RepoMetadata, RepoRef};

/// Source of repository data for analysis and browsing.
///
/// Implementations attach the request-scoped credential when one is present
/// and perform no internal retry.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Repository metadata. A repository that cannot be resolved is `NotFound`.
    async fn fetch_metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, RetrievalError>;

    /// Root-level nodes of the full tree. An empty repository yields an empty list.
    async fn fetch_tree(&self, repo: &RepoRef) -> Result<Vec<FileTreeNode>, RetrievalError>;

    /// Contents of the allow-listed important files that exist.
    async fn fetch_important_files(
        &self,
        repo: &RepoRef,
    ) -> Result<ImportantFiles, RetrievalError>;

    /// One directory level, directories first then by name.
    async fn list_contents(
        &self,
        repo: &RepoRef,
        path: &str,
    ) -> Result<Vec<FileTreeNode>, RetrievalError>;

    /// Raw text of a single file.
    async fn fetch_file(&self, repo: &RepoRef, path: &str) -> Result<String, RetrievalError>;
}

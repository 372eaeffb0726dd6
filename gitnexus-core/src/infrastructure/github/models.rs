//! GitHub REST wire types

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{FileTreeNode, NodeType, RepoMetadata, TreeEntry};

/// `GET /repos/{owner}/{repo}`
#[derive(Debug, Deserialize)]
pub(crate) struct RepoResponse {
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub size: u64,
    pub license: Option<LicenseResponse>,
    pub default_branch: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LicenseResponse {
    pub name: Option<String>,
    pub spdx_id: Option<String>,
}

impl RepoResponse {
    /// `None` when the payload does not identify a repository.
    pub fn into_metadata(self) -> Option<RepoMetadata> {
        let full_name = self.full_name.filter(|n| !n.trim().is_empty())?;
        let license = self.license.and_then(|l| {
            l.name
                .filter(|n| !n.is_empty())
                .or(l.spdx_id.filter(|id| id != "NOASSERTION"))
        });

        Some(RepoMetadata {
            full_name,
            description: self.description.filter(|d| !d.trim().is_empty()),
            language: self.language,
            stars: self.stargazers_count,
            forks: self.forks_count,
            open_issues: self.open_issues_count,
            size_kb: self.size,
            license,
            default_branch: self.default_branch.unwrap_or_else(|| "main".to_string()),
            created_at: self.created_at.unwrap_or_default(),
            updated_at: self.updated_at.unwrap_or_default(),
        })
    }
}

/// `GET /repos/{owner}/{repo}/git/trees/{ref}?recursive=1`
#[derive(Debug, Deserialize)]
pub(crate) struct TreeResponse {
    #[serde(default)]
    pub tree: Vec<TreeItem>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeItem {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: Option<u64>,
}

impl TreeItem {
    pub fn into_entry(self) -> Option<TreeEntry> {
        let node_type = match self.kind.as_str() {
            "blob" => NodeType::File,
            // Submodules ("commit") are shown as opaque directories
            "tree" | "commit" => NodeType::Directory,
            _ => return None,
        };
        Some(TreeEntry {
            path: self.path,
            node_type,
            size: self.size.unwrap_or(0),
        })
    }
}

/// `GET /repos/{owner}/{repo}/contents/{path}` returns a list for
/// directories and a single object for files.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ContentsResponse {
    Listing(Vec<ContentItem>),
    Single(ContentItem),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentItem {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub size: u64,
}

impl From<ContentItem> for FileTreeNode {
    fn from(item: ContentItem) -> Self {
        let node_type = if item.kind == "dir" {
            NodeType::Directory
        } else {
            NodeType::File
        };
        FileTreeNode {
            name: item.name,
            path: item.path,
            node_type,
            size: item.size,
            children: None,
        }
    }
}

/// Error payload returned by the REST API
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}

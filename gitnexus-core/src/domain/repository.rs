//! Repository model shared by retrieval, statistics and prompt compilation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Files fetched for context, in rendering order.
pub const IMPORTANT_FILES: &[&str] = &[
    "package.json",
    "README.md",
    "Cargo.toml",
    "pyproject.toml",
    "requirements.txt",
    "go.mod",
    "pom.xml",
    "tsconfig.json",
    "Dockerfile",
    "docker-compose.yml",
];

/// Owner/name pair identifying a repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Immutable snapshot of repository metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoMetadata {
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    /// Repository size as reported by GitHub, in KB
    pub size_kb: u64,
    pub license: Option<String>,
    pub default_branch: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Directory,
}

/// A node in the repository file tree.
///
/// `path` is the `/`-joined chain of ancestor names and is unique within a
/// repository. Children are only populated for nodes built from a recursive
/// listing; browsing listings leave them empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FileTreeNode {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(no_recursion)]
    pub children: Option<Vec<FileTreeNode>>,
}

impl FileTreeNode {
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        let path = path.into();
        Self {
            name: last_segment(&path).to_string(),
            path,
            node_type: NodeType::File,
            size,
            children: None,
        }
    }

    pub fn directory(path: impl Into<String>, children: Vec<FileTreeNode>) -> Self {
        let path = path.into();
        Self {
            name: last_segment(&path).to_string(),
            path,
            node_type: NodeType::Directory,
            size: 0,
            children: Some(children),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.node_type == NodeType::Directory
    }

    pub fn children(&self) -> &[FileTreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Directories first, then by name.
pub fn sibling_order(a: &FileTreeNode, b: &FileTreeNode) -> std::cmp::Ordering {
    b.is_dir().cmp(&a.is_dir()).then_with(|| a.name.cmp(&b.name))
}

/// One entry of a flat recursive listing
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEntry {
    pub path: String,
    pub node_type: NodeType,
    pub size: u64,
}

#[derive(Default)]
struct NodeBuilder {
    node_type: Option<NodeType>,
    size: u64,
    children: BTreeMap<String, NodeBuilder>,
}

impl NodeBuilder {
    fn into_node(self, path: String, name: String) -> FileTreeNode {
        // Anything with descendants is a directory, whatever the listing said
        let node_type = if self.children.is_empty() {
            self.node_type.unwrap_or(NodeType::Directory)
        } else {
            NodeType::Directory
        };

        let children = match node_type {
            NodeType::File => None,
            NodeType::Directory => Some(build_level(self.children, Some(&path))),
        };

        FileTreeNode {
            name,
            path,
            node_type,
            size: self.size,
            children,
        }
    }
}

fn build_level(level: BTreeMap<String, NodeBuilder>, parent: Option<&str>) -> Vec<FileTreeNode> {
    let mut nodes: Vec<FileTreeNode> = level
        .into_iter()
        .map(|(name, builder)| {
            let path = match parent {
                Some(parent) => format!("{}/{}", parent, name),
                None => name.clone(),
            };
            builder.into_node(path, name)
        })
        .collect();
    nodes.sort_by(sibling_order);
    nodes
}

/// Fold a flat recursive listing into a nested tree.
///
/// Returns the root-level nodes, siblings sorted directories-first then by
/// name. Duplicate paths collapse into one node.
pub fn build_tree(entries: impl IntoIterator<Item = TreeEntry>) -> Vec<FileTreeNode> {
    let mut root: BTreeMap<String, NodeBuilder> = BTreeMap::new();

    for entry in entries {
        let segments: Vec<&str> = entry.path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((last, ancestors)) = segments.split_last() else {
            continue;
        };

        let mut level = &mut root;
        for segment in ancestors {
            level = &mut level.entry((*segment).to_string()).or_default().children;
        }

        let node = level.entry((*last).to_string()).or_default();
        node.node_type = Some(entry.node_type);
        node.size = entry.size;
    }

    build_level(root, None)
}

/// Aggregate counts over a file tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    pub total_files: usize,
    pub total_directories: usize,
    pub languages: BTreeMap<String, usize>,
}

impl FileStats {
    pub fn language_count(&self, language: &str) -> usize {
        self.languages.get(language).copied().unwrap_or(0)
    }
}

/// A fetched important file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportantFile {
    pub name: String,
    pub content: String,
}

/// Important files keyed by name, kept in insertion order.
///
/// Files that do not exist in the repository are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportantFiles {
    files: Vec<ImportantFile>,
}

impl ImportantFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the content for `name`.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let name = name.into();
        let content = content.into();
        match self.files.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.content = content,
            None => self.files.push(ImportantFile { name, content }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.content.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImportantFile> {
        self.files.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for ImportantFiles {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut files = Self::new();
        for (name, content) in iter {
            files.insert(name, content);
        }
        files
    }
}

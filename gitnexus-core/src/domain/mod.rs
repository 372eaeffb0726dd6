//! Domain layer - repository model and the retrieval seam

pub mod errors;
pub mod repository;
pub mod source;

pub use errors::RetrievalError;
pub use repository::{
    FileStats, FileTreeNode, IMPORTANT_FILES, ImportantFile, ImportantFiles, NodeType,
    RepoMetadata, RepoRef, TreeEntry, build_tree,
};
pub use source::RepositorySource;

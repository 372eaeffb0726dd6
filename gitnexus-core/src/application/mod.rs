//! Application layer

pub mod statistics;

pub use statistics::{
    DEFAULT_TREE_MAX_ENTRIES, OTHER_LANGUAGE, TreeSummary, calculate_file_stats,
    compact_tree_string, language_for_file, summarize_tree,
};

//! Statistics reducer
//!
//! Turns a retrieved file tree into [`FileStats`] and a compact, size-bounded
//! text rendering used as prompt context.
//!
//! The rendering is a depth-first pre-order walk. Siblings are visited
//! directories-first and then by name, whatever order the input arrives in.
//! Each line is the node's full path, and directories carry a trailing `/`.
//! Once `max_entries` lines are written, the walk keeps counting nodes and
//! emits a final `... +N more` line naming how many were left out.

use crate::domain::repository::sibling_order;
use crate::domain::{FileStats, FileTreeNode};

/// Bucket for files whose extension is not in the language table
pub const OTHER_LANGUAGE: &str = "Other";

/// Default ceiling for the compact tree rendering
pub const DEFAULT_TREE_MAX_ENTRIES: usize = 50;

/// Output of a single reduction pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSummary {
    pub stats: FileStats,
    pub compact_tree: String,
}

/// Compute statistics and the compact rendering in one call
pub fn summarize_tree(tree: &[FileTreeNode], max_entries: usize) -> TreeSummary {
    TreeSummary {
        stats: calculate_file_stats(tree),
        compact_tree: compact_tree_string(tree, max_entries),
    }
}

/// Count files and directories, and bucket files by language.
///
/// Directories count towards `total_directories` only.
pub fn calculate_file_stats(tree: &[FileTreeNode]) -> FileStats {
    let mut stats = FileStats::default();
    accumulate(tree, &mut stats);
    stats
}

fn accumulate(nodes: &[FileTreeNode], stats: &mut FileStats) {
    for node in nodes {
        if node.is_dir() {
            stats.total_directories += 1;
            accumulate(node.children(), stats);
        } else {
            stats.total_files += 1;
            *stats
                .languages
                .entry(language_for_file(&node.name).to_string())
                .or_insert(0) += 1;
        }
    }
}

/// Render at most `max_entries` nodes, followed by an omitted-count marker
/// when the tree is larger.
pub fn compact_tree_string(tree: &[FileTreeNode], max_entries: usize) -> String {
    let mut lines = Vec::with_capacity(max_entries.min(256));
    let mut total = 0usize;
    render(tree, max_entries, &mut lines, &mut total);

    let omitted = total - lines.len();
    if omitted > 0 {
        lines.push(format!("... +{} more", omitted));
    }
    lines.join("\n")
}

fn render(nodes: &[FileTreeNode], max_entries: usize, lines: &mut Vec<String>, total: &mut usize) {
    let mut ordered: Vec<&FileTreeNode> = nodes.iter().collect();
    ordered.sort_by(|a, b| sibling_order(a, b));

    for node in ordered {
        *total += 1;
        if lines.len() < max_entries {
            if node.is_dir() {
                lines.push(format!("{}/", node.path));
            } else {
                lines.push(node.path.clone());
            }
        }
        render(node.children(), max_entries, lines, total);
    }
}

/// Language for a file name, keyed by extension.
///
/// A few extensionless build files are recognised by name; everything else
/// without a known extension falls into [`OTHER_LANGUAGE`].
pub fn language_for_file(name: &str) -> &'static str {
    match name {
        "Dockerfile" => return "Dockerfile",
        "Makefile" | "GNUmakefile" => return "Makefile",
        _ => {}
    }

    let Some((stem, ext)) = name.rsplit_once('.') else {
        return OTHER_LANGUAGE;
    };
    // ".gitignore" and friends have no extension
    if stem.is_empty() {
        return OTHER_LANGUAGE;
    }

    match ext.to_ascii_lowercase().as_str() {
        "ts" | "tsx" | "mts" | "cts" => "TypeScript",
        "js" | "jsx" | "mjs" | "cjs" => "JavaScript",
        "rs" => "Rust",
        "py" | "pyi" => "Python",
        "go" => "Go",
        "java" => "Java",
        "kt" | "kts" => "Kotlin",
        "scala" => "Scala",
        "rb" => "Ruby",
        "php" => "PHP",
        "cs" => "C#",
        "c" | "h" => "C",
        "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => "C++",
        "m" | "mm" => "Objective-C",
        "swift" => "Swift",
        "dart" => "Dart",
        "lua" => "Lua",
        "ex" | "exs" => "Elixir",
        "erl" | "hrl" => "Erlang",
        "hs" => "Haskell",
        "clj" | "cljs" => "Clojure",
        "r" => "R",
        "jl" => "Julia",
        "zig" => "Zig",
        "vue" => "Vue",
        "svelte" => "Svelte",
        "html" | "htm" => "HTML",
        "css" => "CSS",
        "scss" | "sass" => "SCSS",
        "less" => "Less",
        "md" | "mdx" => "Markdown",
        "rst" => "reStructuredText",
        "json" => "JSON",
        "yml" | "yaml" => "YAML",
        "toml" => "TOML",
        "xml" => "XML",
        "sql" => "SQL",
        "sh" | "bash" | "zsh" => "Shell",
        "ps1" => "PowerShell",
        "proto" => "Protocol Buffers",
        "graphql" | "gql" => "GraphQL",
        "tf" => "HCL",
        _ => OTHER_LANGUAGE,
    }
}

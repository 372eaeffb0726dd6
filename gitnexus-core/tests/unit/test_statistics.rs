//! Tests for the statistics reducer

use rstest::rstest;

use gitnexus_core::application::{
    OTHER_LANGUAGE, calculate_file_stats, compact_tree_string, language_for_file, summarize_tree,
};
use gitnexus_core::domain::{FileTreeNode, NodeType, TreeEntry, build_tree};

fn wide_tree(files: usize) -> Vec<FileTreeNode> {
    let entries = std::iter::once(TreeEntry {
        path: "pkg".to_string(),
        node_type: NodeType::Directory,
        size: 0,
    })
    .chain((0..files).map(|i| TreeEntry {
        path: format!("pkg/module_{:03}.py", i),
        node_type: NodeType::File,
        size: 100,
    }));
    build_tree(entries)
}

#[rstest]
#[case("main.rs", "Rust")]
#[case("index.ts", "TypeScript")]
#[case("component.jsx", "JavaScript")]
#[case("setup.py", "Python")]
#[case("go.mod", OTHER_LANGUAGE)]
#[case("main.go", "Go")]
#[case("README.md", "Markdown")]
#[case("docker-compose.yml", "YAML")]
#[case("Makefile", "Makefile")]
#[case(".env", OTHER_LANGUAGE)]
fn test_language_for_file(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(language_for_file(name), expected);
}

#[rstest]
#[case(0, 1)]
#[case(10, 10)]
#[case(50, 50)]
#[case(51, 50)]
fn test_compact_tree_never_exceeds_budget(#[case] files: usize, #[case] max_entries: usize) {
    let tree = wide_tree(files);
    let rendered = compact_tree_string(&tree, max_entries);
    let lines: Vec<&str> = rendered.lines().collect();
    let total_nodes = files + 1;

    if total_nodes > max_entries {
        assert_eq!(lines.len(), max_entries + 1);
        assert_eq!(
            lines.last().copied(),
            Some(format!("... +{} more", total_nodes - max_entries).as_str())
        );
    } else {
        assert_eq!(lines.len(), total_nodes);
        assert!(!rendered.contains("more"));
    }
}

#[test]
fn test_zero_budget_reports_everything_as_omitted() {
    let rendered = compact_tree_string(&wide_tree(2), 0);
    assert_eq!(rendered, "... +3 more");
}

#[test]
fn test_summarize_tree_matches_individual_passes() {
    let tree = wide_tree(12);
    let summary = summarize_tree(&tree, 5);

    assert_eq!(summary.stats, calculate_file_stats(&tree));
    assert_eq!(summary.compact_tree, compact_tree_string(&tree, 5));
    assert_eq!(summary.stats.total_files, 12);
    assert_eq!(summary.stats.total_directories, 1);
    assert_eq!(summary.stats.language_count("Python"), 12);
}

#[test]
fn test_stats_sum_matches_file_count() {
    let tree = build_tree(
        ["a.rs", "b.ts", "c.unknown", "d/e.rs", "d/f/g.md"]
            .into_iter()
            .map(|path| TreeEntry {
                path: path.to_string(),
                node_type: NodeType::File,
                size: 1,
            }),
    );
    let stats = calculate_file_stats(&tree);

    assert_eq!(stats.total_files, 5);
    assert_eq!(stats.total_directories, 2);
    assert_eq!(stats.languages.values().sum::<usize>(), stats.total_files);
}

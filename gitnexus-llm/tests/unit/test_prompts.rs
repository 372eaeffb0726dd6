//! Unit tests for the context compiler and prompt templates

use rstest::rstest;

use gitnexus_core::domain::{FileStats, ImportantFiles};
use gitnexus_llm::infrastructure::prompts::{
    ANALYSIS_INSTRUCTIONS, ContextCompiler, PromptLimits, SCHEMA_FIELDS, SYSTEM_PROMPT,
};

#[allow(dead_code)]
mod common {
    include!("../common/mod.rs");
}

use common::{SAMPLE_TREE, sample_files, sample_metadata, sample_stats};

fn compile_default() -> String {
    ContextCompiler::default()
        .compile(&sample_metadata(), &sample_stats(), SAMPLE_TREE, &sample_files())
        .into_string()
}

#[test]
fn test_system_prompt_demands_raw_json() {
    assert!(SYSTEM_PROMPT.contains("strictly valid JSON"));
    assert!(SYSTEM_PROMPT.contains("Do not output markdown code blocks"));
}

#[test]
fn test_compile_is_deterministic() {
    assert_eq!(compile_default(), compile_default());
}

#[test]
fn test_overview_section() {
    let prompt = compile_default();

    assert!(prompt.contains("## REPOSITORY OVERVIEW"));
    assert!(prompt.contains("| **Repository** | octocat/Hello-World |"));
    assert!(prompt.contains("| **Description** | My first repository on GitHub! |"));
    assert!(prompt.contains("| **Primary Language** | TypeScript |"));
    assert!(prompt.contains("| **Stars** | 2,345,678 |"));
    assert!(prompt.contains("| **Forks** | 1,234 |"));
    assert!(prompt.contains("| **Open Issues** | 42 |"));
    assert!(prompt.contains("| **Size** | 5.0 MB |"));
    assert!(prompt.contains("| **License** | MIT License |"));
}

#[test]
fn test_missing_metadata_fields_use_placeholders() {
    let mut metadata = sample_metadata();
    metadata.description = None;
    metadata.language = Some("   ".to_string());
    metadata.license = None;

    let prompt = ContextCompiler::default()
        .compile(&metadata, &sample_stats(), SAMPLE_TREE, &sample_files())
        .into_string();

    assert!(prompt.contains("| **Description** | Not provided |"));
    assert!(prompt.contains("| **Primary Language** | Unknown |"));
    assert!(prompt.contains("| **License** | Not specified |"));
}

#[test]
fn test_sections_appear_in_order() {
    let prompt = compile_default();
    let positions: Vec<usize> = [
        "## REPOSITORY OVERVIEW",
        "## CODEBASE STATISTICS",
        "## PROJECT STRUCTURE",
        "## DETECTED CONFIGURATION",
        "## KEY FILES CONTENT",
        "# ANALYSIS INSTRUCTIONS",
    ]
    .iter()
    .map(|heading| prompt.find(heading).unwrap_or_else(|| panic!("missing {heading}")))
    .collect();

    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(prompt.ends_with(ANALYSIS_INSTRUCTIONS));
}

#[test]
fn test_schema_fields_are_requested() {
    let prompt = compile_default();
    for field in SCHEMA_FIELDS {
        assert!(prompt.contains(&format!("\"{}\"", field)), "missing {field}");
    }
}

#[test]
fn test_languages_sorted_by_count() {
    let prompt = compile_default();
    let ts = prompt.find("  - TypeScript: 80 files").unwrap();
    let json = prompt.find("  - JSON: 20 files").unwrap();
    let md = prompt.find("  - Markdown: 12 files").unwrap();
    let css = prompt.find("  - CSS: 8 files").unwrap();
    assert!(ts < json && json < md && md < css);
}

#[rstest]
#[case(2, true)]
#[case(4, false)]
#[case(10, false)]
fn test_language_cap(#[case] top_languages: usize, #[case] overflow: bool) {
    let limits = PromptLimits {
        top_languages,
        ..Default::default()
    };
    let prompt = ContextCompiler::new(limits)
        .compile(&sample_metadata(), &sample_stats(), SAMPLE_TREE, &sample_files())
        .into_string();

    assert_eq!(prompt.contains("more languages"), overflow);
    if overflow {
        assert!(prompt.contains("  - ... and 2 more languages"));
        assert!(!prompt.contains("  - Markdown: 12 files"));
    }
}

#[test]
fn test_equal_counts_break_ties_by_name() {
    let mut stats = FileStats {
        total_files: 6,
        ..Default::default()
    };
    for lang in ["Rust", "Go", "Python"] {
        stats.languages.insert(lang.to_string(), 2);
    }

    let prompt = ContextCompiler::default()
        .compile(&sample_metadata(), &stats, "", &ImportantFiles::new())
        .into_string();

    let go = prompt.find("  - Go: 2 files").unwrap();
    let python = prompt.find("  - Python: 2 files").unwrap();
    let rust = prompt.find("  - Rust: 2 files").unwrap();
    assert!(go < python && python < rust);
}

#[test]
fn test_tree_is_fenced_verbatim() {
    let prompt = compile_default();
    assert!(prompt.contains(&format!("## PROJECT STRUCTURE\n\n```\n{}\n```", SAMPLE_TREE)));
}

#[test]
fn test_detected_configuration() {
    let prompt = compile_default();

    assert!(prompt.contains("✅ TypeScript project"));
    assert!(prompt.contains("✅ Has test files/directory"));
    assert!(prompt.contains("✅ CI/CD pipeline configured"));
    assert!(prompt.contains("⚠️ Limited documentation"));
    assert!(!prompt.contains("Docker configuration found"));
}

#[test]
fn test_package_json_dependencies_rendered() {
    let prompt = compile_default();

    assert!(prompt.contains("### Dependencies (1 packages)"));
    assert!(prompt.contains("- express: ^4.18.2"));
    assert!(prompt.contains("### Dev Dependencies (1 packages)"));
    assert!(prompt.contains("- vitest: ^1.0.0"));
    assert!(prompt.contains("### NPM Scripts"));
    assert!(prompt.contains("- `test`: vitest"));
}

#[test]
fn test_dependency_list_is_capped() {
    let deps: Vec<String> = (0..25)
        .map(|i| format!("\"pkg-{:02}\":\"1.0.{}\"", i, i))
        .collect();
    let manifest = format!("{{\"dependencies\":{{{}}}}}", deps.join(","));
    let files: ImportantFiles = [("package.json", manifest.as_str())].into_iter().collect();

    let prompt = ContextCompiler::default()
        .compile(&sample_metadata(), &sample_stats(), SAMPLE_TREE, &files)
        .into_string();

    assert!(prompt.contains("### Dependencies (25 packages)"));
    assert!(prompt.contains("- pkg-19: 1.0.19"));
    assert!(!prompt.contains("- pkg-20: 1.0.20"));
    assert!(prompt.contains("... and 5 more"));
}

#[test]
fn test_file_contents_truncated_to_budget() {
    let readme = "é".repeat(50);
    let files: ImportantFiles = [("README.md", readme.as_str())].into_iter().collect();
    let limits = PromptLimits {
        file_char_budget: 10,
        ..Default::default()
    };

    let prompt = ContextCompiler::new(limits)
        .compile(&sample_metadata(), &sample_stats(), SAMPLE_TREE, &files)
        .into_string();

    assert!(prompt.contains(&format!("### README.md\n```\n{}\n```", "é".repeat(10))));
    assert!(!prompt.contains(&"é".repeat(11)));
}

#[test]
fn test_key_files_keep_fetch_order() {
    let prompt = compile_default();
    let package = prompt.find("### package.json").unwrap();
    let readme = prompt.find("### README.md").unwrap();
    assert!(package < readme);
}

#[test]
fn test_no_key_files() {
    let prompt = ContextCompiler::default()
        .compile(&sample_metadata(), &sample_stats(), SAMPLE_TREE, &ImportantFiles::new())
        .into_string();

    assert!(prompt.contains("_No key files found._"));
    assert!(!prompt.contains("### Dependencies"));
}

#[test]
fn test_default_limits() {
    let limits = PromptLimits::default();
    assert_eq!(limits.file_char_budget, 4000);
    assert_eq!(limits.top_languages, 10);
}

//! Context compiler
//!
//! Renders repository metadata, statistics, the compact tree and key file
//! contents into a single prompt. The output is a pure function of its
//! inputs: maps are ordered, and nothing reads the clock or environment.
//!
//! Rendering rules:
//! - the overview is a markdown table with fixed labels; size is `size_kb / 1024`
//!   shown with one decimal as `MB`; counts use `,` thousands separators;
//! - languages are sorted by count (descending) then name, capped at
//!   `top_languages`, with an `... and N more languages` line for the rest;
//! - each key file is cut to `file_char_budget` characters (not bytes);
//! - manifests list at most 20 dependencies and 15 dev-dependencies.

use std::collections::BTreeMap;
use tracing::debug;

use gitnexus_core::config::AnalysisConfig;
use gitnexus_core::domain::{FileStats, ImportantFiles, RepoMetadata};

use super::templates::{ANALYSIS_INSTRUCTIONS, ANALYSIS_INTRO};

pub const DEFAULT_FILE_CHAR_BUDGET: usize = 4000;
pub const DEFAULT_TOP_LANGUAGES: usize = 10;
const MAX_DEPENDENCIES: usize = 20;
const MAX_DEV_DEPENDENCIES: usize = 15;

/// Bounds applied while rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptLimits {
    pub file_char_budget: usize,
    pub top_languages: usize,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            file_char_budget: DEFAULT_FILE_CHAR_BUDGET,
            top_languages: DEFAULT_TOP_LANGUAGES,
        }
    }
}

impl From<&AnalysisConfig> for PromptLimits {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            file_char_budget: config.file_char_budget,
            top_languages: config.top_languages,
        }
    }
}

/// A fully rendered prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPrompt(String);

impl CompiledPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl std::fmt::Display for CompiledPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Project traits guessed from the rendered tree.
///
/// These are substring matches and nothing more: "testimonials/" counts as
/// tests, and anything past the tree ceiling is invisible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub has_tests: bool,
    pub has_ci: bool,
    pub has_docs: bool,
    pub has_docker: bool,
    pub has_typescript: bool,
}

pub fn detect_features(compact_tree: &str, stats: &FileStats) -> FeatureFlags {
    let tree = compact_tree.to_lowercase();
    let any = |needles: &[&str]| needles.iter().any(|n| tree.contains(n));

    FeatureFlags {
        has_tests: any(&["test", "spec", "__tests__"]),
        has_ci: any(&[".github/workflows", ".circleci", "jenkinsfile"]),
        has_docs: any(&["docs/", "documentation"]),
        has_docker: any(&["dockerfile", "docker-compose"]),
        has_typescript: any(&["tsconfig"]) || stats.language_count("TypeScript") > 0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    PackageJson,
    CargoToml,
}

impl ManifestKind {
    fn scripts_heading(&self) -> &'static str {
        match self {
            ManifestKind::PackageJson => "NPM Scripts",
            ManifestKind::CargoToml => "Scripts",
        }
    }
}

/// Dependency, dev-dependency and script maps from a project manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSummary {
    pub kind: ManifestKind,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub scripts: BTreeMap<String, String>,
}

/// Parse the first manifest present, `package.json` before `Cargo.toml`.
///
/// A manifest that fails to parse is treated as absent.
pub fn parse_manifest(files: &ImportantFiles) -> Option<ManifestSummary> {
    if let Some(content) = files.get("package.json") {
        match parse_package_json(content) {
            Some(summary) => return Some(summary),
            None => debug!("package.json is not valid JSON; ignoring"),
        }
    }
    if let Some(content) = files.get("Cargo.toml") {
        match parse_cargo_toml(content) {
            Some(summary) => return Some(summary),
            None => debug!("Cargo.toml is not valid TOML; ignoring"),
        }
    }
    None
}

fn parse_package_json(content: &str) -> Option<ManifestSummary> {
    let value: serde_json::Value = serde_json::from_str(content).ok()?;
    let object = value.as_object()?;

    let section = |key: &str| -> BTreeMap<String, String> {
        object
            .get(key)
            .and_then(|v| v.as_object())
            .map(|map| {
                map.iter()
                    .map(|(name, v)| {
                        let version = v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
                        (name.clone(), version)
                    })
                    .collect()
            })
            .unwrap_or_default()
    };

    Some(ManifestSummary {
        kind: ManifestKind::PackageJson,
        dependencies: section("dependencies"),
        dev_dependencies: section("devDependencies"),
        scripts: section("scripts"),
    })
}

fn parse_cargo_toml(content: &str) -> Option<ManifestSummary> {
    let table: toml::Table = content.parse().ok()?;

    let section = |key: &str| -> BTreeMap<String, String> {
        table
            .get(key)
            .and_then(|v| v.as_table())
            .map(|deps| {
                deps.iter()
                    .map(|(name, spec)| (name.clone(), cargo_version(spec)))
                    .collect()
            })
            .unwrap_or_default()
    };

    Some(ManifestSummary {
        kind: ManifestKind::CargoToml,
        dependencies: section("dependencies"),
        dev_dependencies: section("dev-dependencies"),
        scripts: BTreeMap::new(),
    })
}

fn cargo_version(spec: &toml::Value) -> String {
    match spec {
        toml::Value::String(version) => version.clone(),
        toml::Value::Table(table) => {
            if let Some(version) = table.get("version").and_then(|v| v.as_str()) {
                version.to_string()
            } else if table.get("workspace").and_then(|v| v.as_bool()) == Some(true) {
                "workspace".to_string()
            } else if table.contains_key("path") {
                "path".to_string()
            } else if table.contains_key("git") {
                "git".to_string()
            } else {
                "*".to_string()
            }
        }
        other => other.to_string(),
    }
}

/// Builds analysis prompts
#[derive(Debug, Clone, Default)]
pub struct ContextCompiler {
    limits: PromptLimits,
}

impl ContextCompiler {
    pub fn new(limits: PromptLimits) -> Self {
        Self { limits }
    }

    pub fn compile(
        &self,
        metadata: &RepoMetadata,
        stats: &FileStats,
        compact_tree: &str,
        files: &ImportantFiles,
    ) -> CompiledPrompt {
        let features = detect_features(compact_tree, stats);
        let manifest = parse_manifest(files);

        let mut lines: Vec<String> = vec![ANALYSIS_INTRO.to_string(), "---".to_string()];
        lines.extend(overview_section(metadata));
        lines.extend(statistics_section(stats, self.limits.top_languages));
        lines.push("## PROJECT STRUCTURE".to_string());
        lines.push(String::new());
        lines.push("```".to_string());
        lines.push(compact_tree.to_string());
        lines.push("```".to_string());
        lines.push(String::new());
        lines.extend(configuration_section(&features, manifest.as_ref()));
        lines.extend(files_section(files, self.limits.file_char_budget));
        lines.push("---".to_string());
        lines.push(String::new());
        lines.push(ANALYSIS_INSTRUCTIONS.to_string());

        CompiledPrompt(lines.join("\n"))
    }
}

fn overview_section(metadata: &RepoMetadata) -> Vec<String> {
    let or = |value: &Option<String>, fallback: &str| {
        value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    };
    let size_mb = metadata.size_kb as f64 / 1024.0;

    vec![
        String::new(),
        "## REPOSITORY OVERVIEW".to_string(),
        String::new(),
        "| Attribute | Value |".to_string(),
        "|-----------|-------|".to_string(),
        format!("| **Repository** | {} |", metadata.full_name),
        format!("| **Description** | {} |", or(&metadata.description, "Not provided")),
        format!("| **Primary Language** | {} |", or(&metadata.language, "Unknown")),
        format!("| **Stars** | {} |", with_thousands(metadata.stars)),
        format!("| **Forks** | {} |", with_thousands(metadata.forks)),
        format!("| **Open Issues** | {} |", with_thousands(metadata.open_issues)),
        format!("| **Size** | {:.1} MB |", size_mb),
        format!("| **License** | {} |", or(&metadata.license, "Not specified")),
        format!("| **Last Updated** | {} |", metadata.updated_at.to_rfc3339()),
        format!("| **Created** | {} |", metadata.created_at.to_rfc3339()),
        String::new(),
    ]
}

fn statistics_section(stats: &FileStats, top_languages: usize) -> Vec<String> {
    let mut lines = vec![
        "## CODEBASE STATISTICS".to_string(),
        String::new(),
        format!("- **Total Files**: {}", stats.total_files),
        format!("- **Total Directories**: {}", stats.total_directories),
        "- **Language Distribution**:".to_string(),
    ];

    let mut languages: Vec<(&String, &usize)> = stats.languages.iter().collect();
    languages.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    if languages.is_empty() {
        lines.push("  - (no files)".to_string());
    }
    lines.extend(
        languages
            .iter()
            .take(top_languages)
            .map(|(lang, count)| format!("  - {}: {} files", lang, count)),
    );
    if languages.len() > top_languages {
        lines.push(format!(
            "  - ... and {} more languages",
            languages.len() - top_languages
        ));
    }
    lines.push(String::new());
    lines
}

fn configuration_section(features: &FeatureFlags, manifest: Option<&ManifestSummary>) -> Vec<String> {
    let flag = |on: bool, yes: &str, no: &str| {
        if on { format!("✅ {}", yes) } else { format!("⚠️ {}", no) }
    };

    let mut lines = vec![
        "## DETECTED CONFIGURATION".to_string(),
        String::new(),
        "_Best-effort signals inferred from file names; verify against the file contents._"
            .to_string(),
        String::new(),
    ];
    if features.has_typescript {
        lines.push("✅ TypeScript project".to_string());
    }
    lines.push(flag(
        features.has_tests,
        "Has test files/directory",
        "No obvious test setup detected",
    ));
    lines.push(flag(
        features.has_ci,
        "CI/CD pipeline configured",
        "No CI configuration found",
    ));
    lines.push(flag(
        features.has_docs,
        "Documentation present",
        "Limited documentation",
    ));
    if features.has_docker {
        lines.push("✅ Docker configuration found".to_string());
    }
    lines.push(String::new());

    if let Some(manifest) = manifest {
        lines.extend(dependency_list(
            "Dependencies",
            &manifest.dependencies,
            MAX_DEPENDENCIES,
        ));
        lines.extend(dependency_list(
            "Dev Dependencies",
            &manifest.dev_dependencies,
            MAX_DEV_DEPENDENCIES,
        ));
        if !manifest.scripts.is_empty() {
            lines.push(format!("### {}", manifest.kind.scripts_heading()));
            lines.extend(
                manifest
                    .scripts
                    .iter()
                    .map(|(name, cmd)| format!("- `{}`: {}", name, cmd)),
            );
            lines.push(String::new());
        }
    }
    lines
}

fn dependency_list(title: &str, deps: &BTreeMap<String, String>, max: usize) -> Vec<String> {
    if deps.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("### {} ({} packages)", title, deps.len())];
    lines.extend(
        deps.iter()
            .take(max)
            .map(|(name, version)| format!("- {}: {}", name, version)),
    );
    if deps.len() > max {
        lines.push(format!("... and {} more", deps.len() - max));
    }
    lines.push(String::new());
    lines
}

fn files_section(files: &ImportantFiles, budget: usize) -> Vec<String> {
    let mut lines = vec!["## KEY FILES CONTENT".to_string(), String::new()];
    if files.is_empty() {
        lines.push("_No key files found._".to_string());
        lines.push(String::new());
    }
    for file in files.iter() {
        lines.push(format!("### {}", file.name));
        lines.push("```".to_string());
        lines.push(truncate_chars(&file.content, budget).to_string());
        lines.push("```".to_string());
        lines.push(String::new());
    }
    lines
}

/// Prefix of at most `max` characters, cut on a char boundary
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

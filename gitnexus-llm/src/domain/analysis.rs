//! Structured health report produced from the model's JSON.
//!
//! Every field defaults when absent, `null` or of the wrong type, so that a
//! model straying from part of the schema still yields a usable report. List
//! fields keep the elements that fit and drop the rest. Enum fields map values
//! outside their documented set onto an explicit `other`/`unknown` variant.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Field value, or its default when it is `null` or does not fit the type
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Elements that fit `T`; anything other than an array is an empty list
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}

fn lenient_optional_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| T::deserialize(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

/// Repository health report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "lenient")]
    pub summary: String,
    #[serde(deserialize_with = "lenient")]
    pub project_type: ProjectType,
    #[serde(deserialize_with = "lenient")]
    pub maturity: Maturity,
    #[serde(deserialize_with = "lenient_list")]
    pub tech_stack: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub scores: Scores,
    #[serde(deserialize_with = "lenient_list")]
    pub insights: Vec<Insight>,
    #[serde(deserialize_with = "lenient_list")]
    pub architecture: Vec<ArchitectureComponent>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyHealth>,
    #[serde(
        deserialize_with = "lenient_optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub quick_wins: Option<Vec<String>>,
    #[serde(
        deserialize_with = "lenient_optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub long_term_improvements: Option<Vec<String>>,
    /// Set only on canned reports produced in demo mode
    #[serde(deserialize_with = "lenient", skip_serializing_if = "std::ops::Not::not")]
    pub demo: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    WebApp,
    Api,
    Library,
    Cli,
    Mobile,
    Desktop,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    Prototype,
    Alpha,
    Beta,
    Production,
    Mature,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Scores on a 0-100 scale. Values are passed through as the model gave them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Scores {
    #[serde(deserialize_with = "lenient")]
    pub overall: f64,
    #[serde(deserialize_with = "lenient")]
    pub code_quality: f64,
    #[serde(deserialize_with = "lenient")]
    pub security: f64,
    #[serde(deserialize_with = "lenient")]
    pub maintainability: f64,
    #[serde(deserialize_with = "lenient")]
    pub documentation: f64,
    #[serde(deserialize_with = "lenient")]
    pub testing: f64,
    #[serde(deserialize_with = "lenient")]
    pub performance: f64,
    #[serde(deserialize_with = "lenient")]
    pub developer_experience: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Insight {
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: InsightType,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Strength,
    Weakness,
    Suggestion,
    Security,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ArchitectureComponent {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: ArchitectureType,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ArchitectureType {
    Frontend,
    Backend,
    Database,
    Service,
    Infra,
    Tool,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DependencyHealth {
    #[serde(deserialize_with = "lenient")]
    pub status: DependencyStatus,
    #[serde(deserialize_with = "lenient")]
    pub outdated: u32,
    #[serde(deserialize_with = "lenient")]
    pub vulnerabilities: u32,
    #[serde(deserialize_with = "lenient_list")]
    pub heaviest: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DependencyStatus {
    Healthy,
    Warning,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

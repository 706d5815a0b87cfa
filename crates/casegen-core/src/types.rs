//! Domain types mirrored from the backend's records.
//!
//! The client holds no authoritative state: every struct here is a
//! transient mirror of a server-owned record, deserialized with the wire
//! names the backend uses (`camelCase` for most fields, `tc_id` and
//! friends as literal snake_case on testcases).

use serde::{Deserialize, Serialize};

/// Display identity decoded from the sign-in credential.
///
/// Persisted to the session store (minus the credential itself) so a
/// restart can restore the signed-in screen without re-authenticating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Value side of the requirement mapping from `GET /requirements`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementInfo {
    pub title: String,
    #[serde(rename = "fileUri")]
    pub file_uri: String,
}

/// One row of `GET /generated` — a requirement that has at least one
/// generated testcase set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummaryEntry {
    /// Generation-set id.
    pub id: String,
    #[serde(rename = "requirementId")]
    pub requirement_id: String,
    #[serde(rename = "requirementTitle")]
    pub requirement_title: String,
    pub count: usize,
}

/// The lazily fetched detail view for one generation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationDetail {
    /// Generation-set id.
    pub id: String,
    #[serde(rename = "requirementId")]
    pub requirement_id: String,
    #[serde(rename = "requirementTitle")]
    pub requirement_title: String,
    #[serde(default)]
    pub testcases: Vec<Testcase>,
    #[serde(rename = "selectedStandards", default)]
    pub selected_standards: Vec<String>,
}

/// A single structured test scenario belonging to a generation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testcase {
    pub tc_id: String,
    pub title: String,
    #[serde(default)]
    pub preconditions: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub expected: String,
    #[serde(default)]
    pub automatable: bool,
    #[serde(default)]
    pub suggested_tool: String,
    /// Model confidence in [0, 1].
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub compliance: Vec<String>,
    /// Once set, treated as immutable by the UI — there is no
    /// "remove ticket" action, only "create" when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_id: Option<String>,
}

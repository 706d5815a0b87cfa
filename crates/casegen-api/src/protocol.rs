//! Request/response payloads for the generation backend.
//!
//! Wire names match what the backend expects (`camelCase` keys).
//! `prompt_override` is omitted entirely when empty rather than sent as
//! an empty string — the backend treats absence as "no override".

use serde::{Deserialize, Serialize};

/// Body of `POST /testcases`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    #[serde(rename = "selectedRequirements")]
    pub selected_requirements: Vec<String>,
    #[serde(rename = "selectedStandards")]
    pub selected_standards: Vec<String>,
    #[serde(rename = "promptOverride", skip_serializing_if = "Option::is_none")]
    pub prompt_override: Option<String>,
}

/// Body of `POST /requirements/{reqId}/regenerate`.
#[derive(Debug, Clone, Serialize)]
pub struct RegenerateRequest {
    #[serde(rename = "selectedStandards")]
    pub selected_standards: Vec<String>,
    #[serde(rename = "promptOverride", skip_serializing_if = "Option::is_none")]
    pub prompt_override: Option<String>,
}

/// Body of `POST /testcases/{genId}/regenerate/{tcId}`.
#[derive(Debug, Clone, Serialize)]
pub struct RegenerateTestcaseRequest {
    #[serde(rename = "promptOverride", skip_serializing_if = "Option::is_none")]
    pub prompt_override: Option<String>,
}

/// Body of `POST /testcases/{genId}/{tcId}/jira`.
#[derive(Debug, Clone, Serialize)]
pub struct JiraRequest {
    /// Blank means "use the backend's default project".
    #[serde(rename = "projectKey")]
    pub project_key: String,
}

/// Response of `POST /requirements/{reqId}/regenerate`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegenerateOutcome {
    pub count: usize,
    #[serde(rename = "genId")]
    pub gen_id: String,
}

/// Response of `POST /upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadStandardResponse {
    pub filename: String,
}

/// Response of `POST /requirements/upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadRequirementResponse {
    pub title: String,
}

/// Response of `POST /testcases/{genId}/{tcId}/jira`.
#[derive(Debug, Clone, Deserialize)]
pub struct JiraCreated {
    /// Raw ticket payload, echoed into the confirmation notice.
    pub jira: serde_json::Value,
}

/// Convert an edit-surface prompt string into the optional wire form.
pub fn prompt_override(prompt: &str) -> Option<String> {
    if prompt.is_empty() {
        None
    } else {
        Some(prompt.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_wire_names() {
        let req = GenerateRequest {
            selected_requirements: vec!["REQ-1".into()],
            selected_standards: vec!["ISO 13485".into()],
            prompt_override: Some("focus on boundaries".into()),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["selectedRequirements"][0], "REQ-1");
        assert_eq!(v["selectedStandards"][0], "ISO 13485");
        assert_eq!(v["promptOverride"], "focus on boundaries");
    }

    #[test]
    fn test_prompt_override_omitted_when_empty() {
        let req = GenerateRequest {
            selected_requirements: vec![],
            selected_standards: vec![],
            prompt_override: prompt_override(""),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("promptOverride"));
    }

    #[test]
    fn test_regenerate_outcome_wire_names() {
        let json = r#"{"count":3,"genId":"gen-9"}"#;
        let out: RegenerateOutcome = serde_json::from_str(json).unwrap();
        assert_eq!(out.count, 3);
        assert_eq!(out.gen_id, "gen-9");
    }

    #[test]
    fn test_jira_request_blank_key_is_sent() {
        // Blank means "use default" on the backend side, so it must be
        // present in the body, not omitted.
        let req = JiraRequest {
            project_key: String::new(),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["projectKey"], "");
    }
}

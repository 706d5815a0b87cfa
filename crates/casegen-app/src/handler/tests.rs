//! Handler tests covering the observable properties of the workflow
//! state machine: selection parity, cache behavior, in-flight gating,
//! the 401 transition, and the editor's refresh handling.

use std::collections::BTreeMap;

use tempfile::TempDir;

use casegen_api::SessionStore;
use casegen_core::{GenerationDetail, GenerationSummaryEntry, Testcase, UserProfile};

use crate::config::Settings;
use crate::handler::{update, UpdateAction};
use crate::message::{ApiFailure, Message};
use crate::state::{AppState, InputPrompt, InputPurpose, Pane, UiMode};

fn settings() -> Settings {
    Settings {
        api_base: "http://localhost:5000".into(),
        google_client_id: "client-id".into(),
    }
}

fn profile() -> UserProfile {
    UserProfile {
        name: "Dana".into(),
        email: "dana@example.com".into(),
        picture: None,
    }
}

fn signed_in_state() -> (AppState, TempDir) {
    let tmp = TempDir::new().unwrap();
    let mut state = AppState::new(settings(), SessionStore::with_dir(tmp.path()));
    state.sign_in(profile(), "token-1".into());
    (state, tmp)
}

fn testcase(tc_id: &str) -> Testcase {
    Testcase {
        tc_id: tc_id.into(),
        title: "Login lockout".into(),
        preconditions: vec!["User exists".into()],
        steps: vec!["Fail login".into()],
        expected: "Locked".into(),
        automatable: true,
        suggested_tool: "Playwright".into(),
        confidence: 0.8,
        compliance: vec!["ISO 13485".into()],
        jira_id: None,
    }
}

fn detail(gen_id: &str) -> GenerationDetail {
    GenerationDetail {
        id: gen_id.into(),
        requirement_id: "REQ-1".into(),
        requirement_title: "Audit trail".into(),
        testcases: vec![testcase("TC-1")],
        selected_standards: vec!["ISO 13485".into()],
    }
}

fn summary_entry(gen_id: &str) -> GenerationSummaryEntry {
    GenerationSummaryEntry {
        id: gen_id.into(),
        requirement_id: "REQ-1".into(),
        requirement_title: "Audit trail".into(),
        count: 1,
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Selection
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_standard_toggle_parity_through_update() {
    let (mut state, _tmp) = signed_in_state();
    state.standards = BTreeMap::from([
        ("ISO 13485".to_string(), "gs://a".to_string()),
        ("ISO 14971".to_string(), "gs://b".to_string()),
    ]);
    state.pane = Pane::Standards;
    state.standard_cursor = 0;

    for i in 1..=5 {
        update(&mut state, Message::ToggleSelected);
        assert_eq!(state.selected_standards.contains("ISO 13485"), i % 2 == 1);
    }
    assert!(state.selected_standards.len() <= 1);
}

#[test]
fn test_generate_rejected_without_requirements() {
    let (mut state, _tmp) = signed_in_state();
    state.selected_standards.toggle("ISO 13485");

    let result = update(&mut state, Message::Generate);
    assert!(result.action.is_none());
    assert_eq!(
        state.notice.as_ref().unwrap().text,
        "Select at least one requirement"
    );
}

#[test]
fn test_generate_rejected_without_standards() {
    let (mut state, _tmp) = signed_in_state();
    state.selected_requirements.toggle("REQ-1");

    let result = update(&mut state, Message::Generate);
    assert!(result.action.is_none());
    assert_eq!(
        state.notice.as_ref().unwrap().text,
        "Select at least one standard"
    );
}

#[test]
fn test_generate_emits_action_with_both_selections() {
    let (mut state, _tmp) = signed_in_state();
    state.selected_requirements.toggle("REQ-1");
    state.selected_standards.toggle("ISO 13485");
    state.prompt_override = "focus on boundaries".into();

    let result = update(&mut state, Message::Generate);
    match result.action {
        Some(UpdateAction::Generate {
            requirements,
            standards,
            prompt,
        }) => {
            assert_eq!(requirements, vec!["REQ-1"]);
            assert_eq!(standards, vec!["ISO 13485"]);
            assert_eq!(prompt, "focus on boundaries");
        }
        other => panic!("expected Generate action, got {other:?}"),
    }
}

#[test]
fn test_second_generate_trigger_dropped_while_in_flight() {
    let (mut state, _tmp) = signed_in_state();
    state.selected_requirements.toggle("REQ-1");
    state.selected_standards.toggle("ISO 13485");

    assert!(update(&mut state, Message::Generate).action.is_some());
    assert!(update(&mut state, Message::Generate).action.is_none());

    // Completion releases the token; a new trigger works again
    update(
        &mut state,
        Message::GenerateFinished { result: Ok(()) },
    );
    assert!(update(&mut state, Message::Generate).action.is_some());
}

// ─────────────────────────────────────────────────────────────────────────
// Detail cache / expand-collapse
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_expand_fetches_once_then_toggles() {
    let (mut state, _tmp) = signed_in_state();
    state.summary.push(summary_entry("g1"));

    // First call: no cache -> fetch
    let result = update(
        &mut state,
        Message::ToggleDetail {
            gen_id: "g1".into(),
            force: false,
        },
    );
    assert_eq!(
        result.action,
        Some(UpdateAction::FetchDetail {
            gen_id: "g1".into(),
            force: false
        })
    );

    // Completion stores and expands
    update(
        &mut state,
        Message::DetailLoaded {
            gen_id: "g1".into(),
            force: false,
            result: Ok(detail("g1")),
        },
    );
    assert!(state.expanded.contains("g1"));

    // Second call with no intervening mutation: pure collapse, no fetch
    let result = update(
        &mut state,
        Message::ToggleDetail {
            gen_id: "g1".into(),
            force: false,
        },
    );
    assert!(result.action.is_none());
    assert!(!state.expanded.contains("g1"));

    // Third call: cache is fresh -> expand without fetching
    let result = update(
        &mut state,
        Message::ToggleDetail {
            gen_id: "g1".into(),
            force: false,
        },
    );
    assert!(result.action.is_none());
    assert!(state.expanded.contains("g1"));
}

#[test]
fn test_force_always_fetches() {
    let (mut state, _tmp) = signed_in_state();
    state.summary.push(summary_entry("g1"));
    state.details.insert(detail("g1"));
    state.expanded.insert("g1".into());

    let result = update(
        &mut state,
        Message::ToggleDetail {
            gen_id: "g1".into(),
            force: true,
        },
    );
    assert_eq!(
        result.action,
        Some(UpdateAction::FetchDetail {
            gen_id: "g1".into(),
            force: true
        })
    );
}

#[test]
fn test_mutation_invalidates_cached_detail() {
    let (mut state, _tmp) = signed_in_state();
    state.summary.push(summary_entry("g1"));
    state.details.insert(detail("g1"));

    let result = update(
        &mut state,
        Message::TestcaseSaved {
            gen_id: "g1".into(),
            tc_id: "TC-1".into(),
            result: Ok(()),
        },
    );
    // Refresh is forced...
    assert_eq!(
        result.action,
        Some(UpdateAction::RefreshAfterMutation {
            gen_id: "g1".into()
        })
    );
    // ...and even a call site that forgets `force` cannot see the
    // pre-mutation copy.
    assert!(state.details.fresh("g1").is_none());
    let result = update(
        &mut state,
        Message::ToggleDetail {
            gen_id: "g1".into(),
            force: false,
        },
    );
    assert!(matches!(
        result.action,
        Some(UpdateAction::FetchDetail { .. })
    ));
}

// ─────────────────────────────────────────────────────────────────────────
// Session / 401
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_unauthorized_clears_session_and_storage() {
    let (mut state, _tmp) = signed_in_state();
    assert!(state.session_persisted());
    state.standards.insert("ISO 13485".into(), "gs://a".into());
    state.prompt_override = "extra".into();

    update(
        &mut state,
        Message::SummaryLoaded {
            result: Err(ApiFailure::Unauthorized),
        },
    );

    assert!(!state.auth.is_signed_in());
    assert!(!state.session_persisted());
    assert!(state.standards.is_empty());
    assert!(state.prompt_override.is_empty());
    // Silent: no notice raised
    assert!(state.notice.is_none());
}

#[test]
fn test_empty_credential_keeps_signed_out_without_store_write() {
    let tmp = TempDir::new().unwrap();
    let mut state = AppState::new(settings(), SessionStore::with_dir(tmp.path()));
    state.signin_buffer = String::new();

    let result = update(&mut state, Message::SubmitCredential);
    assert!(result.action.is_none());
    assert!(!state.auth.is_signed_in());
    assert_eq!(
        state.auth.sign_in_error(),
        Some("Google sign-in returned an empty credential.")
    );
    assert!(!state.session_persisted());
}

#[test]
fn test_undecodable_credential_message() {
    let tmp = TempDir::new().unwrap();
    let mut state = AppState::new(settings(), SessionStore::with_dir(tmp.path()));
    state.signin_buffer = "not-a-jwt".into();

    update(&mut state, Message::SubmitCredential);
    assert_eq!(
        state.auth.sign_in_error(),
        Some("Unable to verify Google credential. Please try again.")
    );
}

// ─────────────────────────────────────────────────────────────────────────
// Uploads
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_upload_with_empty_path_is_local_failure() {
    let (mut state, _tmp) = signed_in_state();
    state.input = Some(InputPrompt {
        title: "Path of standard file to upload".into(),
        purpose: InputPurpose::UploadStandardPath,
        buffer: "   ".into(),
    });
    state.ui_mode = UiMode::Input;

    let result = update(&mut state, Message::InputSubmitted);
    assert!(result.action.is_none());
    assert_eq!(state.notice.as_ref().unwrap().text, "Choose a standard file");
}

#[test]
fn test_upload_success_refetches_standards() {
    let (mut state, _tmp) = signed_in_state();
    state.input = Some(InputPrompt {
        title: "Path of standard file to upload".into(),
        purpose: InputPurpose::UploadStandardPath,
        buffer: "/docs/iso13485.pdf".into(),
    });
    state.ui_mode = UiMode::Input;

    let result = update(&mut state, Message::InputSubmitted);
    assert_eq!(
        result.action,
        Some(UpdateAction::UploadStandard {
            path: "/docs/iso13485.pdf".into()
        })
    );

    let result = update(
        &mut state,
        Message::StandardUploaded {
            result: Ok("iso13485.pdf".into()),
        },
    );
    assert_eq!(result.action, Some(UpdateAction::FetchStandards));
    assert_eq!(state.notice.as_ref().unwrap().text, "Standard uploaded");
}

// ─────────────────────────────────────────────────────────────────────────
// Regeneration
// ─────────────────────────────────────────────────────────────────────────

fn submit_regenerate_prompt(state: &mut AppState, prompt: &str) -> super::UpdateResult {
    state.input = Some(InputPrompt {
        title: "Regenerate".into(),
        purpose: InputPurpose::RegenerateRequirementPrompt {
            req_id: "REQ-1".into(),
            gen_id: "g1".into(),
        },
        buffer: prompt.into(),
    });
    state.ui_mode = UiMode::Input;
    update(state, Message::InputSubmitted)
}

#[test]
fn test_regenerate_uses_retained_params_without_fetch() {
    let (mut state, _tmp) = signed_in_state();
    state.summary.push(summary_entry("g1"));
    // A prior detail load recorded the standards used originally
    update(
        &mut state,
        Message::DetailLoaded {
            gen_id: "g1".into(),
            force: false,
            result: Ok(detail("g1")),
        },
    );

    let result = submit_regenerate_prompt(&mut state, "tighter steps");
    match result.action {
        Some(UpdateAction::RegenerateRequirement {
            req_id,
            standards,
            prompt,
        }) => {
            assert_eq!(req_id, "REQ-1");
            assert_eq!(standards, vec!["ISO 13485"]);
            assert_eq!(prompt, "tighter steps");
        }
        other => panic!("expected RegenerateRequirement, got {other:?}"),
    }
}

#[test]
fn test_regenerate_falls_back_to_detail_fetch() {
    let (mut state, _tmp) = signed_in_state();
    state.summary.push(summary_entry("g1"));

    let result = submit_regenerate_prompt(&mut state, "");
    assert_eq!(
        result.action,
        Some(UpdateAction::FetchDetailForRegenerate {
            req_id: "REQ-1".into(),
            gen_id: "g1".into(),
            prompt: String::new(),
        })
    );

    // The fallback fetch recovers the standards and chains the call
    let result = update(
        &mut state,
        Message::DetailForRegenerateLoaded {
            req_id: "REQ-1".into(),
            prompt: String::new(),
            result: Ok(detail("g1")),
        },
    );
    assert!(matches!(
        result.action,
        Some(UpdateAction::RegenerateRequirement { .. })
    ));
}

#[test]
fn test_regenerate_fallback_with_no_standards_fails_locally() {
    let (mut state, _tmp) = signed_in_state();
    state.summary.push(summary_entry("g1"));
    submit_regenerate_prompt(&mut state, "");

    let mut empty = detail("g1");
    empty.selected_standards.clear();
    let result = update(
        &mut state,
        Message::DetailForRegenerateLoaded {
            req_id: "REQ-1".into(),
            prompt: String::new(),
            result: Ok(empty),
        },
    );
    assert!(result.action.is_none());
    assert_eq!(
        state.notice.as_ref().unwrap().text,
        "No standards found in the original generation"
    );
    // Token released: a new attempt is allowed
    let result = submit_regenerate_prompt(&mut state, "");
    assert!(result.action.is_some());
}

#[test]
fn test_regenerate_success_refreshes_summary_and_detail() {
    use casegen_api::RegenerateOutcome;

    let (mut state, _tmp) = signed_in_state();
    state.summary.push(summary_entry("g1"));
    state.details.insert(detail("g1"));
    submit_regenerate_prompt(&mut state, "");

    let result = update(
        &mut state,
        Message::RequirementRegenerated {
            req_id: "REQ-1".into(),
            result: Ok(RegenerateOutcome {
                count: 5,
                gen_id: "g2".into(),
            }),
        },
    );
    assert_eq!(
        result.action,
        Some(UpdateAction::RefreshAfterMutation {
            gen_id: "g2".into()
        })
    );
    assert_eq!(
        state.notice.as_ref().unwrap().text,
        "Regenerated: 5 testcases created"
    );
}

// ─────────────────────────────────────────────────────────────────────────
// Editor refresh handling
// ─────────────────────────────────────────────────────────────────────────

fn open_editor(state: &mut AppState) {
    state.summary.push(summary_entry("g1"));
    update(
        state,
        Message::DetailLoaded {
            gen_id: "g1".into(),
            force: false,
            result: Ok(detail("g1")),
        },
    );
    state.generated_cursor = 1; // the TC-1 row under the g1 header
    let result = update(state, Message::BeginEdit);
    assert!(result.action.is_none());
    assert!(state.editor.is_some());
}

#[test]
fn test_dirty_draft_survives_refresh_until_confirmed() {
    let (mut state, _tmp) = signed_in_state();
    open_editor(&mut state);

    // Dirty the draft
    if let Some(editor) = state.editor.as_mut() {
        editor.draft.title = "My edit".into();
    }

    // A forced refresh lands with changed server content
    let mut refreshed = detail("g1");
    refreshed.testcases[0].title = "Server copy".into();
    update(
        &mut state,
        Message::DetailLoaded {
            gen_id: "g1".into(),
            force: true,
            result: Ok(refreshed),
        },
    );

    assert_eq!(state.ui_mode, UiMode::ConfirmDiscard);
    assert_eq!(state.editor.as_ref().unwrap().draft.title, "My edit");

    // Declining keeps the edits
    update(&mut state, Message::CancelDiscard);
    assert_eq!(state.ui_mode, UiMode::EditTestcase);
    assert_eq!(state.editor.as_ref().unwrap().draft.title, "My edit");
}

#[test]
fn test_confirm_discard_resets_draft_from_server_copy() {
    let (mut state, _tmp) = signed_in_state();
    open_editor(&mut state);
    if let Some(editor) = state.editor.as_mut() {
        editor.draft.title = "My edit".into();
    }

    let mut refreshed = detail("g1");
    refreshed.testcases[0].title = "Server copy".into();
    update(
        &mut state,
        Message::DetailLoaded {
            gen_id: "g1".into(),
            force: true,
            result: Ok(refreshed),
        },
    );
    update(&mut state, Message::ConfirmDiscard);

    assert_eq!(state.ui_mode, UiMode::EditTestcase);
    assert_eq!(state.editor.as_ref().unwrap().draft.title, "Server copy");
}

#[test]
fn test_clean_draft_refreshes_silently() {
    let (mut state, _tmp) = signed_in_state();
    open_editor(&mut state);

    let mut refreshed = detail("g1");
    refreshed.testcases[0].title = "Server copy".into();
    update(
        &mut state,
        Message::DetailLoaded {
            gen_id: "g1".into(),
            force: true,
            result: Ok(refreshed),
        },
    );

    assert_eq!(state.ui_mode, UiMode::EditTestcase);
    assert_eq!(state.editor.as_ref().unwrap().draft.title, "Server copy");
}

#[test]
fn test_save_success_exits_editor_and_forces_refresh() {
    let (mut state, _tmp) = signed_in_state();
    open_editor(&mut state);

    let result = update(&mut state, Message::EditorSave);
    assert!(matches!(
        result.action,
        Some(UpdateAction::SaveTestcase { .. })
    ));

    let result = update(
        &mut state,
        Message::TestcaseSaved {
            gen_id: "g1".into(),
            tc_id: "TC-1".into(),
            result: Ok(()),
        },
    );
    assert!(state.editor.is_none());
    assert_eq!(state.ui_mode, UiMode::Workflow);
    assert_eq!(
        result.action,
        Some(UpdateAction::RefreshAfterMutation {
            gen_id: "g1".into()
        })
    );
}

#[test]
fn test_second_save_trigger_dropped_while_in_flight() {
    let (mut state, _tmp) = signed_in_state();
    open_editor(&mut state);

    assert!(update(&mut state, Message::EditorSave).action.is_some());
    assert!(update(&mut state, Message::EditorSave).action.is_none());
}

// ─────────────────────────────────────────────────────────────────────────
// Jira
// ─────────────────────────────────────────────────────────────────────────

#[test]
fn test_jira_cancel_makes_no_call() {
    let (mut state, _tmp) = signed_in_state();
    state.input = Some(InputPrompt {
        title: "Enter Jira project key (leave blank to use default):".into(),
        purpose: InputPurpose::JiraProjectKey {
            gen_id: "g1".into(),
            tc_id: "TC-1".into(),
        },
        buffer: "HC".into(),
    });
    state.ui_mode = UiMode::Input;

    let result = update(&mut state, Message::InputCancelled);
    assert!(result.action.is_none());
    assert!(state.input.is_none());
    assert!(!state.inflight.holds(
        crate::inflight::Operation::CreateJira,
        "TC-1"
    ));
}

#[test]
fn test_jira_blank_key_is_submitted() {
    let (mut state, _tmp) = signed_in_state();
    state.input = Some(InputPrompt {
        title: "Enter Jira project key (leave blank to use default):".into(),
        purpose: InputPurpose::JiraProjectKey {
            gen_id: "g1".into(),
            tc_id: "TC-1".into(),
        },
        buffer: String::new(),
    });
    state.ui_mode = UiMode::Input;

    let result = update(&mut state, Message::InputSubmitted);
    assert_eq!(
        result.action,
        Some(UpdateAction::CreateJira {
            gen_id: "g1".into(),
            tc_id: "TC-1".into(),
            project_key: String::new(),
        })
    );
}

#[test]
fn test_jira_success_refreshes_summary_and_detail() {
    let (mut state, _tmp) = signed_in_state();
    state.details.insert(detail("g1"));

    let result = update(
        &mut state,
        Message::JiraFiled {
            gen_id: "g1".into(),
            tc_id: "TC-1".into(),
            result: Ok(serde_json::json!({"key": "HC-42"})),
        },
    );
    assert_eq!(
        result.action,
        Some(UpdateAction::RefreshAfterMutation {
            gen_id: "g1".into()
        })
    );
    assert!(state.details.fresh("g1").is_none());
}

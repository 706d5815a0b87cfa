//! Network completion handlers.
//!
//! Every in-flight token is released here on both success and error
//! paths, so the UI always returns to an interactive state. A 401 on
//! any completion silently forces the sign-out transition instead of
//! raising a notice.

use std::collections::BTreeMap;

use casegen_api::RegenerateOutcome;
use casegen_core::prelude::*;
use casegen_core::{GenerationDetail, GenerationSummaryEntry, RequirementInfo};

use crate::inflight::{Operation, Token};
use crate::message::{ApiFailure, ApiResult};
use crate::state::{AppState, GenerationParams, UiMode};

use super::{UpdateAction, UpdateResult};

/// Surface a failure per the taxonomy: 401 -> silent sign-out,
/// server-reported -> notice with the raw payload, transport -> generic
/// notice.
fn surface_failure(
    state: &mut AppState,
    failure: ApiFailure,
    server_prefix: &str,
    transport_text: &str,
) {
    match failure {
        ApiFailure::Unauthorized => {
            info!("received 401; forcing sign-out");
            state.sign_out();
        }
        ApiFailure::Server { status, body } => {
            warn!("server error {status}: {body}");
            state.notify_error(format!("{server_prefix}{body}"));
        }
        ApiFailure::Transport(message) => {
            warn!("transport error: {message}");
            state.notify_error(transport_text);
        }
    }
}

/// Listing fetch failures are logged but not surfaced, except that a
/// 401 still forces sign-out.
fn quiet_failure(state: &mut AppState, failure: ApiFailure, what: &str) {
    match failure {
        ApiFailure::Unauthorized => {
            info!("received 401 fetching {what}; forcing sign-out");
            state.sign_out();
        }
        ApiFailure::Server { status, body } => {
            warn!("fetching {what} failed ({status}): {body}");
        }
        ApiFailure::Transport(message) => {
            warn!("fetching {what} failed: {message}");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Listings
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_standards_loaded(
    state: &mut AppState,
    result: ApiResult<BTreeMap<String, String>>,
) -> UpdateResult {
    match result {
        Ok(standards) => {
            state.standards = standards;
            state.clamp_cursors();
        }
        Err(failure) => quiet_failure(state, failure, "standards"),
    }
    UpdateResult::none()
}

pub fn handle_requirements_loaded(
    state: &mut AppState,
    result: ApiResult<BTreeMap<String, RequirementInfo>>,
) -> UpdateResult {
    match result {
        Ok(requirements) => {
            state.requirements = requirements;
            state.clamp_cursors();
        }
        Err(failure) => quiet_failure(state, failure, "requirements"),
    }
    UpdateResult::none()
}

pub fn handle_summary_loaded(
    state: &mut AppState,
    result: ApiResult<Vec<GenerationSummaryEntry>>,
) -> UpdateResult {
    match result {
        Ok(summary) => {
            state.summary = summary;
            state.clamp_cursors();
        }
        Err(failure) => quiet_failure(state, failure, "generation summary"),
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Detail views
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_detail_loaded(
    state: &mut AppState,
    gen_id: String,
    _force: bool,
    result: ApiResult<GenerationDetail>,
) -> UpdateResult {
    match result {
        Ok(detail) => {
            // Record the standards this set was generated against so a
            // later whole-set regeneration needs no extra fetch.
            if !detail.selected_standards.is_empty() {
                state
                    .generation_params
                    .entry(gen_id.clone())
                    .or_insert_with(|| GenerationParams {
                        standards: Vec::new(),
                        prompt: String::new(),
                    })
                    .standards = detail.selected_standards.clone();
            }

            // A refresh may land while the editor holds a draft for one
            // of this set's testcases. A clean draft resets silently; a
            // dirty one parks the incoming copy behind a confirmation.
            let mut close_editor = false;
            if let Some(editor) = state.editor.as_mut() {
                if editor.gen_id == gen_id {
                    let tc_id = editor.tc_id().to_string();
                    match detail.testcases.iter().find(|tc| tc.tc_id == tc_id) {
                        Some(incoming) => {
                            if editor.on_canonical_replaced(incoming) {
                                state.ui_mode = UiMode::ConfirmDiscard;
                            }
                        }
                        None => {
                            // The testcase no longer exists in the set
                            debug!("testcase {tc_id} gone after refresh; closing editor");
                            close_editor = true;
                        }
                    }
                }
            }
            if close_editor {
                state.editor = None;
                if matches!(
                    state.ui_mode,
                    UiMode::EditTestcase | UiMode::ConfirmDiscard
                ) {
                    state.ui_mode = UiMode::Workflow;
                }
            }

            state.details.insert(detail);
            state.expanded.insert(gen_id);
            state.clamp_cursors();
            UpdateResult::none()
        }
        Err(ApiFailure::Unauthorized) => {
            info!("received 401 fetching detail; forcing sign-out");
            state.sign_out();
            UpdateResult::none()
        }
        Err(ApiFailure::Server { status, body }) => {
            warn!("detail fetch failed ({status}): {body}");
            state.notify_error(format!("No testcases: {body}"));
            UpdateResult::none()
        }
        Err(ApiFailure::Transport(message)) => {
            warn!("detail fetch failed: {message}");
            state.notify_error("Error loading testcases");
            UpdateResult::none()
        }
    }
}

/// Completion of the fallback fetch that recovers the standards list
/// for a whole-set regeneration. The regeneration token stays held
/// across the chained call; it is released here only on failure.
pub fn handle_detail_for_regenerate(
    state: &mut AppState,
    req_id: String,
    prompt: String,
    result: ApiResult<GenerationDetail>,
) -> UpdateResult {
    let token = Token::new(Operation::RegenerateRequirement, &req_id);
    match result {
        Ok(detail) => {
            if detail.selected_standards.is_empty() {
                state.inflight.finish(&token);
                state.notify_error("No standards found in the original generation");
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::RegenerateRequirement {
                req_id,
                standards: detail.selected_standards,
                prompt,
            })
        }
        Err(ApiFailure::Unauthorized) => {
            state.inflight.finish(&token);
            state.sign_out();
            UpdateResult::none()
        }
        Err(failure) => {
            state.inflight.finish(&token);
            debug!("regenerate precheck failed: {failure:?}");
            state.notify_error("Unable to load generated set");
            UpdateResult::none()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mutations
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_generate_finished(state: &mut AppState, result: ApiResult<()>) -> UpdateResult {
    state.inflight.finish(&Token::global(Operation::Generate));
    match result {
        Ok(()) => {
            state.notify_info("Testcases generated");
            // The authoritative summary is always re-fetched; the inline
            // generation payload is never trusted.
            UpdateResult::action(UpdateAction::FetchSummary)
        }
        Err(failure) => {
            surface_failure(state, failure, "Generation failed: ", "Generation error");
            UpdateResult::none()
        }
    }
}

pub fn handle_standard_uploaded(
    state: &mut AppState,
    result: ApiResult<String>,
) -> UpdateResult {
    state
        .inflight
        .finish(&Token::global(Operation::UploadStandard));
    match result {
        Ok(filename) => {
            debug!("standard uploaded: {filename}");
            state.notify_info("Standard uploaded");
            UpdateResult::action(UpdateAction::FetchStandards)
        }
        Err(failure) => {
            surface_failure(state, failure, "Upload failed: ", "Upload error");
            UpdateResult::none()
        }
    }
}

pub fn handle_requirement_uploaded(
    state: &mut AppState,
    result: ApiResult<String>,
) -> UpdateResult {
    state
        .inflight
        .finish(&Token::global(Operation::UploadRequirement));
    match result {
        Ok(title) => {
            state.notify_info(format!("Requirement uploaded: {title}"));
            UpdateResult::action(UpdateAction::FetchRequirements)
        }
        Err(failure) => {
            surface_failure(state, failure, "Upload failed: ", "Upload error");
            UpdateResult::none()
        }
    }
}

pub fn handle_requirement_regenerated(
    state: &mut AppState,
    req_id: String,
    result: ApiResult<RegenerateOutcome>,
) -> UpdateResult {
    state
        .inflight
        .finish(&Token::new(Operation::RegenerateRequirement, &req_id));
    match result {
        Ok(outcome) => {
            state.notify_info(format!("Regenerated: {} testcases created", outcome.count));
            state.details.invalidate(&outcome.gen_id);
            UpdateResult::action(UpdateAction::RefreshAfterMutation {
                gen_id: outcome.gen_id,
            })
        }
        Err(failure) => {
            surface_failure(state, failure, "Regenerate failed: ", "Error regenerating");
            UpdateResult::none()
        }
    }
}

pub fn handle_testcase_regenerated(
    state: &mut AppState,
    gen_id: String,
    tc_id: String,
    result: ApiResult<()>,
) -> UpdateResult {
    state
        .inflight
        .finish(&Token::new(Operation::RegenerateTestcase, &tc_id));
    match result {
        Ok(()) => {
            state.notify_info("Regenerated");
            state.details.invalidate(&gen_id);
            UpdateResult::action(UpdateAction::RefreshAfterMutation { gen_id })
        }
        Err(failure) => {
            surface_failure(state, failure, "Regenerate failed: ", "Error regenerating");
            UpdateResult::none()
        }
    }
}

pub fn handle_testcase_saved(
    state: &mut AppState,
    gen_id: String,
    tc_id: String,
    result: ApiResult<()>,
) -> UpdateResult {
    state
        .inflight
        .finish(&Token::new(Operation::SaveTestcase, &tc_id));
    match result {
        Ok(()) => {
            state.notify_info("Saved");
            // Exit edit mode; the forced refresh repaints the panel
            // from fresh server state.
            state.editor = None;
            if state.ui_mode == UiMode::EditTestcase {
                state.ui_mode = UiMode::Workflow;
            }
            state.details.invalidate(&gen_id);
            UpdateResult::action(UpdateAction::RefreshAfterMutation { gen_id })
        }
        Err(failure) => {
            surface_failure(state, failure, "Save failed: ", "Error saving");
            UpdateResult::none()
        }
    }
}

pub fn handle_jira_filed(
    state: &mut AppState,
    gen_id: String,
    tc_id: String,
    result: ApiResult<serde_json::Value>,
) -> UpdateResult {
    state
        .inflight
        .finish(&Token::new(Operation::CreateJira, &tc_id));
    match result {
        Ok(ticket) => {
            state.notify_info(format!("Jira created: {ticket}"));
            state.details.invalidate(&gen_id);
            UpdateResult::action(UpdateAction::RefreshAfterMutation { gen_id })
        }
        Err(failure) => {
            surface_failure(state, failure, "Jira create failed: ", "Jira create error");
            UpdateResult::none()
        }
    }
}

//! User-intent handlers: sign-in, selection, generation, uploads,
//! regeneration triggers, and the testcase editor.

use casegen_api::credential::{decode_credential, CredentialError};
use casegen_core::prelude::*;

use crate::auth::{MSG_EMPTY_CREDENTIAL, MSG_MISSING_EMAIL, MSG_UNVERIFIABLE};
use crate::editor::EditorState;
use crate::inflight::{Operation, Token};
use crate::message::Message;
use crate::state::{AppState, GeneratedRow, InputPrompt, InputPurpose, Pane, UiMode};

use super::{UpdateAction, UpdateResult};

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// Decode the pasted credential and run the sign-in transition.
///
/// Failure keeps the state at SignedOut with a specific message and
/// never writes the session store.
pub fn handle_submit_credential(state: &mut AppState) -> UpdateResult {
    let token = state.signin_buffer.clone();
    match decode_credential(&token) {
        Ok(profile) => {
            info!("signed in as {}", profile.email);
            state.sign_in(profile, token.trim().to_string());
            UpdateResult::action(UpdateAction::LoadWorkspace)
        }
        Err(CredentialError::Empty) => {
            state.sign_in_failed(MSG_EMPTY_CREDENTIAL);
            UpdateResult::none()
        }
        Err(CredentialError::MissingEmail) => {
            state.sign_in_failed(MSG_MISSING_EMAIL);
            UpdateResult::none()
        }
        Err(CredentialError::Malformed) => {
            state.sign_in_failed(MSG_UNVERIFIABLE);
            UpdateResult::none()
        }
    }
}

pub fn handle_sign_out(state: &mut AppState) -> UpdateResult {
    state.sign_out();
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Selection & generation
// ─────────────────────────────────────────────────────────────────────────────

/// Space in a document pane: flip membership in the selection list.
pub fn handle_toggle_selected(state: &mut AppState) -> UpdateResult {
    match state.pane {
        Pane::Requirements => {
            if let Some(id) = state.requirement_at_cursor().map(str::to_string) {
                state.selected_requirements.toggle(&id);
            }
        }
        Pane::Standards => {
            if let Some(name) = state.standard_at_cursor().map(str::to_string) {
                state.selected_standards.toggle(&name);
            }
        }
        Pane::Generated => {}
    }
    UpdateResult::none()
}

/// Request generation. Rejected locally (no network call) unless both
/// selection lists are non-empty.
pub fn handle_generate(state: &mut AppState) -> UpdateResult {
    if state.selected_requirements.is_empty() {
        state.notify_error("Select at least one requirement");
        return UpdateResult::none();
    }
    if state.selected_standards.is_empty() {
        state.notify_error("Select at least one standard");
        return UpdateResult::none();
    }
    if !state.inflight.try_begin(Token::global(Operation::Generate)) {
        debug!("generation already in flight; trigger dropped");
        return UpdateResult::none();
    }

    UpdateResult::action(UpdateAction::Generate {
        requirements: state.selected_requirements.to_vec(),
        standards: state.selected_standards.to_vec(),
        prompt: state.prompt_override.clone(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Generated pane
// ─────────────────────────────────────────────────────────────────────────────

/// Enter on a generated row: toggle a set, open the editor on a case.
pub fn handle_activate(state: &mut AppState) -> UpdateResult {
    match state.generated_row_at_cursor() {
        Some(GeneratedRow::Set { gen_id }) => UpdateResult::message(Message::ToggleDetail {
            gen_id,
            force: false,
        }),
        Some(GeneratedRow::Case { .. }) => handle_begin_edit(state),
        None => UpdateResult::none(),
    }
}

/// Expand/collapse/fetch a generation set's detail view.
///
/// Three-way branch: collapse when expanded, expand from fresh cache,
/// otherwise fetch. `force` always fetches.
pub fn handle_toggle_detail(state: &mut AppState, gen_id: String, force: bool) -> UpdateResult {
    if !force && state.expanded.contains(&gen_id) {
        state.expanded.remove(&gen_id);
        state.clamp_cursors();
        return UpdateResult::none();
    }

    if !force && state.details.fresh(&gen_id).is_some() {
        state.expanded.insert(gen_id);
        return UpdateResult::none();
    }

    UpdateResult::action(UpdateAction::FetchDetail { gen_id, force })
}

/// Open the regenerate prompt for the selected row.
pub fn handle_begin_regenerate(state: &mut AppState) -> UpdateResult {
    match state.generated_row_at_cursor() {
        Some(GeneratedRow::Set { gen_id }) => {
            let Some(entry) = state.summary_entry(&gen_id) else {
                return UpdateResult::none();
            };
            let req_id = entry.requirement_id.clone();
            if state.inflight.holds(Operation::RegenerateRequirement, &req_id) {
                debug!("regeneration for {req_id} already in flight; trigger dropped");
                return UpdateResult::none();
            }
            state.input = Some(InputPrompt {
                title: format!("Regenerate {req_id} — additional instructions (optional)"),
                purpose: InputPurpose::RegenerateRequirementPrompt { req_id, gen_id },
                buffer: String::new(),
            });
            state.ui_mode = UiMode::Input;
            UpdateResult::none()
        }
        Some(GeneratedRow::Case { gen_id, tc_id }) => {
            if state.inflight.holds(Operation::RegenerateTestcase, &tc_id) {
                debug!("regeneration for {tc_id} already in flight; trigger dropped");
                return UpdateResult::none();
            }
            state.input = Some(InputPrompt {
                title: format!("Regenerate {tc_id} — additional instructions (optional)"),
                purpose: InputPurpose::RegenerateTestcasePrompt { gen_id, tc_id },
                buffer: String::new(),
            });
            state.ui_mode = UiMode::Input;
            UpdateResult::none()
        }
        None => UpdateResult::none(),
    }
}

/// Open the Jira project-key prompt for the selected testcase row.
/// Only offered while the testcase has no ticket yet.
pub fn handle_begin_create_jira(state: &mut AppState) -> UpdateResult {
    let Some(GeneratedRow::Case { gen_id, tc_id }) = state.generated_row_at_cursor() else {
        return UpdateResult::none();
    };
    if let Some(tc) = state.find_testcase(&gen_id, &tc_id) {
        if tc.jira_id.is_some() {
            return UpdateResult::none();
        }
    }
    if state.inflight.holds(Operation::CreateJira, &tc_id) {
        debug!("ticket creation for {tc_id} already in flight; trigger dropped");
        return UpdateResult::none();
    }
    state.input = Some(InputPrompt {
        title: "Enter Jira project key (leave blank to use default):".to_string(),
        purpose: InputPurpose::JiraProjectKey { gen_id, tc_id },
        buffer: String::new(),
    });
    state.ui_mode = UiMode::Input;
    UpdateResult::none()
}

/// Open the editor on the selected testcase row.
pub fn handle_begin_edit(state: &mut AppState) -> UpdateResult {
    let Some(GeneratedRow::Case { gen_id, tc_id }) = state.generated_row_at_cursor() else {
        return UpdateResult::none();
    };
    let Some(tc) = state.find_testcase(&gen_id, &tc_id).cloned() else {
        return UpdateResult::none();
    };
    state.editor = Some(EditorState::open(gen_id, &tc));
    state.ui_mode = UiMode::EditTestcase;
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Input modal
// ─────────────────────────────────────────────────────────────────────────────

/// Open the generation prompt-override input, prefilled.
pub fn handle_begin_generation_prompt(state: &mut AppState) -> UpdateResult {
    state.input = Some(InputPrompt {
        title: "Additional instructions (optional)".to_string(),
        purpose: InputPurpose::GenerationPrompt,
        buffer: state.prompt_override.clone(),
    });
    state.ui_mode = UiMode::Input;
    UpdateResult::none()
}

/// Open the upload-path input for the focused document pane.
pub fn handle_begin_upload(state: &mut AppState) -> UpdateResult {
    let (title, purpose) = match state.pane {
        Pane::Standards => (
            "Path of standard file to upload",
            InputPurpose::UploadStandardPath,
        ),
        Pane::Requirements => (
            "Path of requirement file to upload",
            InputPurpose::UploadRequirementPath,
        ),
        Pane::Generated => return UpdateResult::none(),
    };
    state.input = Some(InputPrompt {
        title: title.to_string(),
        purpose,
        buffer: String::new(),
    });
    state.ui_mode = UiMode::Input;
    UpdateResult::none()
}

/// Route a buffer replacement to whichever input is active.
pub fn handle_input_changed(state: &mut AppState, text: String) -> UpdateResult {
    if state.ui_mode == UiMode::SignIn {
        state.signin_buffer = text;
    } else if let Some(input) = state.input.as_mut() {
        input.buffer = text;
    }
    UpdateResult::none()
}

/// Cancel the input modal. No network call is made (for the Jira prompt
/// this is the "user cancelled" abort).
pub fn handle_input_cancelled(state: &mut AppState) -> UpdateResult {
    state.input = None;
    state.ui_mode = UiMode::Workflow;
    UpdateResult::none()
}

/// Submit the input buffer to its purpose.
pub fn handle_input_submitted(state: &mut AppState) -> UpdateResult {
    let Some(input) = state.input.take() else {
        return UpdateResult::none();
    };
    state.ui_mode = UiMode::Workflow;
    let buffer = input.buffer;

    match input.purpose {
        InputPurpose::GenerationPrompt => {
            state.prompt_override = buffer;
            UpdateResult::none()
        }

        InputPurpose::UploadStandardPath => {
            if buffer.trim().is_empty() {
                state.notify_error("Choose a standard file");
                return UpdateResult::none();
            }
            if !state
                .inflight
                .try_begin(Token::global(Operation::UploadStandard))
            {
                debug!("standard upload already in flight; trigger dropped");
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::UploadStandard {
                path: buffer.trim().into(),
            })
        }

        InputPurpose::UploadRequirementPath => {
            if buffer.trim().is_empty() {
                state.notify_error("Choose a requirement file");
                return UpdateResult::none();
            }
            if !state
                .inflight
                .try_begin(Token::global(Operation::UploadRequirement))
            {
                debug!("requirement upload already in flight; trigger dropped");
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::UploadRequirement {
                path: buffer.trim().into(),
            })
        }

        InputPurpose::RegenerateRequirementPrompt { req_id, gen_id } => {
            if !state
                .inflight
                .try_begin(Token::new(Operation::RegenerateRequirement, &req_id))
            {
                debug!("regeneration for {req_id} already in flight; trigger dropped");
                return UpdateResult::none();
            }

            // Retained generation parameters let regeneration proceed
            // without a secondary fetch; absent ones (sets from an
            // earlier run) fall back to re-fetching the detail view
            // solely to recover the standards list.
            match state.generation_params.get(&gen_id) {
                Some(params) if !params.standards.is_empty() => {
                    UpdateResult::action(UpdateAction::RegenerateRequirement {
                        req_id,
                        standards: params.standards.clone(),
                        prompt: buffer,
                    })
                }
                _ => UpdateResult::action(UpdateAction::FetchDetailForRegenerate {
                    req_id,
                    gen_id,
                    prompt: buffer,
                }),
            }
        }

        InputPurpose::RegenerateTestcasePrompt { gen_id, tc_id } => {
            if !state
                .inflight
                .try_begin(Token::new(Operation::RegenerateTestcase, &tc_id))
            {
                debug!("regeneration for {tc_id} already in flight; trigger dropped");
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::RegenerateTestcase {
                gen_id,
                tc_id,
                prompt: buffer,
            })
        }

        InputPurpose::JiraProjectKey { gen_id, tc_id } => {
            if !state
                .inflight
                .try_begin(Token::new(Operation::CreateJira, &tc_id))
            {
                debug!("ticket creation for {tc_id} already in flight; trigger dropped");
                return UpdateResult::none();
            }
            // Blank is permitted: the backend substitutes its default
            // project.
            UpdateResult::action(UpdateAction::CreateJira {
                gen_id,
                tc_id,
                project_key: buffer,
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Testcase editor
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_editor_field_up(state: &mut AppState) -> UpdateResult {
    if let Some(editor) = state.editor.as_mut() {
        editor.select_prev_field();
    }
    UpdateResult::none()
}

pub fn handle_editor_field_down(state: &mut AppState) -> UpdateResult {
    if let Some(editor) = state.editor.as_mut() {
        editor.select_next_field();
    }
    UpdateResult::none()
}

pub fn handle_editor_begin_field(state: &mut AppState) -> UpdateResult {
    if let Some(editor) = state.editor.as_mut() {
        let field = editor.selected_field();
        if !field.is_toggle() {
            editor.editing = Some(editor.draft.field_text(field));
        }
    }
    UpdateResult::none()
}

pub fn handle_editor_input_changed(state: &mut AppState, text: String) -> UpdateResult {
    if let Some(editor) = state.editor.as_mut() {
        if editor.editing.is_some() {
            editor.editing = Some(text);
        }
    }
    UpdateResult::none()
}

pub fn handle_editor_commit_field(state: &mut AppState) -> UpdateResult {
    if let Some(editor) = state.editor.as_mut() {
        if let Some(buffer) = editor.editing.take() {
            let field = editor.selected_field();
            editor.draft.set_field_text(field, buffer);
        }
    }
    UpdateResult::none()
}

pub fn handle_editor_cancel_field(state: &mut AppState) -> UpdateResult {
    if let Some(editor) = state.editor.as_mut() {
        editor.editing = None;
    }
    UpdateResult::none()
}

pub fn handle_editor_toggle(state: &mut AppState) -> UpdateResult {
    if let Some(editor) = state.editor.as_mut() {
        editor.draft.automatable = !editor.draft.automatable;
    }
    UpdateResult::none()
}

/// PATCH the assembled draft.
pub fn handle_editor_save(state: &mut AppState) -> UpdateResult {
    let Some(editor) = state.editor.as_ref() else {
        return UpdateResult::none();
    };
    let tc_id = editor.tc_id().to_string();
    let gen_id = editor.gen_id.clone();
    let testcase = editor.draft.assemble();
    if !state
        .inflight
        .try_begin(Token::new(Operation::SaveTestcase, &tc_id))
    {
        debug!("save for {tc_id} already in flight; trigger dropped");
        return UpdateResult::none();
    }
    UpdateResult::action(UpdateAction::SaveTestcase { gen_id, testcase })
}

/// Close the editor, discarding the draft (the original's Cancel).
pub fn handle_editor_close(state: &mut AppState) -> UpdateResult {
    state.editor = None;
    state.ui_mode = UiMode::Workflow;
    UpdateResult::none()
}

/// User confirmed discarding unsaved edits for an incoming refresh.
pub fn handle_confirm_discard(state: &mut AppState) -> UpdateResult {
    if let Some(editor) = state.editor.as_mut() {
        editor.accept_replacement();
    }
    state.ui_mode = UiMode::EditTestcase;
    UpdateResult::none()
}

/// User chose to keep the unsaved edits.
pub fn handle_cancel_discard(state: &mut AppState) -> UpdateResult {
    if let Some(editor) = state.editor.as_mut() {
        editor.reject_replacement();
    }
    state.ui_mode = UiMode::EditTestcase;
    UpdateResult::none()
}

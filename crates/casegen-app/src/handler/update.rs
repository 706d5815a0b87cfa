//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::AppState;

use super::{completions, keys, workflow, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.quit();
            UpdateResult::none()
        }

        Message::Tick => UpdateResult::none(),

        Message::Key(key) => {
            if let Some(msg) = keys::handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::DismissNotice => {
            state.notice = None;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Session
        // ─────────────────────────────────────────────────────────
        Message::SubmitCredential => workflow::handle_submit_credential(state),
        Message::SignOut => workflow::handle_sign_out(state),

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::NextPane => {
            state.pane = state.pane.next();
            UpdateResult::none()
        }
        Message::PrevPane => {
            state.pane = state.pane.prev();
            UpdateResult::none()
        }
        Message::MoveUp => {
            state.move_cursor_up();
            UpdateResult::none()
        }
        Message::MoveDown => {
            state.move_cursor_down();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Selection & generation
        // ─────────────────────────────────────────────────────────
        Message::ToggleSelected => workflow::handle_toggle_selected(state),
        Message::Generate => workflow::handle_generate(state),
        Message::BeginGenerationPrompt => workflow::handle_begin_generation_prompt(state),
        Message::BeginUpload => workflow::handle_begin_upload(state),

        // ─────────────────────────────────────────────────────────
        // Generated sets
        // ─────────────────────────────────────────────────────────
        Message::Activate => workflow::handle_activate(state),
        Message::ToggleDetail { gen_id, force } => {
            workflow::handle_toggle_detail(state, gen_id, force)
        }
        Message::BeginRegenerate => workflow::handle_begin_regenerate(state),
        Message::BeginCreateJira => workflow::handle_begin_create_jira(state),
        Message::BeginEdit => workflow::handle_begin_edit(state),

        // ─────────────────────────────────────────────────────────
        // Input modal
        // ─────────────────────────────────────────────────────────
        Message::InputChanged { text } => workflow::handle_input_changed(state, text),
        Message::InputSubmitted => workflow::handle_input_submitted(state),
        Message::InputCancelled => workflow::handle_input_cancelled(state),

        // ─────────────────────────────────────────────────────────
        // Testcase editor
        // ─────────────────────────────────────────────────────────
        Message::EditorFieldUp => workflow::handle_editor_field_up(state),
        Message::EditorFieldDown => workflow::handle_editor_field_down(state),
        Message::EditorBeginField => workflow::handle_editor_begin_field(state),
        Message::EditorInputChanged { text } => workflow::handle_editor_input_changed(state, text),
        Message::EditorCommitField => workflow::handle_editor_commit_field(state),
        Message::EditorCancelField => workflow::handle_editor_cancel_field(state),
        Message::EditorToggle => workflow::handle_editor_toggle(state),
        Message::EditorSave => workflow::handle_editor_save(state),
        Message::EditorClose => workflow::handle_editor_close(state),
        Message::ConfirmDiscard => workflow::handle_confirm_discard(state),
        Message::CancelDiscard => workflow::handle_cancel_discard(state),

        // ─────────────────────────────────────────────────────────
        // Network completions
        // ─────────────────────────────────────────────────────────
        Message::StandardsLoaded { result } => completions::handle_standards_loaded(state, result),
        Message::RequirementsLoaded { result } => {
            completions::handle_requirements_loaded(state, result)
        }
        Message::SummaryLoaded { result } => completions::handle_summary_loaded(state, result),
        Message::DetailLoaded {
            gen_id,
            force,
            result,
        } => completions::handle_detail_loaded(state, gen_id, force, result),
        Message::DetailForRegenerateLoaded {
            req_id,
            prompt,
            result,
        } => completions::handle_detail_for_regenerate(state, req_id, prompt, result),
        Message::GenerateFinished { result } => {
            completions::handle_generate_finished(state, result)
        }
        Message::StandardUploaded { result } => {
            completions::handle_standard_uploaded(state, result)
        }
        Message::RequirementUploaded { result } => {
            completions::handle_requirement_uploaded(state, result)
        }
        Message::RequirementRegenerated { req_id, result } => {
            completions::handle_requirement_regenerated(state, req_id, result)
        }
        Message::TestcaseRegenerated {
            gen_id,
            tc_id,
            result,
        } => completions::handle_testcase_regenerated(state, gen_id, tc_id, result),
        Message::TestcaseSaved {
            gen_id,
            tc_id,
            result,
        } => completions::handle_testcase_saved(state, gen_id, tc_id, result),
        Message::JiraFiled {
            gen_id,
            tc_id,
            result,
        } => completions::handle_jira_filed(state, gen_id, tc_id, result),
    }
}

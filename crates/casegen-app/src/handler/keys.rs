//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // A blocking notice swallows everything except dismissal and quit
    if state.notice.is_some() {
        return match key {
            InputKey::CharCtrl('c') => Some(Message::Quit),
            _ => Some(Message::DismissNotice),
        };
    }

    match state.ui_mode {
        UiMode::Unconfigured => handle_key_unconfigured(key),
        UiMode::SignIn => handle_key_sign_in(state, key),
        UiMode::Workflow => handle_key_workflow(state, key),
        UiMode::Input => handle_key_input(state, key),
        UiMode::EditTestcase => handle_key_editor(state, key),
        UiMode::ConfirmDiscard => handle_key_confirm_discard(key),
    }
}

/// Unconfigured is terminal: only quitting works
fn handle_key_unconfigured(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc | InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

/// Sign-in screen: the credential paste buffer
fn handle_key_sign_in(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::SubmitCredential),
        InputKey::Backspace => {
            let mut buffer = state.signin_buffer.clone();
            buffer.pop();
            Some(Message::InputChanged { text: buffer })
        }
        InputKey::CharCtrl('u') => Some(Message::InputChanged {
            text: String::new(),
        }),
        InputKey::Char(c) => {
            let mut buffer = state.signin_buffer.clone();
            buffer.push(c);
            Some(Message::InputChanged { text: buffer })
        }
        InputKey::CharCtrl('c') => Some(Message::Quit),
        InputKey::Esc => Some(Message::Quit),
        _ => None,
    }
}

/// Normal workflow browsing
fn handle_key_workflow(_state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::CharCtrl('c') => Some(Message::Quit),

        // ─────────────────────────────────────────────────────────
        // Pane and cursor navigation
        // ─────────────────────────────────────────────────────────
        InputKey::Tab => Some(Message::NextPane),
        InputKey::BackTab => Some(Message::PrevPane),
        InputKey::Up | InputKey::Char('k') => Some(Message::MoveUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::MoveDown),

        // ─────────────────────────────────────────────────────────
        // Selection & generation
        // ─────────────────────────────────────────────────────────
        InputKey::Char(' ') => Some(Message::ToggleSelected),
        InputKey::Char('g') => Some(Message::Generate),
        InputKey::Char('p') => Some(Message::BeginGenerationPrompt),
        InputKey::Char('u') => Some(Message::BeginUpload),

        // ─────────────────────────────────────────────────────────
        // Generated sets
        // ─────────────────────────────────────────────────────────
        InputKey::Enter => Some(Message::Activate),
        InputKey::Char('r') => Some(Message::BeginRegenerate),
        InputKey::Char('e') => Some(Message::BeginEdit),
        InputKey::Char('t') => Some(Message::BeginCreateJira),

        // Sign out
        InputKey::Char('x') => Some(Message::SignOut),

        _ => None,
    }
}

/// Modal input buffer (prompts, upload paths, project key)
fn handle_key_input(state: &AppState, key: InputKey) -> Option<Message> {
    let buffer = state
        .input
        .as_ref()
        .map(|p| p.buffer.clone())
        .unwrap_or_default();

    match key {
        InputKey::Esc => Some(Message::InputCancelled),
        InputKey::Enter => Some(Message::InputSubmitted),
        InputKey::Backspace => {
            let mut buffer = buffer;
            buffer.pop();
            Some(Message::InputChanged { text: buffer })
        }
        InputKey::CharCtrl('u') => Some(Message::InputChanged {
            text: String::new(),
        }),
        InputKey::Char(c) => {
            let mut buffer = buffer;
            buffer.push(c);
            Some(Message::InputChanged { text: buffer })
        }
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

/// Testcase edit form
fn handle_key_editor(state: &AppState, key: InputKey) -> Option<Message> {
    let editor = state.editor.as_ref()?;

    // A field is being edited: route text input to its buffer
    if let Some(buffer) = editor.editing.as_ref() {
        let multiline = editor.selected_field().is_multiline();
        return match key {
            InputKey::Esc => Some(Message::EditorCancelField),
            // Multiline fields take Enter as a literal newline and
            // commit with Ctrl+S; scalar fields commit on Enter.
            InputKey::Enter if multiline => {
                let mut buffer = buffer.clone();
                buffer.push('\n');
                Some(Message::EditorInputChanged { text: buffer })
            }
            InputKey::Enter => Some(Message::EditorCommitField),
            InputKey::CharCtrl('s') => Some(Message::EditorCommitField),
            InputKey::Backspace => {
                let mut buffer = buffer.clone();
                buffer.pop();
                Some(Message::EditorInputChanged { text: buffer })
            }
            InputKey::CharCtrl('u') => Some(Message::EditorInputChanged {
                text: String::new(),
            }),
            InputKey::Char(c) => {
                let mut buffer = buffer.clone();
                buffer.push(c);
                Some(Message::EditorInputChanged { text: buffer })
            }
            InputKey::CharCtrl('c') => Some(Message::Quit),
            _ => None,
        };
    }

    match key {
        InputKey::Esc | InputKey::Char('q') => Some(Message::EditorClose),
        InputKey::Up | InputKey::Char('k') => Some(Message::EditorFieldUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::EditorFieldDown),
        InputKey::Enter => {
            if editor.selected_field().is_toggle() {
                Some(Message::EditorToggle)
            } else {
                Some(Message::EditorBeginField)
            }
        }
        InputKey::Char(' ') if editor.selected_field().is_toggle() => Some(Message::EditorToggle),
        InputKey::Char('s') => Some(Message::EditorSave),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

/// Confirm discarding unsaved edits after an incoming refresh
fn handle_key_confirm_discard(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('y' | 'Y') | InputKey::Enter => Some(Message::ConfirmDiscard),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::CancelDiscard),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

//! Application state (Model in TEA pattern)

use std::collections::{BTreeMap, HashMap, HashSet};

use casegen_api::SessionStore;
use casegen_core::prelude::*;
use casegen_core::{GenerationSummaryEntry, RequirementInfo, Testcase, UserProfile};

use crate::auth::AuthState;
use crate::cache::DetailCache;
use crate::config::Settings;
use crate::editor::EditorState;
use crate::inflight::InFlight;
use crate::selection::SelectionList;

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Sign-in provider not configured - terminal notice screen
    Unconfigured,

    /// Credential paste screen
    #[default]
    SignIn,

    /// The full workflow screen
    Workflow,

    /// Modal single-buffer text input (prompts, paths, project key)
    Input,

    /// Testcase edit form
    EditTestcase,

    /// Confirm discarding unsaved edits after a canonical refresh
    ConfirmDiscard,
}

/// Which workflow pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Requirements,
    Standards,
    Generated,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Requirements => Pane::Standards,
            Pane::Standards => Pane::Generated,
            Pane::Generated => Pane::Requirements,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Pane::Requirements => Pane::Generated,
            Pane::Standards => Pane::Requirements,
            Pane::Generated => Pane::Standards,
        }
    }
}

/// Severity of the blocking notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A blocking modal message, dismissed by key press.
///
/// Stands in for the original's `alert()`: validation failures, server
/// failures (raw payload included) and transport failures all land here.
/// A 401 never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// What the modal input buffer is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPurpose {
    /// Optional extra instructions for generation
    GenerationPrompt,
    /// Path of a standard document to upload
    UploadStandardPath,
    /// Path of a requirement document to upload
    UploadRequirementPath,
    /// Optional extra instructions for regenerating a whole set
    RegenerateRequirementPrompt { req_id: String, gen_id: String },
    /// Optional extra instructions for regenerating one testcase
    RegenerateTestcasePrompt { gen_id: String, tc_id: String },
    /// Jira project key (blank = backend default)
    JiraProjectKey { gen_id: String, tc_id: String },
}

/// The modal input state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPrompt {
    pub purpose: InputPurpose,
    pub title: String,
    pub buffer: String,
}

/// Generation parameters retained per generation set, so whole-set
/// regeneration does not depend on a secondary detail fetch succeeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub standards: Vec<String>,
    pub prompt: String,
}

/// One navigable row of the generated pane: a set header or, when the
/// set is expanded, one of its testcases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedRow {
    Set { gen_id: String },
    Case { gen_id: String, tc_id: String },
}

/// Top-level application state
#[derive(Debug)]
pub struct AppState {
    pub settings: Settings,
    pub ui_mode: UiMode,
    pub auth: AuthState,
    store: SessionStore,

    /// Credential paste buffer on the sign-in screen
    pub signin_buffer: String,

    // ── Workflow data (server mirrors) ────────────────────────────
    pub standards: BTreeMap<String, String>,
    pub requirements: BTreeMap<String, RequirementInfo>,
    pub summary: Vec<GenerationSummaryEntry>,
    pub details: DetailCache,
    pub expanded: HashSet<String>,

    // ── Workflow client state ─────────────────────────────────────
    pub selected_standards: SelectionList,
    pub selected_requirements: SelectionList,
    pub prompt_override: String,
    pub generation_params: HashMap<String, GenerationParams>,
    pub inflight: InFlight,

    // ── Navigation ────────────────────────────────────────────────
    pub pane: Pane,
    pub requirement_cursor: usize,
    pub standard_cursor: usize,
    pub generated_cursor: usize,

    // ── Overlays ──────────────────────────────────────────────────
    pub notice: Option<Notice>,
    pub input: Option<InputPrompt>,
    pub editor: Option<EditorState>,

    should_quit: bool,
}

impl AppState {
    pub fn new(settings: Settings, store: SessionStore) -> Self {
        let (auth, ui_mode) = if settings.google_client_id.is_empty() {
            (AuthState::Unconfigured, UiMode::Unconfigured)
        } else if let Some((profile, credential)) = store.load() {
            info!("restored session for {}", profile.email);
            (
                AuthState::SignedIn {
                    profile,
                    credential,
                },
                UiMode::Workflow,
            )
        } else {
            (AuthState::signed_out(), UiMode::SignIn)
        };

        Self {
            settings,
            ui_mode,
            auth,
            store,
            signin_buffer: String::new(),
            standards: BTreeMap::new(),
            requirements: BTreeMap::new(),
            summary: Vec::new(),
            details: DetailCache::new(),
            expanded: HashSet::new(),
            selected_standards: SelectionList::new(),
            selected_requirements: SelectionList::new(),
            prompt_override: String::new(),
            generation_params: HashMap::new(),
            inflight: InFlight::new(),
            pane: Pane::default(),
            requirement_cursor: 0,
            standard_cursor: 0,
            generated_cursor: 0,
            notice: None,
            input: None,
            editor: None,
            should_quit: false,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Session transitions
    // ─────────────────────────────────────────────────────────────

    /// SignedOut -> SignedIn. Persists both session entries together.
    pub fn sign_in(&mut self, profile: UserProfile, credential: String) {
        if let Err(e) = self.store.save(&profile, &credential) {
            warn!("unable to persist session: {e}");
        }
        self.auth = AuthState::SignedIn {
            profile,
            credential,
        };
        self.signin_buffer.clear();
        self.ui_mode = UiMode::Workflow;
    }

    /// SignedIn -> SignedOut. Clears all in-memory workflow state and
    /// erases the persisted session. Used for both explicit sign-out and
    /// the silent 401 transition.
    pub fn sign_out(&mut self) {
        self.store.clear();
        self.auth = AuthState::signed_out();
        self.ui_mode = UiMode::SignIn;

        self.signin_buffer.clear();
        self.standards.clear();
        self.requirements.clear();
        self.summary.clear();
        self.details.clear();
        self.expanded.clear();
        self.selected_standards.clear();
        self.selected_requirements.clear();
        self.prompt_override.clear();
        self.generation_params.clear();
        self.inflight.clear();
        self.pane = Pane::default();
        self.requirement_cursor = 0;
        self.standard_cursor = 0;
        self.generated_cursor = 0;
        self.notice = None;
        self.input = None;
        self.editor = None;
    }

    /// Failed sign-in attempt: stay SignedOut, remember the message,
    /// never touch the store.
    pub fn sign_in_failed(&mut self, message: impl Into<String>) {
        self.auth = AuthState::signed_out_with_error(message);
        self.ui_mode = UiMode::SignIn;
    }

    pub fn credential(&self) -> Option<&str> {
        self.auth.credential()
    }

    pub fn session_persisted(&self) -> bool {
        self.store.is_present()
    }

    // ─────────────────────────────────────────────────────────────
    // Quit
    // ─────────────────────────────────────────────────────────────

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ─────────────────────────────────────────────────────────────
    // Notices
    // ─────────────────────────────────────────────────────────────

    pub fn notify_info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind: NoticeKind::Info,
            text: text.into(),
        });
    }

    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            text: text.into(),
        });
    }

    // ─────────────────────────────────────────────────────────────
    // Navigation helpers
    // ─────────────────────────────────────────────────────────────

    /// The focused requirement id, if any.
    pub fn requirement_at_cursor(&self) -> Option<&str> {
        self.requirements
            .keys()
            .nth(self.requirement_cursor)
            .map(String::as_str)
    }

    /// The focused standard name, if any.
    pub fn standard_at_cursor(&self) -> Option<&str> {
        self.standards
            .keys()
            .nth(self.standard_cursor)
            .map(String::as_str)
    }

    /// Flattened rows of the generated pane: one row per summary entry
    /// plus one row per testcase of each expanded set with cached detail.
    pub fn generated_rows(&self) -> Vec<GeneratedRow> {
        let mut rows = Vec::new();
        for entry in &self.summary {
            rows.push(GeneratedRow::Set {
                gen_id: entry.id.clone(),
            });
            if self.expanded.contains(&entry.id) {
                if let Some(detail) = self.details.any(&entry.id) {
                    for tc in &detail.testcases {
                        rows.push(GeneratedRow::Case {
                            gen_id: entry.id.clone(),
                            tc_id: tc.tc_id.clone(),
                        });
                    }
                }
            }
        }
        rows
    }

    /// The focused generated-pane row, if any.
    pub fn generated_row_at_cursor(&self) -> Option<GeneratedRow> {
        self.generated_rows().into_iter().nth(self.generated_cursor)
    }

    /// Look up a testcase in the detail cache (any version — used for
    /// opening the editor and for display).
    pub fn find_testcase(&self, gen_id: &str, tc_id: &str) -> Option<&Testcase> {
        self.details
            .any(gen_id)
            .and_then(|detail| detail.testcases.iter().find(|tc| tc.tc_id == tc_id))
    }

    /// Summary entry for a generation set id.
    pub fn summary_entry(&self, gen_id: &str) -> Option<&GenerationSummaryEntry> {
        self.summary.iter().find(|entry| entry.id == gen_id)
    }

    pub fn move_cursor_up(&mut self) {
        let cursor = self.focused_cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        let len = match self.pane {
            Pane::Requirements => self.requirements.len(),
            Pane::Standards => self.standards.len(),
            Pane::Generated => self.generated_rows().len(),
        };
        let cursor = self.focused_cursor_mut();
        if len > 0 && *cursor + 1 < len {
            *cursor += 1;
        }
    }

    fn focused_cursor_mut(&mut self) -> &mut usize {
        match self.pane {
            Pane::Requirements => &mut self.requirement_cursor,
            Pane::Standards => &mut self.standard_cursor,
            Pane::Generated => &mut self.generated_cursor,
        }
    }

    /// Keep cursors inside their lists after data changes shrink them.
    pub fn clamp_cursors(&mut self) {
        self.requirement_cursor = self
            .requirement_cursor
            .min(self.requirements.len().saturating_sub(1));
        self.standard_cursor = self
            .standard_cursor
            .min(self.standards.len().saturating_sub(1));
        self.generated_cursor = self
            .generated_cursor
            .min(self.generated_rows().len().saturating_sub(1));
    }
}

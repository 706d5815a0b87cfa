//! Message types for the application (TEA pattern)

use std::collections::BTreeMap;

use casegen_api::RegenerateOutcome;
use casegen_core::{Error, GenerationDetail, GenerationSummaryEntry, RequirementInfo};

use crate::input_key::InputKey;

/// Cloneable failure shape for completion messages.
///
/// A 401 forces sign-out, a server-reported failure surfaces its raw
/// payload, a transport failure surfaces a generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    Unauthorized,
    Server { status: u16, body: String },
    Transport(String),
}

impl From<Error> for ApiFailure {
    fn from(err: Error) -> Self {
        match err {
            Error::Unauthorized => ApiFailure::Unauthorized,
            Error::Api { status, body } => ApiFailure::Server { status, body },
            other => ApiFailure::Transport(other.to_string()),
        }
    }
}

impl ApiFailure {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiFailure::Unauthorized)
    }
}

/// Outcome type used by completion messages.
pub type ApiResult<T> = std::result::Result<T, ApiFailure>;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Quit the application
    Quit,

    // ─────────────────────────────────────────────────────────
    // Session Messages
    // ─────────────────────────────────────────────────────────
    /// Submit the pasted credential from the sign-in screen
    SubmitCredential,
    /// Explicit sign-out (also fired internally on a 401)
    SignOut,

    // ─────────────────────────────────────────────────────────
    // Workflow Navigation
    // ─────────────────────────────────────────────────────────
    /// Cycle focus to the next pane
    NextPane,
    /// Cycle focus to the previous pane
    PrevPane,
    /// Move selection up within the focused pane
    MoveUp,
    /// Move selection down within the focused pane
    MoveDown,

    // ─────────────────────────────────────────────────────────
    // Document Selection & Generation
    // ─────────────────────────────────────────────────────────
    /// Flip membership of the focused document in its selection list
    ToggleSelected,
    /// Open the generation prompt-override input
    BeginGenerationPrompt,
    /// Open the upload-path input for the focused document pane
    BeginUpload,
    /// Request generation for the current selections
    Generate,

    // ─────────────────────────────────────────────────────────
    // Generated Sets
    // ─────────────────────────────────────────────────────────
    /// Enter on a generated row: toggle a set, or open the editor on a
    /// testcase row
    Activate,
    /// Expand/collapse/fetch a generation set's detail view
    ToggleDetail { gen_id: String, force: bool },
    /// Open the regenerate prompt for the selected row (whole set on a
    /// set row, single testcase on a testcase row)
    BeginRegenerate,
    /// Open the Jira project-key prompt for the selected testcase row
    BeginCreateJira,
    /// Open the editor for the selected testcase row
    BeginEdit,

    // ─────────────────────────────────────────────────────────
    // Input Modal
    // ─────────────────────────────────────────────────────────
    /// Replace the input buffer text
    InputChanged { text: String },
    /// Submit the input buffer to its purpose
    InputSubmitted,
    /// Cancel the input modal (no network call)
    InputCancelled,

    // ─────────────────────────────────────────────────────────
    // Testcase Editor
    // ─────────────────────────────────────────────────────────
    /// Select previous field in the edit form
    EditorFieldUp,
    /// Select next field in the edit form
    EditorFieldDown,
    /// Begin editing the selected field
    EditorBeginField,
    /// Replace the active field buffer
    EditorInputChanged { text: String },
    /// Commit the active field buffer into the draft
    EditorCommitField,
    /// Abandon the active field buffer
    EditorCancelField,
    /// Flip the automatable flag
    EditorToggle,
    /// PATCH the assembled draft
    EditorSave,
    /// Close the editor, discarding the draft
    EditorClose,
    /// Confirm discarding unsaved edits for an incoming refresh
    ConfirmDiscard,
    /// Keep unsaved edits, dropping the incoming refresh
    CancelDiscard,

    /// Dismiss the blocking notice
    DismissNotice,

    // ─────────────────────────────────────────────────────────
    // Network Completions
    // ─────────────────────────────────────────────────────────
    /// `GET /standards` finished
    StandardsLoaded {
        result: ApiResult<BTreeMap<String, String>>,
    },
    /// `GET /requirements` finished
    RequirementsLoaded {
        result: ApiResult<BTreeMap<String, RequirementInfo>>,
    },
    /// `GET /generated` finished
    SummaryLoaded {
        result: ApiResult<Vec<GenerationSummaryEntry>>,
    },
    /// Detail fetch for expand/refresh finished
    DetailLoaded {
        gen_id: String,
        force: bool,
        result: ApiResult<GenerationDetail>,
    },
    /// Detail fetch issued solely to recover the standards list for a
    /// whole-set regeneration
    DetailForRegenerateLoaded {
        req_id: String,
        prompt: String,
        result: ApiResult<GenerationDetail>,
    },
    /// `POST /testcases` finished
    GenerateFinished { result: ApiResult<()> },
    /// Standard upload finished (filename on success)
    StandardUploaded { result: ApiResult<String> },
    /// Requirement upload finished (title on success)
    RequirementUploaded { result: ApiResult<String> },
    /// Whole-set regeneration finished
    RequirementRegenerated {
        req_id: String,
        result: ApiResult<RegenerateOutcome>,
    },
    /// Single-testcase regeneration finished
    TestcaseRegenerated {
        gen_id: String,
        tc_id: String,
        result: ApiResult<()>,
    },
    /// Testcase PATCH finished
    TestcaseSaved {
        gen_id: String,
        tc_id: String,
        result: ApiResult<()>,
    },
    /// Ticket creation finished (raw ticket payload on success)
    JiraFiled {
        gen_id: String,
        tc_id: String,
        result: ApiResult<serde_json::Value>,
    },
}

//! Testcase editor state: a local draft over the canonical server copy.
//!
//! The draft keeps string edit buffers (list fields are newline- or
//! comma-delimited text, exactly as they are edited) plus the origin
//! snapshot it was seeded from. When a forced refresh replaces the
//! canonical copy while the draft has unsaved edits, the incoming copy
//! is parked until the user confirms the discard — a dirty draft is
//! never silently overwritten.

use casegen_core::fields;
use casegen_core::Testcase;

/// The editable fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Preconditions,
    Steps,
    Expected,
    Automatable,
    SuggestedTool,
    Confidence,
    Compliance,
}

/// Form order used for Up/Down navigation.
pub const FIELD_ORDER: &[EditField] = &[
    EditField::Title,
    EditField::Preconditions,
    EditField::Steps,
    EditField::Expected,
    EditField::Automatable,
    EditField::SuggestedTool,
    EditField::Confidence,
    EditField::Compliance,
];

impl EditField {
    pub fn label(&self) -> &'static str {
        match self {
            EditField::Title => "Title",
            EditField::Preconditions => "Preconditions (one per line)",
            EditField::Steps => "Steps (one per line)",
            EditField::Expected => "Expected",
            EditField::Automatable => "Automatable",
            EditField::SuggestedTool => "Suggested tool",
            EditField::Confidence => "Confidence (0-1)",
            EditField::Compliance => "Compliance (comma separated)",
        }
    }

    /// Multiline fields accept Enter as a literal newline while editing.
    pub fn is_multiline(&self) -> bool {
        matches!(self, EditField::Preconditions | EditField::Steps)
    }

    /// Automatable toggles rather than taking text input.
    pub fn is_toggle(&self) -> bool {
        matches!(self, EditField::Automatable)
    }
}

/// String edit buffers mirroring one testcase.
#[derive(Debug, Clone, PartialEq)]
pub struct TestcaseDraft {
    origin: Testcase,
    pub title: String,
    pub preconditions_text: String,
    pub steps_text: String,
    pub expected: String,
    pub automatable: bool,
    pub suggested_tool: String,
    pub confidence_text: String,
    pub compliance_text: String,
}

impl TestcaseDraft {
    /// Seed buffers from the canonical copy.
    pub fn from_testcase(tc: &Testcase) -> Self {
        Self {
            title: tc.title.clone(),
            preconditions_text: fields::join_lines(&tc.preconditions),
            steps_text: fields::join_lines(&tc.steps),
            expected: tc.expected.clone(),
            automatable: tc.automatable,
            suggested_tool: tc.suggested_tool.clone(),
            confidence_text: format_confidence(tc.confidence),
            compliance_text: fields::join_compliance(&tc.compliance),
            origin: tc.clone(),
        }
    }

    /// The snapshot this draft was seeded from.
    pub fn origin(&self) -> &Testcase {
        &self.origin
    }

    /// Whether any buffer differs from what the origin seeded.
    pub fn is_dirty(&self) -> bool {
        let seeded = Self::from_testcase(&self.origin);
        self.title != seeded.title
            || self.preconditions_text != seeded.preconditions_text
            || self.steps_text != seeded.steps_text
            || self.expected != seeded.expected
            || self.automatable != seeded.automatable
            || self.suggested_tool != seeded.suggested_tool
            || self.confidence_text != seeded.confidence_text
            || self.compliance_text != seeded.compliance_text
    }

    /// Assemble the full testcase to PATCH.
    ///
    /// List fields split per their delimiters (trailing blank lines are
    /// preserved as empty entries; compliance filters empties). An
    /// unparseable confidence keeps the origin's value so the body stays
    /// valid JSON.
    pub fn assemble(&self) -> Testcase {
        Testcase {
            tc_id: self.origin.tc_id.clone(),
            title: self.title.clone(),
            preconditions: fields::split_lines(&self.preconditions_text),
            steps: fields::split_lines(&self.steps_text),
            expected: self.expected.clone(),
            automatable: self.automatable,
            suggested_tool: self.suggested_tool.clone(),
            confidence: self
                .confidence_text
                .trim()
                .parse::<f64>()
                .unwrap_or(self.origin.confidence),
            compliance: fields::split_compliance(&self.compliance_text),
            jira_id: self.origin.jira_id.clone(),
        }
    }

    pub fn field_text(&self, field: EditField) -> String {
        match field {
            EditField::Title => self.title.clone(),
            EditField::Preconditions => self.preconditions_text.clone(),
            EditField::Steps => self.steps_text.clone(),
            EditField::Expected => self.expected.clone(),
            EditField::Automatable => {
                if self.automatable {
                    "true".to_string()
                } else {
                    "false".to_string()
                }
            }
            EditField::SuggestedTool => self.suggested_tool.clone(),
            EditField::Confidence => self.confidence_text.clone(),
            EditField::Compliance => self.compliance_text.clone(),
        }
    }

    pub fn set_field_text(&mut self, field: EditField, text: String) {
        match field {
            EditField::Title => self.title = text,
            EditField::Preconditions => self.preconditions_text = text,
            EditField::Steps => self.steps_text = text,
            EditField::Expected => self.expected = text,
            EditField::Automatable => {}
            EditField::SuggestedTool => self.suggested_tool = text,
            EditField::Confidence => self.confidence_text = text,
            EditField::Compliance => self.compliance_text = text,
        }
    }
}

// The short decimal form the backend sends (0.8, 0.85, ...)
fn format_confidence(confidence: f64) -> String {
    format!("{confidence}")
}

/// Editor state for one open testcase.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub gen_id: String,
    pub draft: TestcaseDraft,
    /// Index into [`FIELD_ORDER`].
    pub field_index: usize,
    /// Buffer for the field currently being edited, if any.
    pub editing: Option<String>,
    /// Canonical replacement parked by a refresh while the draft was
    /// dirty; resolved by the discard confirmation.
    pub pending_replacement: Option<Testcase>,
}

impl EditorState {
    pub fn open(gen_id: impl Into<String>, tc: &Testcase) -> Self {
        Self {
            gen_id: gen_id.into(),
            draft: TestcaseDraft::from_testcase(tc),
            field_index: 0,
            editing: None,
            pending_replacement: None,
        }
    }

    pub fn selected_field(&self) -> EditField {
        FIELD_ORDER[self.field_index.min(FIELD_ORDER.len() - 1)]
    }

    pub fn select_prev_field(&mut self) {
        if self.field_index > 0 {
            self.field_index -= 1;
        }
    }

    pub fn select_next_field(&mut self) {
        if self.field_index + 1 < FIELD_ORDER.len() {
            self.field_index += 1;
        }
    }

    pub fn tc_id(&self) -> &str {
        &self.draft.origin().tc_id
    }

    /// Incoming canonical copy for the testcase this editor holds.
    ///
    /// A clean draft resets silently; a dirty draft parks the
    /// replacement for the confirm-discard flow. Returns true when the
    /// caller must surface the confirmation.
    pub fn on_canonical_replaced(&mut self, incoming: &Testcase) -> bool {
        if !self.draft.is_dirty() {
            self.draft = TestcaseDraft::from_testcase(incoming);
            self.pending_replacement = None;
            false
        } else if incoming != self.draft.origin() {
            self.pending_replacement = Some(incoming.clone());
            true
        } else {
            false
        }
    }

    /// User confirmed discarding the unsaved edits.
    pub fn accept_replacement(&mut self) {
        if let Some(incoming) = self.pending_replacement.take() {
            self.draft = TestcaseDraft::from_testcase(&incoming);
            self.editing = None;
        }
    }

    /// User chose to keep the unsaved edits.
    pub fn reject_replacement(&mut self) {
        self.pending_replacement = None;
    }
}

//! Main render/view function (View in TEA pattern)

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use casegen_app::inflight::Operation;
use casegen_app::state::{AppState, GeneratedRow, Pane, UiMode};

use crate::theme;
use crate::widgets::{
    ConfirmDiscardModal, DocumentItem, DocumentList, EditorForm, GeneratedList, InputModal,
    MainHeader, NoticeModal, SignInScreen, TestcasePreview, UnconfiguredScreen,
};

/// Render the complete UI (View function in TEA)
///
/// This is a pure rendering function - it does not modify state.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Fill entire terminal with the background color
    let bg_block = Block::default().style(Style::default().bg(theme::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    match state.ui_mode {
        UiMode::Unconfigured => frame.render_widget(UnconfiguredScreen, area),
        UiMode::SignIn => frame.render_widget(
            SignInScreen {
                buffer: &state.signin_buffer,
                error: state.auth.sign_in_error(),
            },
            area,
        ),
        UiMode::Workflow | UiMode::Input | UiMode::EditTestcase | UiMode::ConfirmDiscard => {
            render_workflow(frame, state, area)
        }
    }

    // The blocking notice always renders on top
    if let Some(notice) = state.notice.as_ref() {
        frame.render_widget(NoticeModal::new(notice), area);
    }
}

fn render_workflow(frame: &mut Frame, state: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(MainHeader::new(state.auth.profile()), rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    render_documents(frame, state, body[0]);
    render_generated(frame, state, body[1]);
    render_status_bar(frame, state, rows[2]);

    // Mode-specific overlays
    match state.ui_mode {
        UiMode::Input => {
            if let Some(input) = state.input.as_ref() {
                frame.render_widget(InputModal::new(&input.title, &input.buffer), area);
            }
        }
        UiMode::EditTestcase => {
            if let Some(editor) = state.editor.as_ref() {
                frame.render_widget(EditorForm::new(editor), area);
            }
        }
        UiMode::ConfirmDiscard => {
            if let Some(editor) = state.editor.as_ref() {
                frame.render_widget(EditorForm::new(editor), area);
            }
            frame.render_widget(ConfirmDiscardModal, area);
        }
        _ => {}
    }
}

fn render_documents(frame: &mut Frame, state: &AppState, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(42),
            Constraint::Percentage(38),
            Constraint::Length(4),
        ])
        .split(area);

    let requirement_items: Vec<DocumentItem> = state
        .requirements
        .iter()
        .map(|(id, info)| DocumentItem {
            label: format!("{id} — {}", info.title),
            detail: info.file_uri.clone(),
            selected: state.selected_requirements.contains(id),
        })
        .collect();
    frame.render_widget(
        DocumentList::new(
            "Requirements",
            requirement_items,
            state.requirement_cursor,
            state.pane == Pane::Requirements && state.ui_mode == UiMode::Workflow,
            "No requirements uploaded",
        ),
        panes[0],
    );

    let standard_items: Vec<DocumentItem> = state
        .standards
        .iter()
        .map(|(name, uri)| DocumentItem {
            label: name.clone(),
            detail: uri.clone(),
            selected: state.selected_standards.contains(name),
        })
        .collect();
    frame.render_widget(
        DocumentList::new(
            "Standards",
            standard_items,
            state.standard_cursor,
            state.pane == Pane::Standards && state.ui_mode == UiMode::Workflow,
            "No standards uploaded",
        ),
        panes[1],
    );

    // Prompt override + selection summary
    let block = theme::panel_block("Generation", false);
    let inner = block.inner(panes[2]);
    frame.render_widget(block, panes[2]);
    let prompt_shown = if state.prompt_override.is_empty() {
        "(no additional instructions)".to_string()
    } else {
        state.prompt_override.replace('\n', " ")
    };
    let lines = vec![
        Line::from(vec![
            Span::styled("Selected: ", theme::text_secondary()),
            Span::styled(
                format!(
                    "{} requirements, {} standards",
                    state.selected_requirements.len(),
                    state.selected_standards.len()
                ),
                theme::text_primary(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Prompt: ", theme::text_secondary()),
            Span::styled(prompt_shown, theme::text_muted()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_generated(frame: &mut Frame, state: &AppState, area: Rect) {
    // Reserve a preview panel when a testcase row is selected
    let selected_case = match state.generated_row_at_cursor() {
        Some(GeneratedRow::Case { gen_id, tc_id }) => state.find_testcase(&gen_id, &tc_id),
        _ => None,
    };

    let focused = state.pane == Pane::Generated && state.ui_mode == UiMode::Workflow;
    if let Some(tc) = selected_case {
        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(14)])
            .split(area);
        frame.render_widget(GeneratedList::new(state, focused), halves[0]);
        frame.render_widget(TestcasePreview::new(tc), halves[1]);
    } else {
        frame.render_widget(GeneratedList::new(state, focused), area);
    }
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let mut spans = vec![Span::styled(
        " Tab panes · Space select · g generate · p prompt · u upload · Enter expand · r regenerate · e edit · t ticket ",
        theme::text_muted(),
    )];

    if state.inflight.holds(Operation::Generate, "") {
        spans.push(Span::styled("Generating…", theme::accent_bold()));
    } else if state.inflight.holds(Operation::UploadStandard, "") {
        spans.push(Span::styled("Uploading Standard…", theme::accent_bold()));
    } else if state.inflight.holds(Operation::UploadRequirement, "") {
        spans.push(Span::styled("Uploading Requirement…", theme::accent_bold()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

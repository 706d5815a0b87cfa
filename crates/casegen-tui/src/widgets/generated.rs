//! Generated-sets pane: summary rows with expandable testcase rows.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use casegen_app::inflight::Operation;
use casegen_app::state::{AppState, GeneratedRow};

use crate::theme;

/// The generated pane, built over the flattened row list.
pub struct GeneratedList<'a> {
    state: &'a AppState,
    focused: bool,
}

impl<'a> GeneratedList<'a> {
    pub fn new(state: &'a AppState, focused: bool) -> Self {
        Self { state, focused }
    }

    fn row_line(&self, row: &GeneratedRow, highlighted: bool) -> Line<'static> {
        let state = self.state;
        let base = if highlighted {
            theme::selection()
        } else {
            theme::text_primary()
        };

        match row {
            GeneratedRow::Set { gen_id } => {
                let Some(entry) = state.summary_entry(gen_id) else {
                    return Line::default();
                };
                let marker = if state.expanded.contains(gen_id) {
                    "▾"
                } else {
                    "▸"
                };
                let mut spans = vec![
                    Span::styled(format!("{marker} "), base),
                    Span::styled(entry.requirement_id.clone(), base),
                    Span::styled(
                        format!(" — {} ({} testcases)", entry.requirement_title, entry.count),
                        if highlighted { base } else { theme::text_secondary() },
                    ),
                ];
                if state
                    .inflight
                    .holds(Operation::RegenerateRequirement, &entry.requirement_id)
                {
                    spans.push(Span::styled(
                        "  regenerating…",
                        theme::text_muted(),
                    ));
                }
                Line::from(spans)
            }
            GeneratedRow::Case { gen_id, tc_id } => {
                let Some(tc) = state.find_testcase(gen_id, tc_id) else {
                    return Line::default();
                };
                let mut spans = vec![
                    Span::styled("    • ", base),
                    Span::styled(tc.tc_id.clone(), base),
                    Span::styled(
                        format!("  {}", tc.title),
                        if highlighted { base } else { theme::text_secondary() },
                    ),
                ];
                if let Some(jira_id) = tc.jira_id.as_deref() {
                    spans.push(Span::styled(format!("  [{jira_id}]"), theme::status_green()));
                }
                if state.inflight.holds(Operation::RegenerateTestcase, tc_id) {
                    spans.push(Span::styled("  regenerating…", theme::text_muted()));
                } else if state.inflight.holds(Operation::SaveTestcase, tc_id) {
                    spans.push(Span::styled("  saving…", theme::text_muted()));
                } else if state.inflight.holds(Operation::CreateJira, tc_id) {
                    spans.push(Span::styled("  creating ticket…", theme::text_muted()));
                }
                Line::from(spans)
            }
        }
    }
}

impl Widget for GeneratedList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = theme::panel_block("Generated testcases", self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let rows = self.state.generated_rows();
        if rows.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No generated sets yet",
                theme::text_muted(),
            )))
            .render(inner, buf);
            return;
        }

        let cursor = self.state.generated_cursor.min(rows.len() - 1);
        let visible = inner.height as usize;
        let first = cursor.saturating_sub(visible.saturating_sub(1));

        for (screen_row, (i, row)) in
            rows.iter().enumerate().skip(first).take(visible).enumerate()
        {
            let highlighted = self.focused && i == cursor;
            let line = self.row_line(row, highlighted);
            buf.set_line(inner.x, inner.y + screen_row as u16, &line, inner.width);
        }
    }
}

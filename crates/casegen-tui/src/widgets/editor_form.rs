//! Testcase edit form.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use casegen_app::editor::{EditorState, FIELD_ORDER};

use crate::theme;
use crate::widgets::centered_rect;

/// Full-field edit form over the open draft.
pub struct EditorForm<'a> {
    editor: &'a EditorState,
}

impl<'a> EditorForm<'a> {
    pub fn new(editor: &'a EditorState) -> Self {
        Self { editor }
    }
}

impl Widget for EditorForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let editor = self.editor;
        let modal = centered_rect(80, 80, area);
        Clear.render(modal, buf);

        let title = format!("Edit testcase {}", editor.tc_id());
        let block = theme::panel_block(&title, true).style(Style::default().bg(theme::POPUP_BG));
        let inner = block.inner(modal);
        block.render(modal, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let editing = editor.editing.is_some();
        let areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FIELD_ORDER.len() as u16),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        // Field list: single-line previews, newlines folded
        for (i, field) in FIELD_ORDER.iter().enumerate() {
            if i as u16 >= areas[0].height {
                break;
            }
            let selected = i == editor.field_index;
            let style = if selected && !editing {
                theme::selection()
            } else {
                theme::text_primary()
            };
            let value = editor.draft.field_text(*field).replace('\n', " ⏎ ");
            let line = Line::from(vec![
                Span::styled(format!("{:<28}", field.label()), theme::text_secondary()),
                Span::styled(value, style),
            ]);
            buf.set_line(areas[0].x, areas[0].y + i as u16, &line, areas[0].width);
        }

        // Active edit buffer, full multi-line view
        if let Some(buffer) = editor.editing.as_ref() {
            let field = editor.selected_field();
            let edit_block = theme::panel_block(field.label(), true);
            let edit_inner = edit_block.inner(areas[1]);
            edit_block.render(areas[1], buf);

            let mut lines: Vec<Line> = buffer
                .split('\n')
                .map(|part| Line::from(Span::styled(part.to_string(), theme::text_primary())))
                .collect();
            if lines.is_empty() {
                lines.push(Line::default());
            }
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .render(edit_inner, buf);
        }

        let hint = if editing {
            if editor.selected_field().is_multiline() {
                "Enter newline · Ctrl+S commit · Esc cancel"
            } else {
                "Enter commit · Esc cancel"
            }
        } else {
            "↑/↓ field · Enter edit · s save · Esc close"
        };
        let hint_line = Line::from(Span::styled(hint, theme::text_muted()));
        buf.set_line(areas[2].x, areas[2].y, &hint_line, areas[2].width);
    }
}

//! Modal overlays: blocking notices, text input, discard confirmation.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use casegen_app::state::{Notice, NoticeKind};

use crate::theme;

/// Centered rect taking the given percentage of the parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// The blocking alert box. Any key dismisses it.
pub struct NoticeModal<'a> {
    notice: &'a Notice,
}

impl<'a> NoticeModal<'a> {
    pub fn new(notice: &'a Notice) -> Self {
        Self { notice }
    }
}

impl Widget for NoticeModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = centered_rect(60, 30, area);
        Clear.render(modal, buf);

        let (title, text_style) = match self.notice.kind {
            NoticeKind::Info => ("Notice", theme::text_primary()),
            NoticeKind::Error => ("Error", theme::status_red()),
        };

        let block = theme::panel_block(title, true).style(Style::default().bg(theme::POPUP_BG));
        let inner = block.inner(modal);
        block.render(modal, buf);

        let lines = vec![
            Line::from(Span::styled(self.notice.text.clone(), text_style)),
            Line::default(),
            Line::from(Span::styled("press any key", theme::text_muted())),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// Single-buffer text input modal.
pub struct InputModal<'a> {
    title: &'a str,
    buffer: &'a str,
}

impl<'a> InputModal<'a> {
    pub fn new(title: &'a str, buffer: &'a str) -> Self {
        Self { title, buffer }
    }
}

impl Widget for InputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = centered_rect(70, 30, area);
        Clear.render(modal, buf);

        let block =
            theme::panel_block(self.title, true).style(Style::default().bg(theme::POPUP_BG));
        let inner = block.inner(modal);
        block.render(modal, buf);

        let mut lines = Vec::new();
        // The buffer may hold newlines (multiline prompts)
        for (i, part) in self.buffer.split('\n').enumerate() {
            let prefix = if i == 0 { "> " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(prefix, theme::accent_bold()),
                Span::styled(part.to_string(), theme::text_primary()),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Enter submit · Esc cancel",
            theme::text_muted(),
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// Confirmation shown when a refresh would overwrite unsaved edits.
pub struct ConfirmDiscardModal;

impl Widget for ConfirmDiscardModal {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = centered_rect(60, 25, area);
        Clear.render(modal, buf);

        let block = theme::panel_block("Unsaved edits", true)
            .style(Style::default().bg(theme::POPUP_BG));
        let inner = block.inner(modal);
        block.render(modal, buf);

        let lines = vec![
            Line::from(Span::styled(
                "This testcase was refreshed from the server while you were editing.",
                theme::text_primary(),
            )),
            Line::from(Span::styled(
                "Discard your unsaved edits and load the server copy?",
                theme::text_primary(),
            )),
            Line::default(),
            Line::from(Span::styled(
                "[y] discard edits   [n] keep editing",
                theme::text_muted(),
            )),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

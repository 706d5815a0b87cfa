//! Selectable document lists (requirements and standards).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme;

/// One row of a document pane.
pub struct DocumentItem {
    pub label: String,
    pub detail: String,
    pub selected: bool,
}

/// Checkbox-style list over a document mapping.
pub struct DocumentList {
    title: String,
    items: Vec<DocumentItem>,
    cursor: usize,
    focused: bool,
    empty_text: &'static str,
}

impl DocumentList {
    pub fn new(
        title: impl Into<String>,
        items: Vec<DocumentItem>,
        cursor: usize,
        focused: bool,
        empty_text: &'static str,
    ) -> Self {
        Self {
            title: title.into(),
            items,
            cursor,
            focused,
            empty_text,
        }
    }
}

impl Widget for DocumentList {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = theme::panel_block(&self.title, self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.items.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                self.empty_text,
                theme::text_muted(),
            )))
            .render(inner, buf);
            return;
        }

        // Keep the cursor visible within the pane height
        let visible = inner.height as usize;
        let first = self.cursor.saturating_sub(visible.saturating_sub(1));

        for (row, (i, item)) in self
            .items
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .enumerate()
        {
            let marker = if item.selected { "[x]" } else { "[ ]" };
            let style = if self.focused && i == self.cursor {
                theme::selection()
            } else {
                theme::text_primary()
            };
            let line = Line::from(vec![
                Span::styled(format!("{marker} "), style),
                Span::styled(item.label.clone(), style),
                Span::styled(format!("  {}", item.detail), theme::text_muted()),
            ]);
            buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
        }
    }
}

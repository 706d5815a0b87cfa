//! Header bar with app title, signed-in profile, and key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

use casegen_core::UserProfile;

use crate::theme;

/// Main header showing app title and the signed-in identity.
pub struct MainHeader<'a> {
    profile: Option<&'a UserProfile>,
}

impl<'a> MainHeader<'a> {
    pub fn new(profile: Option<&'a UserProfile>) -> Self {
        Self { profile }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = theme::panel_block("", false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut spans = vec![Span::styled(
            " AI Testcase Generator ",
            theme::accent_bold().add_modifier(Modifier::BOLD),
        )];

        if let Some(profile) = self.profile {
            spans.push(Span::styled(
                format!("— {} ", profile.name),
                theme::text_primary(),
            ));
            spans.push(Span::styled(
                format!("<{}> ", profile.email),
                theme::text_muted(),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(inner.x, inner.y, &line, inner.width);

        // Right-aligned key hints
        let hints = "[x] sign out  [q] quit";
        let width = hints.len() as u16;
        if inner.width > width {
            let hint_line = Line::from(Span::styled(hints, theme::text_muted()));
            buf.set_line(inner.x + inner.width - width, inner.y, &hint_line, width);
        }
    }
}

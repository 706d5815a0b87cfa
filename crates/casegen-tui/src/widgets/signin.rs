//! Sign-in and configuration-notice screens.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme;

/// Terminal notice shown when no Google client id is configured.
pub struct UnconfiguredScreen;

impl Widget for UnconfiguredScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled("AI Testcase Generator", theme::accent_bold())),
            Line::default(),
            Line::from(Span::styled(
                "Google login requires a client id to be configured.",
                theme::text_secondary(),
            )),
            Line::from(Span::styled(
                "Set CASEGEN_GOOGLE_CLIENT_ID or add [google].client_id to config.toml,",
                theme::text_secondary(),
            )),
            Line::from(Span::styled(
                "then restart the app.",
                theme::text_secondary(),
            )),
            Line::default(),
            Line::from(Span::styled("[q] quit", theme::text_muted())),
        ];

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(lines.len() as u16),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(rows[1], buf);
    }
}

/// Credential paste screen shown while signed out.
pub struct SignInScreen<'a> {
    pub buffer: &'a str,
    pub error: Option<&'a str>,
}

impl Widget for SignInScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Pasted tokens are long; show only the tail
        let shown: String = {
            let tail_len = 48usize;
            let chars: Vec<char> = self.buffer.chars().collect();
            if chars.len() > tail_len {
                let tail: String = chars[chars.len() - tail_len..].iter().collect();
                format!("…{tail}")
            } else {
                self.buffer.to_string()
            }
        };

        let mut lines = vec![
            Line::from(Span::styled("AI Testcase Generator", theme::accent_bold())),
            Line::default(),
            Line::from(Span::styled(
                "Sign in with your Google account to continue.",
                theme::text_secondary(),
            )),
            Line::from(Span::styled(
                "Paste your Google ID token and press Enter.",
                theme::text_secondary(),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("> ", theme::accent_bold()),
                Span::styled(shown, theme::text_primary()),
            ]),
        ];

        if let Some(error) = self.error {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(error, theme::status_red())));
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(lines.len() as u16),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(rows[1], buf);
    }
}

//! Read-only preview of the selected testcase.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use casegen_core::Testcase;

use crate::theme;

/// Renders the full fields of one testcase below the generated pane.
pub struct TestcasePreview<'a> {
    testcase: &'a Testcase,
}

impl<'a> TestcasePreview<'a> {
    pub fn new(testcase: &'a Testcase) -> Self {
        Self { testcase }
    }
}

impl Widget for TestcasePreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let tc = self.testcase;
        let title = format!("Testcase {}", tc.tc_id);
        let block = theme::panel_block(&title, false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut lines = vec![Line::from(Span::styled(
            tc.title.clone(),
            theme::accent_bold(),
        ))];

        if !tc.preconditions.is_empty() {
            lines.push(Line::from(Span::styled(
                "Preconditions",
                theme::text_secondary(),
            )));
            for (i, p) in tc.preconditions.iter().enumerate() {
                lines.push(Line::from(Span::styled(
                    format!("  {}. {p}", i + 1),
                    theme::text_primary(),
                )));
            }
        }

        if !tc.steps.is_empty() {
            lines.push(Line::from(Span::styled("Steps", theme::text_secondary())));
            for (i, s) in tc.steps.iter().enumerate() {
                lines.push(Line::from(Span::styled(
                    format!("  {}. {s}", i + 1),
                    theme::text_primary(),
                )));
            }
        }

        if !tc.expected.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Expected: ", theme::text_secondary()),
                Span::styled(tc.expected.clone(), theme::text_primary()),
            ]));
        }

        lines.push(Line::from(Span::styled(
            format!(
                "Automatable: {} — Suggested: {} — Confidence: {}",
                if tc.automatable { "Yes" } else { "No" },
                tc.suggested_tool,
                tc.confidence
            ),
            theme::text_muted(),
        )));
        lines.push(Line::from(Span::styled(
            format!("Compliance: {}", tc.compliance.join(", ")),
            theme::text_muted(),
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

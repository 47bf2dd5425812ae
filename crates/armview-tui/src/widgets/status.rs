//! Full-screen status message shown before the rule set is available.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

pub struct StatusScreen<'a> {
    lines: Vec<(String, Style)>,
    theme: &'a Theme,
}

impl<'a> StatusScreen<'a> {
    pub fn loading(origin: &str, theme: &'a Theme) -> Self {
        Self {
            lines: vec![
                ("Loading rules...".to_string(), theme.loading),
                (origin.to_string(), theme.hint),
            ],
            theme,
        }
    }

    pub fn failed(message: &str, theme: &'a Theme) -> Self {
        Self {
            lines: vec![
                ("Failed to load rules".to_string(), theme.error),
                (message.to_string(), Style::default()),
                (String::new(), Style::default()),
                ("Restart armview to try again. Press q to quit.".to_string(), theme.hint),
            ],
            theme,
        }
    }
}

impl Widget for StatusScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        let top_pad = inner.height.saturating_sub(self.lines.len() as u16) / 2;
        let body = Rect {
            y: inner.y + top_pad,
            height: inner.height - top_pad,
            ..inner
        };

        let lines: Vec<Line> = self
            .lines
            .into_iter()
            .map(|(text, style)| Line::from(Span::styled(text, style)))
            .collect();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(body, buf);
    }
}

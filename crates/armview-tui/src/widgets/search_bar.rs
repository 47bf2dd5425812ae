//! Search bar widget: free-text filter above the rule cards.
//!
//! The filter is re-applied on every edit; there is no submit step.

use super::text_input::LineInput;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub struct SearchBar<'a> {
    input: &'a LineInput,
    matches: usize,
    total: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(
        input: &'a LineInput,
        matches: usize,
        total: usize,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { input, matches, total, focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.input.cursor_chars() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title("Search")
            .title_bottom(Line::from(format!(" {}/{} rules ", self.matches, self.total)).right_aligned())
            .border_style(border_style);

        let line = if self.input.text.is_empty() && !self.focused {
            Line::from(Span::styled("press / to search by weather or symptom", self.theme.hint))
        } else {
            Line::from(self.input.text.as_str())
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}

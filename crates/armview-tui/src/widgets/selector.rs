//! Vocabulary selector: the pick list on the left of both lookup views.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor.
//! - `PageUp`/`PageDown` move by a page.
//!
//! Row 0 is always the placeholder entry meaning "nothing selected"; running
//! a lookup from it yields no rules.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct SelectorState {
    options: Vec<String>,
    /// Row under the cursor; 0 is the placeholder.
    pub cursor: usize,
}

impl SelectorState {
    pub fn new(vocabulary: &[String]) -> Self {
        Self {
            options: vocabulary.to_vec(),
            cursor: 0,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The value under the cursor, or `""` on the placeholder row.
    pub fn selected(&self) -> &str {
        match self.cursor {
            0 => "",
            n => self.options.get(n - 1).map(String::as_str).unwrap_or(""),
        }
    }

    /// Move the cursor to `value`. Returns `false` (cursor unchanged) when the
    /// value is not in the vocabulary.
    pub fn select_value(&mut self, value: &str) -> bool {
        match self.options.iter().position(|o| o == value) {
            Some(i) => {
                self.cursor = i + 1;
                true
            }
            None => false,
        }
    }

    fn last_row(&self) -> usize {
        self.options.len()
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                self.cursor = (self.cursor + 1).min(self.last_row());
            }
            AppEvent::ScrollUp => {
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
            }
            AppEvent::ScrollDown => {
                self.cursor = (self.cursor + PAGE_STEP).min(self.last_row());
            }
            _ => return,
        }
        tracing::debug!(cursor = self.cursor, value = %self.selected(), "selector: moved");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct Selector<'a> {
    state: &'a SelectorState,
    title: &'a str,
    placeholder: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Selector<'a> {
    pub fn new(
        state: &'a SelectorState,
        title: &'a str,
        placeholder: &'a str,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, title, placeholder, focused, theme }
    }
}

impl Widget for Selector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title(self.title).border_style(border_style);

        let items: Vec<ListItem> = std::iter::once(ListItem::new(Line::from(Span::styled(
            self.placeholder,
            self.theme.hint,
        ))))
        .chain(
            self.state
                .options
                .iter()
                .map(|o| ListItem::new(Line::from(o.as_str()))),
        )
        .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.selected)
            .highlight_symbol("▸ ");

        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

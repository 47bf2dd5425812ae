//! Rule cards widget: the scrollable "All Rules" pane.
//!
//! Each card shows `antecedent → consequent`. At most one card is expanded
//! at a time; expanding reveals support, confidence and lift.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor to the previous card |
//! | `↓` / `j` | Move cursor to the next card |
//! | `PageUp` / `Ctrl+u` | Move up one page of cards |
//! | `PageDown` / `Ctrl+d` | Move down one page of cards |
//! | `Space` / `Enter` | Expand or collapse the card under the cursor |
//!
//! The toggle key is configurable; the card hints name whichever key is bound.
//!
//! # Scroll semantics
//!
//! `scroll` is the first visible line. It is adjusted during render so the
//! whole cursor card stays on screen.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::format;
use crate::theme::Theme;
use armview_core::{toggle_expand, Rule, Selection};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 5;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RuleCardsState {
    /// Rules currently passing the search filter, in rule-set order.
    pub rules: Vec<Rule>,
    /// Index into `rules` of the highlighted card.
    pub cursor: usize,
    /// Expanded card, by position in `rules`.
    pub selection: Selection,
    scroll: Cell<usize>,
}

impl RuleCardsState {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Replace the filtered rules after the search term changed.
    ///
    /// The expanded position is kept as is, so the card now at that position
    /// (if any) shows as expanded.
    pub fn set_rules(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
        self.cursor = self.cursor.min(self.rules.len().saturating_sub(1));
        self.scroll.set(0);
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.selection.is_expanded(index)
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.rules.len();
        if total == 0 {
            return;
        }
        let last = total - 1;

        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "cards: cursor up");
            }
            AppEvent::Nav(Direction::Down) => {
                self.cursor = (self.cursor + 1).min(last);
                tracing::debug!(cursor = self.cursor, "cards: cursor down");
            }
            AppEvent::ScrollUp => {
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
                tracing::debug!(cursor = self.cursor, "cards: page up");
            }
            AppEvent::ScrollDown => {
                self.cursor = (self.cursor + PAGE_STEP).min(last);
                tracing::debug!(cursor = self.cursor, "cards: page down");
            }
            AppEvent::ToggleCard | AppEvent::Enter => {
                self.selection = toggle_expand(self.selection, self.cursor);
                tracing::debug!(
                    cursor = self.cursor,
                    expanded = ?self.selection.index(),
                    "cards: toggle"
                );
            }
            _ => {}
        }
    }

    /// Line range `[start, end)` occupied by card `index`.
    fn card_span(&self, index: usize) -> (usize, usize) {
        let start: usize = (0..index).map(|i| card_height(self.is_expanded(i))).sum();
        (start, start + card_height(self.is_expanded(index)))
    }
}

fn card_height(expanded: bool) -> usize {
    // header + hint + spacer, plus three metric lines when expanded
    if expanded {
        6
    } else {
        3
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct RuleCards<'a> {
    state: &'a RuleCardsState,
    decimals: usize,
    focused: bool,
    toggle_key: char,
    theme: &'a Theme,
}

impl<'a> RuleCards<'a> {
    pub fn new(
        state: &'a RuleCardsState,
        decimals: usize,
        focused: bool,
        toggle_key: char,
        theme: &'a Theme,
    ) -> Self {
        Self { state, decimals, focused, toggle_key, theme }
    }
}

impl Widget for RuleCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title("All Rules").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.state.rules.is_empty() {
            Paragraph::new(Line::from(Span::styled("No rules match.", self.theme.hint)))
                .render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let key = key_label(self.toggle_key);

        // Keep the cursor card fully visible (or its top, if it is taller
        // than the pane).
        let (card_start, card_end) = self.state.card_span(self.state.cursor);
        let mut scroll = self.state.scroll.get();
        if card_start < scroll {
            scroll = card_start;
        } else if card_end > scroll + height {
            scroll = card_end.saturating_sub(height).min(card_start);
        }
        self.state.scroll.set(scroll);

        let lines: Vec<Line<'static>> = self
            .state
            .rules
            .iter()
            .enumerate()
            .flat_map(|(i, rule)| {
                let highlight = self.focused && i == self.state.cursor;
                let expanded = self.state.is_expanded(i);
                card_lines(rule, expanded, highlight, &key, self.decimals, self.theme)
            })
            .collect();
        let total_lines = lines.len();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines)
            .scroll((scroll.min(u16::MAX as usize) as u16, 0))
            .render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total_lines)
            .position(scroll)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Card rendering
// ---------------------------------------------------------------------------

/// Name of a key as shown in the card hints.
fn key_label(key: char) -> String {
    match key {
        ' ' => "Space".to_string(),
        c => c.to_string(),
    }
}

fn card_lines(
    rule: &Rule,
    expanded: bool,
    highlight: bool,
    key: &str,
    decimals: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut header = Line::from(vec![
        Span::styled(rule.antecedent.clone(), theme.antecedent),
        Span::raw(" → "),
        Span::styled(rule.consequent.clone(), theme.consequent),
    ]);
    if highlight {
        header = header.patch_style(theme.selected);
    }

    let mut lines = vec![header];

    if expanded {
        lines.push(metric_line("Support", format::percent(rule.support, decimals), Style::default(), theme));
        lines.push(metric_line(
            "Confidence",
            format::percent(rule.confidence, decimals),
            Style::default(),
            theme,
        ));
        lines.push(metric_line("Lift", format::lift(rule.lift), theme.lift_style(rule.lift), theme));
    }

    let hint = if expanded {
        format!("  {key} to collapse ▲")
    } else {
        format!("  {key} to expand ▼")
    };
    lines.push(Line::from(Span::styled(hint, theme.hint)));
    lines.push(Line::default());
    lines
}

fn metric_line(label: &str, value: String, value_style: Style, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label}: "), theme.metric_label),
        Span::styled(value, value_style),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

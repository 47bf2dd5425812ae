//! Lookup results: the right-hand pane of both lookup views.
//!
//! Each row names the *other* side of the rule (the symptom for a weather
//! lookup, the weather condition for a symptom lookup) with its confidence
//! and lift.
//!
//! The pane gets focus with `→` / `l` and gives it back with `←` / `h`.
//! While focused, `↑` / `↓` scroll one row and `PageUp` / `PageDown` one page.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::format;
use crate::theme::Theme;
use armview_core::Rule;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 10;

/// Which field of each result rule is the row label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shown {
    Antecedent,
    Consequent,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LookupResultsState {
    /// Rules found by the last lookup, in rule-set order.
    pub rules: Vec<Rule>,
    /// First visible row. Clamped during render once the pane height is known.
    scroll: Cell<usize>,
}

impl LookupResultsState {
    /// Replace the results after a new lookup and scroll back to the top.
    pub fn set_rules(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
        self.scroll.set(0);
    }

    pub fn scroll(&self) -> usize {
        self.scroll.get()
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let last = self.rules.len().saturating_sub(1);
        let scroll = self.scroll.get();
        let next = match event {
            AppEvent::Nav(Direction::Up) => scroll.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => (scroll + 1).min(last),
            AppEvent::ScrollUp => scroll.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => (scroll + PAGE_STEP).min(last),
            _ => return,
        };
        self.scroll.set(next);
        tracing::debug!(scroll = next, "results: scroll");
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct LookupResults<'a> {
    state: &'a LookupResultsState,
    shown: Shown,
    title: &'a str,
    decimals: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> LookupResults<'a> {
    pub fn new(
        state: &'a LookupResultsState,
        shown: Shown,
        title: &'a str,
        decimals: usize,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, shown, title, decimals, focused, theme }
    }
}

impl Widget for LookupResults<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered().title(self.title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let rules = &self.state.rules;
        if rules.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "Pick a value and press Enter.",
                self.theme.hint,
            )))
            .render(inner, buf);
            return;
        }

        // Never scroll past the point where the last row sits at the bottom.
        let height = inner.height as usize;
        let scroll = self.state.scroll.get().min(rules.len().saturating_sub(height));
        self.state.scroll.set(scroll);

        let lines: Vec<Line> =
            rules.iter().map(|r| result_line(r, self.shown, self.decimals, self.theme)).collect();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines)
            .scroll((scroll.min(u16::MAX as usize) as u16, 0))
            .render(text_area, buf);

        let mut sb_state = ScrollbarState::new(rules.len())
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

fn result_line<'a>(rule: &'a Rule, shown: Shown, decimals: usize, theme: &Theme) -> Line<'a> {
    let (label, style) = match shown {
        Shown::Antecedent => (rule.antecedent.as_str(), theme.antecedent),
        Shown::Consequent => (rule.consequent.as_str(), theme.consequent),
    };
    Line::from(vec![
        Span::styled(label, style),
        Span::raw(format!(" (Confidence: {}, Lift: ", format::percent(rule.confidence, decimals))),
        Span::styled(format::lift(rule.lift), theme.lift_style(rule.lift)),
        Span::raw(")"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(rules: Vec<Rule>) -> LookupResultsState {
        let mut s = LookupResultsState::default();
        s.set_rules(rules);
        s
    }

    fn many(n: usize) -> Vec<Rule> {
        (0..n).map(|i| Rule::new("Rainy", format!("Symptom{i:02}"), 0.1, 0.5, 1.2)).collect()
    }

    fn screen(state: &LookupResultsState, shown: Shown, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, 60, height);
        let mut buf = Buffer::empty(area);
        let theme = Theme::load_default();
        LookupResults::new(state, shown, "Predicted Symptoms", 1, true, &theme)
            .render(area, &mut buf);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    fn visible(rows: &[String]) -> Vec<usize> {
        (0..10).filter(|i| rows.iter().any(|r| r.contains(&format!("Symptom{i:02} ")))).collect()
    }

    #[test]
    fn shows_consequent_with_metrics() {
        let s = state(vec![Rule::new("Rainy", "Cough", 0.12, 0.65, 1.8)]);
        let rows = screen(&s, Shown::Consequent, 5);
        assert!(rows[1].contains("Cough (Confidence: 65.0%, Lift: 1.80)"), "{rows:?}");
    }

    #[test]
    fn shows_antecedent_for_reverse_lookup() {
        let s = state(vec![Rule::new("Rainy", "Cough", 0.12, 0.65, 1.8)]);
        let rows = screen(&s, Shown::Antecedent, 5);
        assert!(rows[1].contains("Rainy (Confidence"));
    }

    #[test]
    fn empty_result_shows_hint() {
        let rows = screen(&LookupResultsState::default(), Shown::Consequent, 5);
        assert!(rows[1].contains("Pick a value"));
    }

    #[test]
    fn scrolling_reaches_every_result() {
        let mut s = state(many(10));
        // 4 inner rows
        let rows = screen(&s, Shown::Consequent, 6);
        assert_eq!(visible(&rows), vec![0, 1, 2, 3]);

        s.handle(&AppEvent::ScrollDown);
        let rows = screen(&s, Shown::Consequent, 6);
        assert_eq!(visible(&rows), vec![6, 7, 8, 9]);
        // Clamped so the last row sits on the bottom line
        assert_eq!(s.scroll(), 6);

        s.handle(&AppEvent::Nav(Direction::Up));
        let rows = screen(&s, Shown::Consequent, 6);
        assert_eq!(visible(&rows), vec![5, 6, 7, 8]);
    }

    #[test]
    fn scrollbar_drawn_when_results_overflow() {
        let s = state(many(10));
        let rows = screen(&s, Shown::Consequent, 6);
        // Track or thumb in the column left of the right border
        assert!(rows[1..5].iter().all(|r| r.chars().nth(58) != Some(' ')), "{rows:?}");
    }

    #[test]
    fn new_results_scroll_back_to_top() {
        let mut s = state(many(10));
        s.handle(&AppEvent::ScrollDown);
        assert!(s.scroll() > 0);
        s.set_rules(many(3));
        assert_eq!(s.scroll(), 0);
    }
}

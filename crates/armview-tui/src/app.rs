//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction, Keymap},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        results::{LookupResults, LookupResultsState, Shown},
        rule_cards::{RuleCards, RuleCardsState},
        search_bar::SearchBar,
        selector::{Selector, SelectorState},
        status::StatusScreen,
        tab_bar::TabBar,
        text_input::LineInput,
    },
};
use armview_core::{
    config::Config, query_by_antecedent, query_by_consequent, search_rules, DataUnavailable, Rule,
    RuleSet,
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::sync::oneshot::{self, error::TryRecvError};

/// The fetch result handed to the UI once the source resolves.
pub type RuleFeed = oneshot::Receiver<Result<RuleSet, DataUnavailable>>;

// ---------------------------------------------------------------------------
// Focus + view types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The selector (lookup views) or the card list (All Rules).
    Main,
    /// The results pane of a lookup view.
    Results,
    Search,
    /// Vim-style `:` command line is active.
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    WeatherToSymptoms,
    SymptomToWeather,
    AllRules,
}

impl View {
    pub const ALL: [View; 3] = [View::WeatherToSymptoms, View::SymptomToWeather, View::AllRules];

    pub fn index(self) -> usize {
        match self {
            View::WeatherToSymptoms => 0,
            View::SymptomToWeather => 1,
            View::AllRules => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::WeatherToSymptoms => "Weather → Symptoms",
            View::SymptomToWeather => "Symptom → Weather",
            View::AllRules => "All Rules",
        }
    }

    fn from_index(index: usize) -> Option<View> {
        View::ALL.get(index).copied()
    }

    fn next(self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    fn prev(self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}

/// Selector plus the rules found by the last lookup.
pub struct LookupTab {
    pub selector: SelectorState,
    pub results: LookupResultsState,
}

impl LookupTab {
    fn new(vocabulary: &[String]) -> Self {
        Self {
            selector: SelectorState::new(vocabulary),
            results: LookupResultsState::default(),
        }
    }
}

/// Everything that exists once the rule set has arrived.
pub struct Loaded {
    pub rules: RuleSet,
    pub weather: LookupTab,
    pub symptom: LookupTab,
    pub search: LineInput,
    pub cards: RuleCardsState,
}

impl Loaded {
    pub fn new(rules: RuleSet) -> Self {
        let weather = LookupTab::new(rules.antecedents());
        let symptom = LookupTab::new(rules.consequents());
        let cards = RuleCardsState::new(rules.rules().to_vec());
        Self {
            rules,
            weather,
            symptom,
            search: LineInput::default(),
            cards,
        }
    }

    pub fn run_weather_lookup(&mut self) {
        let value = self.weather.selector.selected();
        let hits: Vec<Rule> = query_by_antecedent(&self.rules, value).into_iter().cloned().collect();
        tracing::debug!(weather = %value, hits = hits.len(), "weather lookup");
        self.weather.results.set_rules(hits);
    }

    pub fn run_symptom_lookup(&mut self) {
        let value = self.symptom.selector.selected();
        let hits: Vec<Rule> = query_by_consequent(&self.rules, value).into_iter().cloned().collect();
        tracing::debug!(symptom = %value, hits = hits.len(), "symptom lookup");
        self.symptom.results.set_rules(hits);
    }

    /// Re-filter the card list from the current search text.
    pub fn apply_search(&mut self) {
        let term = self.search.text.as_str();
        let filtered: Vec<Rule> = search_rules(&self.rules, term).into_iter().cloned().collect();
        tracing::debug!(term = %term, hits = filtered.len(), "search");
        self.cards.set_rules(filtered);
    }
}

pub enum LoadState {
    Loading { origin: String },
    Ready(Box<Loaded>),
    Failed(String),
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub load: LoadState,
    pub view: View,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub keymap: Keymap,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    fn new(load: LoadState, config: Config, theme: Theme) -> Self {
        let keymap = Keymap::from_config(&config.keybindings);
        Self {
            load,
            view: View::WeatherToSymptoms,
            focus: Focus::Main,
            prev_focus: Focus::Main,
            theme,
            config,
            keymap,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        }
    }

    fn loaded_mut(&mut self) -> Option<&mut Loaded> {
        match &mut self.load {
            LoadState::Ready(loaded) => Some(&mut **loaded),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
    feed: Option<RuleFeed>,
}

impl App {
    /// Start in the loading state; the rule set arrives over `feed`.
    pub fn new(feed: RuleFeed, origin: impl Into<String>, config: Config, theme: Theme) -> Self {
        let load = LoadState::Loading { origin: origin.into() };
        App {
            state: AppState::new(load, config, theme),
            feed: Some(feed),
        }
    }

    /// Start with an already loaded rule set.
    pub fn with_rules(rules: RuleSet, config: Config, theme: Theme) -> Self {
        let load = LoadState::Ready(Box::new(Loaded::new(rules)));
        App {
            state: AppState::new(load, config, theme),
            feed: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.poll_feed();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key)
                        if key.kind == crossterm::event::KeyEventKind::Press =>
                    {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw, &self.state.keymap)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                event = ?ev,
                                "key event"
                            );
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other, &self.state.keymap) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Move from `Loading` to `Ready` or `Failed` once the fetch resolves.
    pub fn poll_feed(&mut self) {
        let Some(feed) = self.feed.as_mut() else {
            return;
        };
        let next = match feed.try_recv() {
            Err(TryRecvError::Empty) => return,
            Ok(Ok(rules)) => {
                tracing::info!(rules = rules.len(), "rules loaded");
                LoadState::Ready(Box::new(Loaded::new(rules)))
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "rule load failed");
                LoadState::Failed(e.to_string())
            }
            Err(TryRecvError::Closed) => {
                tracing::warn!("rule feed closed without a result");
                LoadState::Failed("rule fetch ended without a result".to_string())
            }
        };
        self.state.load = next;
        self.feed = None;
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Quit => s.quit = true,
                AppEvent::Enter => {
                    let input = s.command_bar.input.text.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            let view_before = s.view;
                            match execute_command(s, cmd) {
                                Ok(()) => {
                                    s.command_bar.clear();
                                    s.focus = if s.view != view_before {
                                        Focus::Main
                                    } else {
                                        s.prev_focus
                                    };
                                }
                                Err(msg) => s.command_bar.error = Some(msg),
                            }
                        }
                        Err(msg) if msg.is_empty() => {
                            // Empty input, just close
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            s.command_bar.error = Some(msg);
                        }
                    }
                }
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            // Toggle help (only when not typing in the search bar)
            AppEvent::Char('?') if s.focus != Focus::Search => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            // Enter command mode with `:` (not from the search bar)
            AppEvent::Char(':') if s.focus != Focus::Search => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::NextView => switch_view(s, s.view.next()),
            AppEvent::PrevView => switch_view(s, s.view.prev()),
            AppEvent::ShowView(i) => {
                if let Some(view) = View::from_index(i) {
                    switch_view(s, view);
                }
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch(s, other),
        }
    }
}

fn switch_view(s: &mut AppState, view: View) {
    tracing::debug!(from = ?s.view, to = ?view, "view switch");
    s.view = view;
    s.focus = Focus::Main;
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Search | Focus::Command)
}

/// Route an event to the widget that owns the current view and focus.
///
/// Nothing is routed until the rule set is ready.
fn dispatch(s: &mut AppState, event: AppEvent) {
    if !matches!(s.load, LoadState::Ready(_)) {
        return;
    }

    // Focus moves between the search bar and the card list, and between the
    // selector and the results pane of a lookup view.
    let lookup_view = s.view != View::AllRules;
    match (s.focus, &event) {
        (Focus::Main | Focus::Results, AppEvent::SearchFocus) => {
            tracing::debug!(from = ?s.view, "focus -> Search");
            s.view = View::AllRules;
            s.focus = Focus::Search;
            return;
        }
        (Focus::Search, AppEvent::Escape | AppEvent::Enter) => {
            tracing::debug!("focus: Search -> Main");
            s.focus = Focus::Main;
            return;
        }
        (Focus::Main, AppEvent::Nav(Direction::Right)) if lookup_view => {
            tracing::debug!("focus: Main -> Results");
            s.focus = Focus::Results;
            return;
        }
        (Focus::Results, AppEvent::Nav(Direction::Left) | AppEvent::Escape) => {
            tracing::debug!("focus: Results -> Main");
            s.focus = Focus::Main;
            return;
        }
        _ => {}
    }

    let (view, focus) = (s.view, s.focus);
    let Some(loaded) = s.loaded_mut() else {
        return;
    };

    match view {
        View::WeatherToSymptoms if focus == Focus::Results => loaded.weather.results.handle(&event),
        View::SymptomToWeather if focus == Focus::Results => loaded.symptom.results.handle(&event),
        View::WeatherToSymptoms => match event {
            AppEvent::Enter => loaded.run_weather_lookup(),
            other => loaded.weather.selector.handle(&other),
        },
        View::SymptomToWeather => match event {
            AppEvent::Enter => loaded.run_symptom_lookup(),
            other => loaded.symptom.selector.handle(&other),
        },
        View::AllRules if focus == Focus::Search => match event {
            AppEvent::Nav(Direction::Up | Direction::Down) => loaded.cards.handle(&event),
            other => {
                if loaded.search.handle(&other) {
                    loaded.apply_search();
                }
            }
        },
        View::AllRules => loaded.cards.handle(&event),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line tab bar | body
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1)])
        .split(area);

    frame.render_widget(TabBar::new(state.view, &state.theme), vert[0]);

    let mut cursor = None;
    match &state.load {
        LoadState::Loading { origin } => {
            frame.render_widget(StatusScreen::loading(origin, &state.theme), vert[1]);
        }
        LoadState::Failed(message) => {
            frame.render_widget(StatusScreen::failed(message, &state.theme), vert[1]);
        }
        LoadState::Ready(loaded) => cursor = draw_view(frame, state, loaded, vert[1]),
    }

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom() - 1, height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return; // cursor is set; skip search-bar cursor below
    }

    if let Some(pos) = cursor {
        frame.set_cursor_position(pos);
    }
}

/// Render the active view. Returns the search-bar cursor when it is focused.
fn draw_view(frame: &mut Frame, state: &AppState, loaded: &Loaded, area: Rect) -> Option<(u16, u16)> {
    let ui = &state.config.ui;
    let main_focused = state.focus == Focus::Main;

    let (tab, titles, shown) = match state.view {
        View::WeatherToSymptoms => (
            &loaded.weather,
            ("Weather Condition", "-- Select Weather --", "Predicted Symptoms"),
            Shown::Consequent,
        ),
        View::SymptomToWeather => (
            &loaded.symptom,
            ("Symptom", "-- Select Symptom --", "Likely Weather Conditions"),
            Shown::Antecedent,
        ),
        View::AllRules => {
            let vert = Layout::default()
                .direction(LayoutDir::Vertical)
                .constraints([Constraint::Length(3), Constraint::Fill(1)])
                .split(area);
            let search_focused = state.focus == Focus::Search;
            let bar = SearchBar::new(
                &loaded.search,
                loaded.cards.rules.len(),
                loaded.rules.len(),
                search_focused,
                &state.theme,
            );
            let pos = bar.cursor_position(vert[0]);
            frame.render_widget(bar, vert[0]);
            frame.render_widget(
                RuleCards::new(
                    &loaded.cards,
                    ui.card_percent_decimals,
                    main_focused,
                    state.keymap.toggle_card,
                    &state.theme,
                ),
                vert[1],
            );
            return search_focused.then_some(pos);
        }
    };

    // Horizontal body split
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(ui.list_pane_width_pct), Constraint::Fill(1)])
        .split(area);

    let (selector_title, placeholder, results_title) = titles;
    frame.render_widget(
        Selector::new(&tab.selector, selector_title, placeholder, main_focused, &state.theme),
        horiz[0],
    );
    frame.render_widget(
        LookupResults::new(
            &tab.results,
            shown,
            results_title,
            ui.prediction_percent_decimals,
            state.focus == Focus::Results,
            &state.theme,
        ),
        horiz[1],
    );
    None
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

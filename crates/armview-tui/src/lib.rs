//! armview TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod format;
pub mod theme;
pub mod widgets;

pub use app::{App, RuleFeed};

use armview_core::config::Config;

/// Run the TUI until the user quits. The rule set arrives over `feed` while
/// the loading screen names `origin`.
pub fn run(feed: RuleFeed, origin: impl Into<String>, config: Config) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&config.ui.theme);
    App::new(feed, origin, config, theme).run()
}

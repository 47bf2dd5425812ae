//! Ratatui widgets for the armview TUI.

pub mod command_bar;
pub mod help;
pub mod results;
pub mod rule_cards;
pub mod search_bar;
pub mod selector;
pub mod status;
pub mod tab_bar;
pub mod text_input;

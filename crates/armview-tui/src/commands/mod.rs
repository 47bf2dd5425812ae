// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{
    app::{AppState, LoadState, View},
    theme::Theme,
};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Display help
    Help,
    // Change theme
    Theme(String),
    // Run a weather → symptoms lookup for an exact antecedent
    Weather(String),
    // Run a symptom → weather lookup for an exact consequent
    Symptom(String),
    // Set the All Rules search term
    Search(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "theme" => required(rest, "usage: theme <default|gruvbox>").map(Command::Theme),
            "weather" | "w" => required(rest, "usage: weather <condition>").map(Command::Weather),
            "symptom" | "s" => required(rest, "usage: symptom <symptom>").map(Command::Symptom),
            // An empty term is valid and clears the filter.
            "search" => Ok(Command::Search(rest.to_string())),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(usage.to_string())
    } else {
        Ok(rest.to_string())
    }
}

/// Execute a parsed [`Command`] against the application state.
///
/// An `Err` is shown in the command bar, which then stays open.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::named(&name).ok_or_else(|| format!("unknown theme: {name}"))?;
        }
        Command::Weather(value) => {
            let loaded = ready(s)?;
            if !loaded.weather.selector.select_value(&value) {
                return Err(format!("no rules for weather: {value}"));
            }
            loaded.run_weather_lookup();
            s.view = View::WeatherToSymptoms;
        }
        Command::Symptom(value) => {
            let loaded = ready(s)?;
            if !loaded.symptom.selector.select_value(&value) {
                return Err(format!("no rules for symptom: {value}"));
            }
            loaded.run_symptom_lookup();
            s.view = View::SymptomToWeather;
        }
        Command::Search(term) => {
            let loaded = ready(s)?;
            loaded.search.set(term);
            loaded.apply_search();
            s.view = View::AllRules;
        }
    }
    Ok(())
}

fn ready(s: &mut AppState) -> Result<&mut crate::app::Loaded, String> {
    match &mut s.load {
        LoadState::Ready(loaded) => Ok(&mut **loaded),
        LoadState::Loading { .. } => Err("rules are still loading".to_string()),
        LoadState::Failed(_) => Err("rules are unavailable".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

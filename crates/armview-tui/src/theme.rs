//! Colour theme for the armview TUI.
//!
//! Themes are defined as TOML files. The built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::by_name`] at startup and pass the result through the
//! application as a shared reference.
//!
//! # Lift colouring
//!
//! Lift above 1.0 (positive association) and below 1.0 (negative
//! association) get distinct styles so strong rules stand out in result
//! lists.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawRules {
    antecedent: RawStyle,
    consequent: RawStyle,
    metric_label: RawStyle,
    hint: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawLift {
    positive: RawStyle,
    negative: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    loading: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    rules: RawRules,
    lift: RawLift,
    borders: RawBorders,
    status: RawStatus,
    selected: RawStyle,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone)]
pub struct Theme {
    pub antecedent: Style,
    pub consequent: Style,
    /// "Support:", "Confidence:" labels on expanded cards.
    pub metric_label: Style,
    /// Italic expand/collapse hints and placeholder text.
    pub hint: Style,

    pub lift_positive: Style,
    pub lift_negative: Style,

    /// Border style for the currently focused pane.
    pub border_focused: Style,
    /// Border style for the command bar pane
    pub border_command_bar: Style,
    /// Border style for unfocused panes.
    pub border_unfocused: Style,

    pub loading: Style,
    pub error: Style,

    /// Highlight for the list row under the cursor.
    pub selected: Style,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. The theme ships inside the
    /// binary and is covered by tests, so this should never happen.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a theme name as accepted by `:theme`, or `None` if it is unknown.
    pub fn named(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Resolve the `[ui] theme` config value. Unknown names fall back to the
    /// default theme.
    pub fn by_name(name: &str) -> Self {
        Self::named(name).unwrap_or_else(|| {
            tracing::warn!(theme = %name, "unknown theme; using default");
            Self::load_default()
        })
    }

    /// Parse a theme from a TOML string.
    ///
    /// Unknown keys are ignored so user themes can be forward-compatible with
    /// future theme additions.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            antecedent: raw.rules.antecedent.into_style(),
            consequent: raw.rules.consequent.into_style(),
            metric_label: raw.rules.metric_label.into_style(),
            hint: raw.rules.hint.into_style(),
            lift_positive: raw.lift.positive.into_style(),
            lift_negative: raw.lift.negative.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            loading: raw.status.loading.into_style(),
            error: raw.status.error.into_style(),
            selected: raw.selected.into_style(),
        })
    }

    /// Style for a lift value: positive association above 1.0, negative
    /// below, unstyled at exactly 1.0 or when missing.
    pub fn lift_style(&self, lift: f64) -> Style {
        if lift > 1.0 {
            self.lift_positive
        } else if lift < 1.0 {
            self.lift_negative
        } else {
            Style::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_loads() {
        let theme = Theme::load_default();
        assert_ne!(theme.antecedent, Style::default());
        assert_ne!(theme.border_focused, Style::default());
        assert_ne!(theme.error, Style::default());
        assert_ne!(theme.selected, Style::default());
    }

    #[test]
    fn gruvbox_dark_theme_loads() {
        let theme = Theme::load_gruvbox_dark();
        assert_ne!(theme.antecedent, Style::default());
        assert_ne!(theme.lift_positive, Style::default());
        assert_ne!(theme.border_focused, Style::default());
    }

    #[test]
    fn by_name_resolves_aliases() {
        let gruvbox = Theme::load_gruvbox_dark();
        assert_eq!(Theme::by_name("Gruvbox-Dark").antecedent, gruvbox.antecedent);
        assert_eq!(
            Theme::by_name("no-such-theme").antecedent,
            Theme::load_default().antecedent
        );
    }

    #[test]
    fn named_rejects_unknown_themes() {
        assert!(Theme::named("default").is_some());
        assert!(Theme::named("GRUVBOX").is_some());
        assert!(Theme::named("solarized").is_none());
    }

    #[test]
    fn lift_style_thresholds() {
        let theme = Theme::load_default();
        assert_eq!(theme.lift_style(1.8), theme.lift_positive);
        assert_eq!(theme.lift_style(0.9), theme.lift_negative);
        assert_eq!(theme.lift_style(1.0), Style::default());
        assert_eq!(theme.lift_style(f64::NAN), Style::default());
    }

    #[test]
    fn parse_hex_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
    }

    #[test]
    fn parse_indexed_color() {
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
    }

    #[test]
    fn parse_unknown_color_returns_none() {
        assert_eq!(parse_color("chartreuse"), None);
    }
}

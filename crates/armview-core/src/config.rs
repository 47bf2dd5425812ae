//! Configuration types for armview.
//!
//! [`Config::load`] reads `~/.config/armview/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[source]
url = "http://127.0.0.1:8000/api/rules"

[ui]
theme                        = "default"
list_pane_width_pct          = 40
card_percent_decimals        = 2
prediction_percent_decimals  = 1

[keybindings]
search_focus = "/"
toggle_card  = " "
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/armview/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

/// `[source]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Endpoint returning the full rule set as a JSON array.
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_url() -> String { "http://127.0.0.1:8000/api/rules".to_string() }

impl Default for SourceConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Width of the selector pane in the lookup views.
    #[serde(default = "default_list_pane_width_pct")]
    pub list_pane_width_pct: u16,
    /// Decimal places for support/confidence on expanded rule cards.
    #[serde(default = "default_card_percent_decimals")]
    pub card_percent_decimals: usize,
    /// Decimal places for confidence in lookup results.
    #[serde(default = "default_prediction_percent_decimals")]
    pub prediction_percent_decimals: usize,
}

fn default_theme() -> String { "default".to_string() }
fn default_list_pane_width_pct() -> u16 { 40 }
fn default_card_percent_decimals() -> usize { 2 }
fn default_prediction_percent_decimals() -> usize { 1 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            list_pane_width_pct: default_list_pane_width_pct(),
            card_percent_decimals: default_card_percent_decimals(),
            prediction_percent_decimals: default_prediction_percent_decimals(),
        }
    }
}

/// `[keybindings]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_search_focus")]
    pub search_focus: String,
    #[serde(default = "default_toggle_card")]
    pub toggle_card: String,
}

fn default_search_focus() -> String { "/".to_string() }
fn default_toggle_card() -> String { " ".to_string() }

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            search_focus: default_search_focus(),
            toggle_card: default_toggle_card(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/armview/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_or_create(&config_path())
    }

    /// Like [`Config::load`], for an explicit config file path.
    pub fn load_or_create(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        Self::from_file(path)
    }

    /// Layer a specific TOML file over the built-in defaults. A missing file
    /// yields the defaults.
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    resolve_config_path(
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn resolve_config_path(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    xdg_config_home
        .unwrap_or_else(|| home.unwrap_or_else(|| PathBuf::from(".")).join(".config"))
        .join("armview")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load() {
        let cfg = Config::defaults();
        assert_eq!(cfg.source.url, "http://127.0.0.1:8000/api/rules");
        assert_eq!(cfg.ui.theme, "default");
        assert_eq!(cfg.ui.card_percent_decimals, 2);
        assert_eq!(cfg.ui.prediction_percent_decimals, 1);
        assert_eq!(cfg.keybindings.search_focus, "/");
        assert_eq!(cfg.keybindings.toggle_card, " ");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Config::from_file(std::path::Path::new("/nonexistent/armview/config.toml")).unwrap();
        assert_eq!(cfg.ui.list_pane_width_pct, 40);
    }

    #[test]
    fn user_file_is_layered_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[ui]\ncard_percent_decimals = 0\n\n[source]\nurl = \"http://x/y\"\n",
        )
        .unwrap();

        let cfg = Config::from_file(&path).unwrap();
        assert_eq!(cfg.ui.card_percent_decimals, 0);
        assert_eq!(cfg.source.url, "http://x/y");

        // Keys the file leaves out keep their defaults
        let defaults = Config::defaults();
        assert_eq!(cfg.ui.theme, defaults.ui.theme);
        assert_eq!(cfg.ui.list_pane_width_pct, defaults.ui.list_pane_width_pct);
        assert_eq!(cfg.ui.prediction_percent_decimals, defaults.ui.prediction_percent_decimals);
        assert_eq!(cfg.keybindings.search_focus, defaults.keybindings.search_focus);
        assert_eq!(cfg.keybindings.toggle_card, defaults.keybindings.toggle_card);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\ncard_percent_decimals = \"many\"\n").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn load_or_create_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("armview").join("config.toml");

        let cfg = Config::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.source.url, Config::defaults().source.url);

        // An existing file is read, not overwritten
        std::fs::write(&path, "[ui]\ntheme = \"gruvbox\"\n").unwrap();
        let cfg = Config::load_or_create(&path).unwrap();
        assert_eq!(cfg.ui.theme, "gruvbox");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[ui]\ntheme = \"gruvbox\"\n");
    }

    #[test]
    fn config_path_prefers_xdg_config_home() {
        assert_eq!(
            resolve_config_path(Some("/xdg".into()), Some("/home/u".into())),
            PathBuf::from("/xdg/armview/config.toml")
        );
        assert_eq!(
            resolve_config_path(None, Some("/home/u".into())),
            PathBuf::from("/home/u/.config/armview/config.toml")
        );
    }
}

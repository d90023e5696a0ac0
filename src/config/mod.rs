//! Configuration management for smth.
//!
//! Configuration is read from `~/.config/smth/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;
pub mod site;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;
pub use site::{HttpConfig, SiteConfig};

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::layout::WidthRule;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub layout: LayoutConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Text layout settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// `ascii` (every non-ASCII character is two cells) or `unicode`.
    pub width_rule: WidthRule,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_config_path()?)
    }

    /// Load configuration from `path`, creating a commented default there
    /// when it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/smth/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("smth").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# smth Configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[site]
base_url = "https://m.newsmth.net/"
login_path = "/user/login"
# Tab / Shift+Tab cycle through these; the first one is the start page
bookmarks = [
    "/",
    "/hot/1",
    "/hot/2",
    "/hot/3",
    "/board/Python",
    "/article/Python/1",
]

[http]
# Request timeout in seconds
timeout_secs = 10
user_agent = "smth/0.1.0"

[layout]
# "ascii": every non-ASCII character takes two cells
# "unicode": use East Asian width tables
width_rule = "ascii"

[colors]
title = "Cyan"
link = "White"
pinned_link = "LightGreen"
meta = "DarkGray"
body = "Reset"
attribution = "Red"
quote_header = "Yellow"
quote = "Magenta"
selection_fg = "Black"
selection_bg = "Cyan"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
link_up = ["Up", "k"]
link_down = ["Down", "j"]
back = ["Left", "h"]
activate = ["Enter", "Right", "l"]
next_bookmark = ["Tab"]
prev_bookmark = ["BackTab", "Shift+Tab"]
next_screen = ["Space"]
prev_screen = ["b"]
next_page = ["PageDown", "n"]
prev_page = ["PageUp", "p"]
reload = ["r"]
open_in_browser = ["o"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

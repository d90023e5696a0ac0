//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Configuration for all keybindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub link_up: Vec<String>,
    pub link_down: Vec<String>,
    pub back: Vec<String>,
    pub activate: Vec<String>,
    pub next_bookmark: Vec<String>,
    pub prev_bookmark: Vec<String>,
    pub next_screen: Vec<String>,
    pub prev_screen: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub reload: Vec<String>,
    pub open_in_browser: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            link_up: keys(&["Up", "k"]),
            link_down: keys(&["Down", "j"]),
            back: keys(&["Left", "h"]),
            activate: keys(&["Enter", "Right", "l"]),
            next_bookmark: keys(&["Tab"]),
            prev_bookmark: keys(&["BackTab", "Shift+Tab"]),
            next_screen: keys(&["Space"]),
            prev_screen: keys(&["b"]),
            next_page: keys(&["PageDown", "n"]),
            prev_page: keys(&["PageUp", "p"]),
            reload: keys(&["r"]),
            open_in_browser: keys(&["o"]),
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 13] = [
            (self.quit.as_slice(), Action::Quit),
            (self.link_up.as_slice(), Action::LinkUp),
            (self.link_down.as_slice(), Action::LinkDown),
            (self.back.as_slice(), Action::Back),
            (self.activate.as_slice(), Action::Activate),
            (self.next_bookmark.as_slice(), Action::NextBookmark),
            (self.prev_bookmark.as_slice(), Action::PrevBookmark),
            (self.next_screen.as_slice(), Action::NextScreen),
            (self.prev_screen.as_slice(), Action::PrevScreen),
            (self.next_page.as_slice(), Action::NextPage),
            (self.prev_page.as_slice(), Action::PrevPage),
            (self.reload.as_slice(), Action::Reload),
            (self.open_in_browser.as_slice(), Action::OpenInBrowser),
        ];

        table
            .iter()
            .find(|(bindings, _)| self.matches_key(key, bindings))
            .map_or(Action::None, |(_, action)| *action)
    }

    fn matches_key(&self, key: &KeyEvent, bindings: &[String]) -> bool {
        bindings.iter().any(|binding| {
            parse_key_string(binding)
                .map(|parsed| parsed.matches(key))
                .unwrap_or(false)
        })
    }
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Check if this binding matches a key event.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string into a KeyBinding.
///
/// Supported formats:
/// - Single characters: "a", "A", "1", "/"
/// - Special keys: "Enter", "Tab", "BackTab", "Backspace", "Delete", "Home", "End",
///   "PageUp", "PageDown", "Up", "Down", "Left", "Right", "Esc", "Space", "F1"-"F12"
/// - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter", "Ctrl+Shift+a"
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let parts: Vec<&str> = s.split('+').collect();

    let mut modifiers = KeyModifiers::NONE;
    let key_part = if parts.len() > 1 {
        for part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" => modifiers |= KeyModifiers::ALT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }
        parts[parts.len() - 1]
    } else {
        s
    };

    let code = parse_key_code(key_part)?;

    Ok(KeyBinding { code, modifiers })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        other => other
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F)
            .ok_or_else(|| format!("Unknown key: {}", s)),
    }
}

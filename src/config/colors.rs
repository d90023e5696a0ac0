//! Color configuration for the TUI.

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};

use crate::layout::LineRole;
use crate::view::RowStyle;

/// Configuration for all TUI colors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub title: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub link: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub pinned_link: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub meta: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub body: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub attribution: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub quote_header: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub quote: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_bg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_fg: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub status_bg: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            title: Color::Cyan,
            link: Color::White,
            pinned_link: Color::LightGreen,
            meta: Color::DarkGray,
            body: Color::Reset,
            attribution: Color::Red,
            quote_header: Color::Yellow,
            quote: Color::Magenta,
            selection_fg: Color::Black,
            selection_bg: Color::Cyan,
            status_fg: Color::White,
            status_bg: Color::DarkGray,
        }
    }
}

impl ColorConfig {
    /// Foreground color for a row segment.
    pub fn for_style(&self, style: RowStyle) -> Color {
        match style {
            RowStyle::Title => self.title,
            RowStyle::Link => self.link,
            RowStyle::PinnedLink => self.pinned_link,
            RowStyle::Meta => self.meta,
            RowStyle::Line(role) => self.for_role(role),
        }
    }

    pub fn for_role(&self, role: LineRole) -> Color {
        match role {
            LineRole::Body | LineRole::BodyContinuation => self.body,
            LineRole::Attribution => self.attribution,
            LineRole::QuoteHeader => self.quote_header,
            LineRole::Quote | LineRole::QuoteContinuation => self.quote,
        }
    }
}

/// Custom deserializer for Color that supports named colors and hex codes.
fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color_string(&s).map_err(de::Error::custom)
}

/// Parse a color string into a ratatui Color.
///
/// Supports:
/// - Named colors: "Black", "Red", "Green", "Yellow", "Blue", "Magenta", "Cyan", "Gray",
///   "DarkGray", "LightRed", "LightGreen", "LightYellow", "LightBlue", "LightMagenta",
///   "LightCyan", "White", "Reset"
/// - Hex colors: "#RRGGBB" or "#RGB"
pub fn parse_color_string(s: &str) -> Result<Color, String> {
    let s = s.trim();

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    match s.to_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err(format!("Unknown color: {}", s)),
    }
}

/// Supports "#RRGGBB" and "#RGB".
fn parse_hex_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or_else(|| format!("Invalid hex color: {}", s))
    };

    match hex.len() {
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        _ => Err(format!("Invalid hex color format: {}", s)),
    }
}

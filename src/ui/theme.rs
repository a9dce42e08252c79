//! Theme management and ANSI escape sequence generation.
//!
//! Themes are small TOML documents mapping UI roles to hex colors. Two are
//! built in and embedded at compile time; any other theme can be loaded from a
//! file.
//!
//! # Built-in Themes
//!
//! - `default`: blue accents on a light selection bar
//! - `catppuccin-mocha`: dark theme with warm tones
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! input_fg = "#007bff"
//! text_normal = "#888888"
//! selection_fg = "#007bff"
//! selection_bg = "#e0f2ff"
//! status_fg = "#007bff"
//! label_fg = "#a0a0a0"
//! match_highlight_fg = "#ff00ff"
//! # match_highlight_bg is optional
//! empty_state_fg = "#888888"
//! error_fg = "#ff0000"
//! success_fg = "#00ff00"
//! ```
//!
//! # Example
//!
//! ```rust
//! use gopkg_search::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! let line = format!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! assert!(line.ends_with("\u{1b}[0m"));
//! assert_eq!(theme.name, "catppuccin-mocha");
//! ```

use crossterm::style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::error::{GopkgError, Result};

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "default";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// Colors are hex strings such as `"#cdd6f4"`. A color that does not parse
/// emits no escape sequence, leaving the terminal's own color in place.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Search prompt cursor color.
    pub input_fg: String,
    /// Unselected row text.
    pub text_normal: String,

    /// Selected row foreground.
    pub selection_fg: String,
    /// Selected row background.
    pub selection_bg: String,

    /// Status line and loading message.
    pub status_fg: String,
    /// Version and age suffix.
    pub label_fg: String,

    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Optional fuzzy match highlight background.
    #[serde(default)]
    pub match_highlight_bg: Option<String>,

    /// Empty result messages.
    pub empty_state_fg: String,

    /// Final message after a failure.
    pub error_fg: String,
    /// Final message after a clean exit.
    pub success_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "default" => include_str!("../../themes/default.toml"),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(theme = name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GopkgError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            GopkgError::Config(format!("failed to read theme file {}: {e}", path.as_ref().display()))
        })?;

        toml::from_str(&contents).map_err(|e| GopkgError::Config(format!("failed to parse theme TOML: {e}")))
    }

    /// A theme that emits no colors at all.
    #[must_use]
    pub fn plain() -> Self {
        let none = String::new;
        Self {
            name: "plain".to_string(),
            colors: ThemeColors {
                input_fg: none(),
                text_normal: none(),
                selection_fg: none(),
                selection_bg: none(),
                status_fg: none(),
                label_fg: none(),
                match_highlight_fg: none(),
                match_highlight_bg: None,
                empty_state_fg: none(),
                error_fg: none(),
                success_fg: none(),
            },
        }
    }

    /// Parses `#rrggbb` (or `rrggbb`) into a truecolor value.
    fn hex_to_rgb(hex: &str) -> Option<Color> {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color::Rgb { r, g, b })
    }

    /// ANSI 24-bit foreground sequence, `\x1b[38;2;r;g;bm`.
    ///
    /// Returns an empty string for an unparsable color.
    ///
    /// ```rust
    /// use gopkg_search::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff0000"), "\u{1b}[38;2;255;0;0m");
    /// assert_eq!(Theme::fg("nope"), "");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::hex_to_rgb(hex).map_or_else(String::new, |color| SetForegroundColor(color).to_string())
    }

    /// ANSI 24-bit background sequence, `\x1b[48;2;r;g;bm`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::hex_to_rgb(hex).map_or_else(String::new, |color| SetBackgroundColor(color).to_string())
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub fn bold() -> String {
        SetAttribute(Attribute::Bold).to_string()
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    #[must_use]
    pub fn reset() -> String {
        SetAttribute(Attribute::Reset).to_string()
    }
}

impl Default for Theme {
    /// The `default` built-in theme, or [`Theme::plain`] if it cannot be loaded.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in ["default", "catppuccin-mocha"] {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} should parse"));
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn default_theme_is_named_default() {
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn optional_highlight_background() {
        assert!(Theme::from_name("default").unwrap().colors.match_highlight_bg.is_none());
        assert_eq!(
            Theme::from_name("catppuccin-mocha").unwrap().colors.match_highlight_bg.as_deref(),
            Some("#45475a")
        );
    }

    #[test]
    fn color_sequences() {
        assert_eq!(Theme::fg("#007bff"), "\u{1b}[38;2;0;123;255m");
        assert_eq!(Theme::bg("e0f2ff"), "\u{1b}[48;2;224;242;255m");
        assert_eq!(Theme::fg("#888"), "");
        assert_eq!(Theme::fg(""), "");
        assert_eq!(Theme::bg("#gggggg"), "");
        assert_eq!(Theme::bold(), "\u{1b}[1m");
        assert_eq!(Theme::reset(), "\u{1b}[0m");
    }

    #[test]
    fn loads_custom_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        theme.colors.error_fg = "#123456".to_string();
        write!(file, "{}", toml::to_string(&theme).unwrap()).unwrap();

        let loaded = Theme::from_file(file.path()).unwrap();
        assert_eq!(loaded, theme);
    }

    #[test]
    fn invalid_theme_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = \"broken\"\n[colors]\ninput_fg = 3\n").unwrap();
        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, GopkgError::Config(_)));

        let missing = Theme::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(missing.to_string().contains("failed to read theme file"));
    }
}

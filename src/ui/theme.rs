//! Color schemes and ANSI escape sequence generation.
//!
//! Two schemes are built in, both Catppuccin flavors:
//!
//! - `catppuccin-mocha`: dark (default)
//! - `catppuccin-latte`: light
//!
//! Custom schemes are TOML files with the same shape:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! card_border = "#585b70"
//! year_fg = "#89b4fa"
//! rating_fg = "#f9e2af"
//! loading_fg = "#94e2d5"
//! error_fg = "#f38ba8"
//! empty_state_fg = "#89b4fa"
//! notice_fg = "#fab387"
//! ```

use crate::domain::{CinefindError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the scheme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Footer hints and secondary card text.
    pub text_dim: String,
    pub border: String,
    pub search_bar_border: String,

    /// Card under the grid cursor.
    pub selection_fg: String,
    pub selection_bg: String,

    /// Title characters matching the query.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub card_border: String,
    pub year_fg: String,
    pub rating_fg: String,

    pub loading_fg: String,
    pub error_fg: String,
    pub empty_state_fg: String,
    pub notice_fg: String,
}

impl Theme {
    /// Loads a built-in scheme by name.
    ///
    /// ```
    /// use cinefind::ui::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a scheme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CinefindError::Theme`] when the file cannot be read or does
    /// not describe a complete scheme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| CinefindError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| CinefindError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Parses `#rrggbb`; malformed colors render as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Mocha palette without going through TOML.
    fn builtin_mocha() -> Self {
        let c = |hex: &str| hex.to_string();
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: c("#cba6f7"),
                header_bg: None,
                text_normal: c("#cdd6f4"),
                text_dim: c("#6c7086"),
                border: c("#45475a"),
                search_bar_border: c("#f5c2e7"),
                selection_fg: c("#1e1e2e"),
                selection_bg: c("#f5c2e7"),
                match_highlight_fg: c("#1e1e2e"),
                match_highlight_bg: c("#f9e2af"),
                card_border: c("#585b70"),
                year_fg: c("#89b4fa"),
                rating_fg: c("#f9e2af"),
                loading_fg: c("#94e2d5"),
                error_fg: c("#f38ba8"),
                empty_state_fg: c("#89b4fa"),
                notice_fg: c("#fab387"),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::builtin_mocha)
    }
}

//! # Theme System
//!
//! Provides the color palette for the gallery TUI.
//!
//! ## Overview
//!
//! The [`Theme`] struct defines the shared chrome colors (panels, text,
//! status pill). Each template additionally carries its own accent color as
//! a hex string in the registry; [`parse_hex_color`] turns that into a
//! ratatui [`Color`]. Themes can be cycled at runtime with `t` and the choice
//! is saved to the config file.
//!
//! ## Built-in Themes
//!
//! - **Catppuccin Mocha** (default)
//! - **Catppuccin Macchiato**
//! - **Dracula**
//! - **Nord**
//! - **Tokyo Night**

use crate::bridge::RuntimeStatus;
use ratatui::style::Color;

/// All chrome colors used by the gallery, grouped by semantic role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name, also the value persisted in the config file.
    pub name: &'static str,

    /// Main background color for panels and modals.
    pub bg: Color,
    /// Background for the selected sidebar row and input boxes.
    pub surface: Color,

    /// Primary text color.
    pub fg: Color,
    /// Muted text: placeholders, hints, footer.
    pub fg_dim: Color,

    /// Branding and focused borders when no template accent applies.
    pub accent: Color,
    /// Loading indicator.
    pub secondary: Color,

    pub success: Color,
    pub error: Color,
}

impl Theme {
    /// Return the list of all built-in themes (order = cycle order).
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (Catppuccin Mocha).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// The theme after this one, wrapping around.
    pub fn next(&self) -> &'static Theme {
        let pos = BUILT_IN_THEMES
            .iter()
            .position(|t| t.name == self.name)
            .unwrap_or(0);
        &BUILT_IN_THEMES[(pos + 1) % BUILT_IN_THEMES.len()]
    }

    /// Color of the runtime status pill.
    pub fn status_color(&self, status: RuntimeStatus) -> Color {
        match status {
            RuntimeStatus::Idle => self.fg_dim,
            RuntimeStatus::Loading => self.secondary,
            RuntimeStatus::Ready => self.success,
            RuntimeStatus::Error => self.error,
        }
    }
}

/// Parse a `#rrggbb` (or `rrggbb`) string into an RGB color.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

// ---------------------------------------------------------------------------
// Built-in theme definitions
// ---------------------------------------------------------------------------

static BUILT_IN_THEMES: [Theme; 5] = [
    // 0 - Catppuccin Mocha (default)
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),           // base
        surface: Color::Rgb(49, 50, 68),      // surface0
        fg: Color::Rgb(205, 214, 244),        // text
        fg_dim: Color::Rgb(108, 112, 134),    // overlay0
        accent: Color::Rgb(137, 180, 250),    // blue
        secondary: Color::Rgb(249, 226, 175), // yellow
        success: Color::Rgb(166, 227, 161),   // green
        error: Color::Rgb(243, 139, 168),     // red
    },
    // 1 - Catppuccin Macchiato
    Theme {
        name: "Catppuccin Macchiato",
        bg: Color::Rgb(36, 39, 58),           // base
        surface: Color::Rgb(54, 58, 79),      // surface0
        fg: Color::Rgb(202, 211, 245),        // text
        fg_dim: Color::Rgb(110, 115, 141),    // overlay0
        accent: Color::Rgb(138, 173, 244),    // blue
        secondary: Color::Rgb(238, 212, 159), // yellow
        success: Color::Rgb(166, 218, 149),   // green
        error: Color::Rgb(237, 135, 150),     // red
    },
    // 2 - Dracula
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        surface: Color::Rgb(68, 71, 90),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(189, 147, 249),    // purple
        secondary: Color::Rgb(241, 250, 140), // yellow
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
    },
    // 3 - Nord
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        surface: Color::Rgb(59, 66, 82),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),    // frost
        secondary: Color::Rgb(235, 203, 139), // yellow
        success: Color::Rgb(163, 190, 140),
        error: Color::Rgb(191, 97, 106),
    },
    // 4 - Tokyo Night
    Theme {
        name: "Tokyo Night",
        bg: Color::Rgb(26, 27, 38),
        surface: Color::Rgb(41, 46, 66),
        fg: Color::Rgb(169, 177, 214),
        fg_dim: Color::Rgb(86, 95, 137),
        accent: Color::Rgb(122, 162, 247),    // blue
        secondary: Color::Rgb(224, 175, 104), // yellow
        success: Color::Rgb(115, 218, 202),
        error: Color::Rgb(247, 118, 142),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    /// Convert a catppuccin color to a ratatui Color via its RGB values.
    fn ctp(color: catppuccin::Color) -> Color {
        Color::Rgb(color.rgb.r, color.rgb.g, color.rgb.b)
    }

    #[test]
    fn test_default_is_mocha() {
        assert_eq!(Theme::default_theme().name, "Catppuccin Mocha");
    }

    #[test]
    fn test_by_name_case_insensitive() {
        assert!(Theme::by_name("catppuccin mocha").is_some());
        assert!(Theme::by_name("DRACULA").is_some());
        assert!(Theme::by_name("nonexistent").is_none());
    }

    #[test]
    fn test_next_cycles_through_all_themes() {
        let mut theme = Theme::default_theme();
        for _ in 0..Theme::all().len() {
            theme = theme.next();
        }
        assert_eq!(theme.name, Theme::default_theme().name);
        assert_eq!(Theme::default_theme().next().name, "Catppuccin Macchiato");
    }

    #[test]
    fn test_catppuccin_mocha_matches_palette() {
        let mocha = catppuccin::PALETTE.mocha.colors;
        let theme = Theme::default_theme();
        assert_eq!(theme.bg, ctp(mocha.base));
        assert_eq!(theme.surface, ctp(mocha.surface0));
        assert_eq!(theme.fg, ctp(mocha.text));
        assert_eq!(theme.success, ctp(mocha.green));
        assert_eq!(theme.error, ctp(mocha.red));
    }

    #[test]
    fn test_catppuccin_macchiato_matches_palette() {
        let macchiato = catppuccin::PALETTE.macchiato.colors;
        let theme = Theme::by_name("Catppuccin Macchiato").expect("theme exists");
        assert_eq!(theme.bg, ctp(macchiato.base));
        assert_eq!(theme.accent, ctp(macchiato.blue));
    }

    #[test]
    fn test_status_colors_are_distinct_for_terminal_states() {
        let theme = Theme::default_theme();
        assert_ne!(
            theme.status_color(RuntimeStatus::Ready),
            theme.status_color(RuntimeStatus::Error)
        );
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#34d399"), Some(Color::Rgb(0x34, 0xd3, 0x99)));
        assert_eq!(parse_hex_color("FBBF24"), Some(Color::Rgb(0xfb, 0xbf, 0x24)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
        assert_eq!(parse_hex_color(""), None);
    }
}

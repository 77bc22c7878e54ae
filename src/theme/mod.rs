//! Color themes for Lectio

mod vellum;
mod vigil;

pub use vellum::VELLUM;
pub use vigil::VIGIL;

use ratatui::style::Color;

const BUILTIN: &[Theme] = &[VELLUM, VIGIL];

/// A color theme for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
}

impl Theme {
    /// Look up a built-in theme by name, case-insensitively
    ///
    /// Unknown names fall back to [`VELLUM`].
    pub fn by_name(name: &str) -> Theme {
        BUILTIN
            .iter()
            .find(|theme| theme.name.eq_ignore_ascii_case(name.trim()))
            .cloned()
            .unwrap_or(VELLUM)
    }

    /// Names of the built-in themes
    pub fn names() -> impl Iterator<Item = &'static str> {
        BUILTIN.iter().map(|theme| theme.name)
    }
}

impl Default for Theme {
    fn default() -> Self {
        VELLUM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_is_vellum() {
        assert_eq!(Theme::default().name, "Vellum");
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Theme::by_name("vigil").name, "Vigil");
        assert_eq!(Theme::by_name(" VELLUM ").name, "Vellum");
    }

    #[test]
    fn unknown_theme_falls_back() {
        assert_eq!(Theme::by_name("Tokyo Night"), VELLUM);
    }

    #[test]
    fn names_lists_builtins() {
        assert_eq!(Theme::names().collect::<Vec<_>>(), vec!["Vellum", "Vigil"]);
    }
}

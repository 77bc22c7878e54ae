//! Vigil: a dark theme for night study

use ratatui::style::Color;

use super::Theme;

pub const VIGIL: Theme = Theme {
    name: "Vigil",

    bg_primary: Color::Rgb(17, 24, 39),   // #111827
    bg_secondary: Color::Rgb(31, 41, 55), // #1f2937

    fg_primary: Color::Rgb(229, 231, 235),   // #e5e7eb
    fg_secondary: Color::Rgb(203, 213, 225), // #cbd5e1
    fg_muted: Color::Rgb(107, 114, 128),     // #6b7280

    accent_primary: Color::Rgb(147, 197, 253),  // #93c5fd
    accent_secondary: Color::Rgb(230, 184, 0),  // #e6b800

    success: Color::Rgb(134, 239, 172), // #86efac
    warning: Color::Rgb(253, 224, 71),  // #fde047
    error: Color::Rgb(252, 165, 165),   // #fca5a5

    border: Color::Rgb(55, 65, 81),           // #374151
    border_focused: Color::Rgb(230, 184, 0),  // #e6b800
    selection: Color::Rgb(30, 58, 95),        // #1e3a5f
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vigil_is_dark() {
        let Color::Rgb(r, g, b) = VIGIL.bg_primary else { panic!("expected rgb") };
        assert!(r < 64 && g < 64 && b < 64);
    }
}

//! Vellum: parchment background, navy ink, gold leaf

use ratatui::style::Color;

use super::Theme;

pub const VELLUM: Theme = Theme {
    name: "Vellum",

    bg_primary: Color::Rgb(253, 252, 247),   // #fdfcf7
    bg_secondary: Color::Rgb(244, 239, 224), // #f4efe0

    fg_primary: Color::Rgb(0, 51, 102),      // #003366
    fg_secondary: Color::Rgb(51, 65, 85),    // #334155
    fg_muted: Color::Rgb(120, 113, 108),     // #78716c

    accent_primary: Color::Rgb(0, 51, 102),    // #003366
    accent_secondary: Color::Rgb(184, 134, 11), // #b8860b

    success: Color::Rgb(21, 128, 61), // #15803d
    warning: Color::Rgb(230, 184, 0), // #e6b800
    error: Color::Rgb(185, 28, 28),   // #b91c1c

    border: Color::Rgb(214, 204, 176),        // #d6ccb0
    border_focused: Color::Rgb(230, 184, 0),  // #e6b800
    selection: Color::Rgb(255, 243, 196),     // #fff3c4
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vellum_is_light() {
        let Color::Rgb(r, g, b) = VELLUM.bg_primary else { panic!("expected rgb") };
        assert!(r > 200 && g > 200 && b > 200);
    }
}

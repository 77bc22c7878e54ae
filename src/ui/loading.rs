//! Loading screen shown while the quiz is generated

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout::centered_rect;
use crate::app::state::LoadingAnimation;
use crate::quiz::Chapter;
use crate::theme::Theme;

/// Draw the spinner and caption
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    animation: &LoadingAnimation,
    chapter: Chapter,
    theme: &Theme,
) {
    let area = centered_rect(80, 50, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            animation.spinner().to_string(),
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "\"Thy Word is Truth\"",
            Style::default()
                .fg(theme.accent_primary)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(caption(chapter, animation), Style::default().fg(theme.fg_muted))),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn caption(chapter: Chapter, animation: &LoadingAnimation) -> String {
    format!("GENERATING NKJV QUIZ FOR CH. {}{}", chapter, animation.dots())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_names_chapter() {
        let mut animation = LoadingAnimation::default();
        animation.current_frame = 15;
        assert_eq!(caption(Chapter::new(8).unwrap(), &animation), "GENERATING NKJV QUIZ FOR CH. 8...");
    }
}

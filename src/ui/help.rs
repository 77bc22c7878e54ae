//! Key help overlay

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::layout::centered_rect;
use crate::theme::Theme;

/// (section, [(keys, description)])
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Setup",
        &[
            ("j / k", "Move between fields"),
            ("h / l", "Change the value"),
            ("1-9", "Pick a value directly"),
            ("Enter", "Begin the quiz"),
        ],
    ),
    (
        "Quiz",
        &[
            ("a-d / 1-4", "Answer"),
            ("j / k, Enter", "Move and choose"),
            ("Enter / n", "Continue"),
            ("b", "Previous question"),
            ("x", "End study early"),
        ],
    ),
    (
        "Results",
        &[
            ("r", "Retake with the same setup"),
            ("n", "Start a new lesson"),
            ("p", "Save the printable summary"),
            ("y", "Copy the summary"),
        ],
    ),
    (
        "Anywhere",
        &[
            (":", "Command line (:chapter 5, :level high, :start, :print)"),
            ("?", "This help"),
            ("q / Ctrl-C", "Quit"),
        ],
    ),
];

/// Draw the help overlay
pub fn draw(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup = centered_rect(70, 80, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    frame.render_widget(Paragraph::new(help_lines(theme)).block(block), popup);
}

fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (section, keys) in SECTIONS {
        lines.push(Line::from(Span::styled(
            *section,
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )));
        for (key, description) in *keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", key), Style::default().fg(theme.accent_secondary)),
                Span::styled(*description, Style::default().fg(theme.fg_secondary)),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled("Press any key to close", Style::default().fg(theme.fg_muted))));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_is_listed() {
        let lines = help_lines(&Theme::default());
        let headings: Vec<String> = lines
            .iter()
            .filter(|l| l.spans.len() == 1)
            .map(|l| l.spans[0].content.to_string())
            .collect();
        for (section, _) in SECTIONS {
            assert!(headings.iter().any(|h| h == section));
        }
    }
}

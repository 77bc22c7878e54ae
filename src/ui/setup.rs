//! Setup form: chapter, grade level, difficulty and feedback style

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout::reading_column;
use crate::app::state::{AppState, SetupField};
use crate::quiz::{Choice, Configuration, Feedback, curriculum};
use crate::theme::Theme;

/// Draw the setup screen
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let area = reading_column(area, 90);
    let config = state.session.config();

    let block = Block::default()
        .title(" Study Setup ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];

    for field in SetupField::ALL {
        let focused = field == state.setup_field;
        lines.push(field_line(field, config, focused, theme));
        if field == SetupField::Chapter {
            lines.push(Line::from(Span::styled(
                format!("    {}", curriculum::summary(config.chapter)),
                Style::default().fg(theme.fg_muted).add_modifier(Modifier::ITALIC),
            )));
        }
        if field == SetupField::Feedback {
            lines.push(Line::from(Span::styled(
                format!("    {}", config.feedback.description()),
                Style::default().fg(theme.fg_muted),
            )));
        }
        lines.push(Line::from(""));
    }

    if let Some(error) = state.session.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        format!("[j/k] Field    [h/l] Change    [Enter] Begin Chapter {} Quiz", config.chapter),
        Style::default().fg(theme.fg_muted),
    )));
    lines.push(Line::from(""));
    lines.push(
        Line::from(Span::styled(
            "\"For with God nothing will be impossible.\" Luke 1:37 NKJV",
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center),
    );

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

/// One form row: label, then the available values with the current one marked
fn field_line(
    field: SetupField,
    config: &Configuration,
    focused: bool,
    theme: &Theme,
) -> Line<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let label_style = if focused {
        Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_secondary)
    };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(theme.accent_secondary)),
        Span::styled(format!("{:<13}", field.label()), label_style),
    ];

    let (values, selected) = field_values(field, config);
    for (i, value) in values.into_iter().enumerate() {
        let style = if i == selected {
            Style::default()
                .fg(theme.bg_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_muted)
        };
        spans.push(Span::styled(format!(" {} ", value), style));
        spans.push(Span::raw(" "));
    }

    Line::from(spans)
}

/// Values shown for a field and the index of the selected one
pub fn field_values(field: SetupField, config: &Configuration) -> (Vec<String>, usize) {
    match field {
        SetupField::Chapter => (vec![format!("‹ Chapter {} ›", config.chapter)], 0),
        SetupField::Level => labels(config.level),
        SetupField::Difficulty => labels(config.difficulty),
        SetupField::Feedback => labels::<Feedback>(config.feedback),
    }
}

fn labels<C: Choice>(current: C) -> (Vec<String>, usize) {
    (C::ALL.iter().map(|c| c.label().to_string()).collect(), current.position())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Chapter, Difficulty, Level};

    #[test]
    fn chapter_field_shows_number() {
        let config = Configuration { chapter: Chapter::new(7).unwrap(), ..Default::default() };
        let (values, selected) = field_values(SetupField::Chapter, &config);
        assert_eq!(values, vec!["‹ Chapter 7 ›".to_string()]);
        assert_eq!(selected, 0);
    }

    #[test]
    fn choice_fields_list_every_value() {
        let config = Configuration {
            level: Level::High,
            difficulty: Difficulty::Intermediate,
            ..Default::default()
        };
        let (levels, selected) = field_values(SetupField::Level, &config);
        assert_eq!(levels, vec!["Upper Elementary", "Middle School", "High School"]);
        assert_eq!(selected, 2);

        let (_, selected) = field_values(SetupField::Difficulty, &config);
        assert_eq!(selected, 1);

        let (feedback, selected) = field_values(SetupField::Feedback, &config);
        assert_eq!(feedback, vec!["Active Learning", "Full Review"]);
        assert_eq!(selected, 0);
    }

    #[test]
    fn focused_row_is_marked() {
        let theme = Theme::default();
        let line = field_line(SetupField::Level, &Configuration::default(), true, &theme);
        assert_eq!(line.spans[0].content, "▸ ");
        let line = field_line(SetupField::Level, &Configuration::default(), false, &theme);
        assert_eq!(line.spans[0].content, "  ");
    }
}

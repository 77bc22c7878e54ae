//! Results screen: score, mastery and the scrollable scripture review

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::reading_column;
use crate::app::state::AppState;
use crate::quiz::{Outcome, Summary, option_letter};
use crate::theme::Theme;

/// Draw the results screen
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let Some(summary) = state.session.summary() else {
        return;
    };

    let area = reading_column(area, 100);
    let [score_area, review_area, hint_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Min(5), Constraint::Length(1)])
            .areas(area);

    frame.render_widget(
        Paragraph::new(score_lines(&summary, theme)).alignment(Alignment::Center),
        score_area,
    );

    let block = Block::default()
        .title(" Scripture Review ")
        .title_alignment(Alignment::Center)
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(review_area);
    frame.render_widget(block, review_area);

    let lines = review_lines(&summary, inner.width.saturating_sub(2) as usize, theme);
    let view = &mut state.results_view;
    view.total_lines = lines.len();
    view.visible_height = inner.height as usize;
    view.clamp_scroll();

    let scroll = u16::try_from(view.scroll_offset).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "[r] Retake Level    [n] Next Lesson    [p] Save Certificate    [y] Copy    [j/k] Scroll",
            Style::default().fg(theme.fg_muted),
        ))
        .alignment(Alignment::Center),
        hint_area,
    );
}

/// Headline block: percentage and raw score
fn score_lines(summary: &Summary<'_>, theme: &Theme) -> Vec<Line<'static>> {
    let big = Style::default().add_modifier(Modifier::BOLD);
    vec![
        Line::from(Span::styled(
            "Lesson Summary",
            big.fg(theme.accent_primary),
        )),
        Line::from(Span::styled(
            format!("GOSPEL CHAPTER {}", summary.config.chapter),
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(summary.title.to_string(), Style::default().fg(theme.fg_secondary))),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{}%", summary.percent()), big.fg(theme.accent_primary)),
            Span::styled("  KNOWLEDGE MASTERY", Style::default().fg(theme.fg_muted)),
            Span::raw("      "),
            Span::styled(
                format!("{}/{}", summary.score, summary.total),
                big.fg(theme.accent_secondary),
            ),
            Span::styled("  VERSES RECALLED", Style::default().fg(theme.fg_muted)),
        ]),
    ]
}

/// Per-question review, pre-wrapped to `width` columns so scrolling is exact
pub fn review_lines(summary: &Summary<'_>, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let width = width.max(20);
    let mut lines = Vec::new();

    for review in &summary.reviews {
        let question = review.question;

        let mut heading = vec![Span::styled(
            format!("GOSPEL LESSON • {}", review.number),
            Style::default().fg(theme.fg_muted).add_modifier(Modifier::BOLD),
        )];
        if let Some(badge) = review.outcome.badge() {
            let color = match review.outcome {
                Outcome::Skipped => theme.fg_muted,
                _ => theme.error,
            };
            heading.push(Span::raw("  "));
            heading.push(Span::styled(
                format!(" {} ", badge.to_uppercase()),
                Style::default().fg(theme.bg_primary).bg(color).add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(heading));

        push_wrapped(
            &mut lines,
            question.prompt(),
            width,
            "",
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        );
        push_wrapped(
            &mut lines,
            &format!(
                "✓ {}. {} (Correct)",
                option_letter(question.correct_index()),
                question.correct_option()
            ),
            width,
            "  ",
            Style::default().fg(theme.success),
        );
        if let Outcome::Incorrect { chosen } = review.outcome {
            push_wrapped(
                &mut lines,
                &format!(
                    "✗ {}. {} (Your Answer)",
                    option_letter(chosen),
                    review.chosen_option().unwrap_or_default()
                ),
                width,
                "  ",
                Style::default().fg(theme.error),
            );
        }
        push_wrapped(
            &mut lines,
            &format!("\"{}\"", question.explanation()),
            width,
            "  ",
            Style::default().fg(theme.fg_secondary).add_modifier(Modifier::ITALIC),
        );
        lines.push(Line::from(""));
    }

    lines
}

fn push_wrapped(lines: &mut Vec<Line<'static>>, text: &str, width: usize, indent: &str, style: Style) {
    let options = textwrap::Options::new(width).subsequent_indent(indent);
    for piece in textwrap::wrap(text, options) {
        lines.push(Line::from(Span::styled(piece.into_owned(), style)));
    }
}

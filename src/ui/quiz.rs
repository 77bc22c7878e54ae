//! Question screen

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::layout::{centered_rect, reading_column};
use crate::app::state::AppState;
use crate::quiz::{Feedback, Question, option_letter};
use crate::theme::Theme;

/// How one option is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    /// Not answered yet, not under the cursor
    Open,
    /// Not answered yet, under the cursor
    Highlighted,
    /// Revealed as the right answer
    Correct,
    /// The student's wrong pick, revealed
    Wrong,
    /// The student's pick when correctness is withheld
    Chosen,
    /// Any other option once the question is answered
    Dimmed,
}

impl OptionState {
    pub fn of(
        index: usize,
        question: &Question,
        answer: Option<usize>,
        feedback: Feedback,
        highlighted: usize,
    ) -> Self {
        match (answer, feedback) {
            (None, _) if index == highlighted => Self::Highlighted,
            (None, _) => Self::Open,
            (Some(_), Feedback::Immediate) if question.is_correct(index) => Self::Correct,
            (Some(chosen), Feedback::Immediate) if chosen == index => Self::Wrong,
            (Some(chosen), Feedback::End) if chosen == index => Self::Chosen,
            (Some(_), _) => Self::Dimmed,
        }
    }

    fn marker(self) -> &'static str {
        match self {
            Self::Open | Self::Dimmed => "○",
            Self::Highlighted | Self::Chosen => "●",
            Self::Correct => "✓",
            Self::Wrong => "✗",
        }
    }

    fn style(self, theme: &Theme) -> Style {
        match self {
            Self::Open => Style::default().fg(theme.fg_secondary),
            Self::Highlighted => Style::default()
                .fg(theme.accent_primary)
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
            Self::Correct => Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            Self::Wrong => Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            Self::Chosen => Style::default()
                .fg(theme.bg_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD),
            Self::Dimmed => Style::default().fg(theme.fg_muted),
        }
    }
}

/// Draw the current question
pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let session = &state.session;
    let Some(question) = session.current_question() else {
        return;
    };
    let config = session.config();
    let answer = session.current_answer();
    let reveal = answer.is_some() && config.feedback == Feedback::Immediate;

    let area = reading_column(area, 100);
    let insight_height = if reveal { 7 } else { 0 };
    let [question_area, insight_area, hint_area] = Layout::vertical([
        Constraint::Min(10),
        Constraint::Length(insight_height),
        Constraint::Length(2),
    ])
    .areas(area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "SAINT LUKE CH. {} • LESSON {}",
                config.chapter,
                session.current_index() + 1
            ),
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            question.prompt().to_string(),
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, option) in question.options().iter().enumerate() {
        let option_state =
            OptionState::of(i, question, answer, config.feedback, state.quiz_view.highlighted);
        lines.push(Line::from(Span::styled(
            format!("  {} {}) {}", option_state.marker(), option_letter(i), option),
            option_state.style(theme),
        )));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), question_area);

    if reveal {
        draw_insight(frame, insight_area, question, answer, theme);
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hint_text(answer.is_some(), session.current_index() == 0, session.is_last_question()),
            Style::default().fg(theme.fg_muted),
        ))),
        hint_area,
    );

    if state.quiz_view.confirm_end {
        draw_confirm_end(frame, area, session.answers(), theme);
    }
}

/// Verdict and explanation, shown right after answering in immediate mode
fn draw_insight(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    answer: Option<usize>,
    theme: &Theme,
) {
    let correct = answer.is_some_and(|a| question.is_correct(a));
    let (verdict, verdict_style) = if correct {
        ("Correct!", Style::default().fg(theme.success).add_modifier(Modifier::BOLD))
    } else {
        ("Not quite.", Style::default().fg(theme.error).add_modifier(Modifier::BOLD))
    };

    let block = Block::default()
        .title(Span::styled(
            " TEACHER'S INSIGHT (NKJV) ",
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::LEFT | Borders::TOP)
        .border_style(Style::default().fg(theme.accent_secondary));

    let lines = vec![
        Line::from(Span::styled(verdict, verdict_style)),
        Line::from(Span::styled(
            format!("\"{}\"", question.explanation()),
            Style::default().fg(theme.fg_secondary).add_modifier(Modifier::ITALIC),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

/// "End study early?" dialog
fn draw_confirm_end(frame: &mut Frame, area: Rect, answers: &[Option<usize>], theme: &Theme) {
    let popup = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup);

    let answered = answers.iter().filter(|a| a.is_some()).count();
    let block = Block::default()
        .title(" End Study Early ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error))
        .style(Style::default().bg(theme.bg_secondary));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to end the quiz?",
            Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} of {} answered. Your progress will be graded now.",
                answered,
                answers.len()
            ),
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
        Line::from(Span::styled("[y] End and grade    [n] Keep going", Style::default().fg(theme.fg_muted))),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        popup,
    );
}

/// Key hints for the footer
fn hint_text(answered: bool, first: bool, last: bool) -> String {
    let mut hints = Vec::new();
    if answered {
        hints.push(if last { "[Enter] Show Results" } else { "[Enter] Continue Lesson" });
    } else {
        hints.push("[a-d] Answer");
        hints.push("[j/k] Move");
        hints.push("[Enter] Choose");
    }
    if !first {
        hints.push("[b] Previous");
    }
    hints.push("[x] End Study Early");
    hints.join("    ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::fixtures;

    #[test]
    fn unanswered_options_follow_highlight() {
        let quiz = fixtures::quiz();
        let q = quiz.question(0).unwrap();
        assert_eq!(OptionState::of(2, q, None, Feedback::Immediate, 2), OptionState::Highlighted);
        assert_eq!(OptionState::of(1, q, None, Feedback::End, 2), OptionState::Open);
    }

    #[test]
    fn immediate_feedback_reveals() {
        let quiz = fixtures::quiz();
        let q = quiz.question(0).unwrap(); // correct option is 0
        let state = |i| OptionState::of(i, q, Some(3), Feedback::Immediate, 3);
        assert_eq!(state(0), OptionState::Correct);
        assert_eq!(state(3), OptionState::Wrong);
        assert_eq!(state(1), OptionState::Dimmed);
    }

    #[test]
    fn end_feedback_only_marks_choice() {
        let quiz = fixtures::quiz();
        let q = quiz.question(0).unwrap();
        let state = |i| OptionState::of(i, q, Some(3), Feedback::End, 3);
        assert_eq!(state(3), OptionState::Chosen);
        assert_eq!(state(0), OptionState::Dimmed);
    }

    #[test]
    fn hints_change_with_position() {
        assert_eq!(
            hint_text(false, true, false),
            "[a-d] Answer    [j/k] Move    [Enter] Choose    [x] End Study Early"
        );
        assert!(hint_text(true, false, true).starts_with("[Enter] Show Results"));
        assert!(hint_text(true, false, false).contains("[b] Previous"));
    }
}

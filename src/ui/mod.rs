//! UI rendering components

pub mod command_line;
pub mod help;
pub mod layout;
pub mod loading;
pub mod quiz;
pub mod results;
pub mod setup;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    widgets::Block,
};

use crate::app::state::AppState;
use crate::quiz::Step;
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let [header_area, body_area, command_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(5), Constraint::Length(1)])
            .areas(area);

    layout::draw_header(frame, header_area, &state.session, theme);

    let body_area = body_area.inner(ratatui::layout::Margin { horizontal: 2, vertical: 1 });
    match state.session.step() {
        Step::Setup => setup::draw(frame, body_area, state, theme),
        Step::Loading => {
            let chapter = state.session.config().chapter;
            loading::draw(frame, body_area, &state.loading, chapter, theme);
        }
        Step::Quiz => quiz::draw(frame, body_area, state, theme),
        Step::Results => results::draw(frame, body_area, state, theme),
    }

    command_line::draw(frame, command_area, &state.command_line, theme);

    if state.show_help {
        help::draw(frame, area, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::fixtures;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 40)).unwrap();
        terminal.draw(|frame| draw(frame, state, &Theme::default())).unwrap();
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn setup_screen_renders_form() {
        let screen = render(&mut AppState::default());
        assert!(screen.contains("Study Setup"));
        assert!(screen.contains("Chapter 1"));
        assert!(screen.contains("Middle School"));
    }

    #[test]
    fn quiz_screen_shows_progress_and_options() {
        let mut state = AppState::default();
        let config = *state.session.config();
        let pending = state.session.start(config).unwrap();
        state.session.complete(pending.ticket, Ok(fixtures::quiz())).unwrap();

        let screen = render(&mut state);
        assert!(screen.contains("Question 1 of 10"));
        assert!(screen.contains("Q1 option 3"));
    }

    #[test]
    fn results_screen_records_review_height() {
        let mut state = AppState::default();
        let config = *state.session.config();
        let pending = state.session.start(config).unwrap();
        state.session.complete(pending.ticket, Ok(fixtures::quiz())).unwrap();
        state.session.end_early().unwrap();

        let screen = render(&mut state);
        assert!(screen.contains("0%"));
        assert!(state.results_view.total_lines > 0);
        assert!(state.results_view.visible_height > 0);
    }
}

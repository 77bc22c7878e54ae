//! Applying actions and commands to the application state
//!
//! Everything here is synchronous and terminal-free. Work that leaves the
//! process (provider calls, files, the clipboard) is returned as an
//! [`Effect`] for the event loop to carry out.

use std::path::PathBuf;

use crossterm::event::KeyCode;

use super::command::{Command, ParseResult, parse_command};
use super::input::Action;
use super::state::{AppState, SetupField};
use crate::quiz::{Chapter, Choice, Difficulty, Feedback, Level, PendingGeneration, Rejection, Step};

/// Side effect requested by an action
#[derive(Debug)]
pub enum Effect {
    None,
    Quit,
    /// Run this request against the provider
    Generate(PendingGeneration),
    /// Write the printable summary, into this directory if given
    Print(Option<PathBuf>),
    /// Copy the printable summary to the clipboard
    Copy,
}

/// Log a rejected transition and drop it
fn accepted<T>(result: Result<T, Rejection>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(rejection) => {
            tracing::debug!(%rejection, "ignored");
            None
        }
    }
}

impl AppState {
    /// Apply a mapped key action
    pub fn handle_action(&mut self, action: Action) -> Effect {
        if self.show_help {
            self.show_help = false;
            if action != Action::Quit {
                return Effect::None;
            }
        }

        match action {
            Action::Quit => return Effect::Quit,
            Action::OpenCommand => self.command_line.enter_command_mode(),
            Action::Help => self.show_help = true,
            Action::Back => self.command_line.clear_message(),

            Action::FieldUp => self.setup_field = self.setup_field.prev(),
            Action::FieldDown => self.setup_field = self.setup_field.next(),
            Action::ValuePrev => self.step_value(false),
            Action::ValueNext => self.step_value(true),
            Action::Pick(n) => self.pick_value(n),
            Action::Start => return accepted(self.start()).unwrap_or(Effect::None),

            Action::HighlightUp => self.quiz_view.highlight_prev(),
            Action::HighlightDown => self.quiz_view.highlight_next(),
            Action::Answer(option) => {
                self.quiz_view.highlighted = option;
                self.answer(option);
            }
            Action::Submit => {
                if self.session.current_answer().is_some() {
                    self.advance();
                } else {
                    self.answer(self.quiz_view.highlighted);
                }
            }
            Action::Continue => self.advance(),
            Action::Previous => {
                if accepted(self.session.go_back()).is_some() {
                    self.sync_quiz_view();
                }
            }
            Action::EndEarly => {
                if self.session.step() == Step::Quiz {
                    self.quiz_view.confirm_end = true;
                }
            }
            Action::ConfirmYes => {
                self.quiz_view.confirm_end = false;
                if accepted(self.session.end_early()).is_some() {
                    self.enter_results();
                }
            }
            Action::ConfirmNo => self.quiz_view.confirm_end = false,

            Action::Retake => return accepted(self.retake()).unwrap_or(Effect::None),
            Action::NewSession => {
                accepted(self.new_session());
            }
            Action::Print => return self.on_results(Effect::Print(None)),
            Action::Copy => return self.on_results(Effect::Copy),
            Action::ScrollUp => self.results_view.scroll_up(1),
            Action::ScrollDown => self.results_view.scroll_down(1),
        }
        Effect::None
    }

    /// Handle a key while the command line is open
    pub fn handle_command_key(&mut self, key: KeyCode) -> Effect {
        match key {
            KeyCode::Esc => self.command_line.exit_input_mode(),
            KeyCode::Enter => {
                let input = self.command_line.input.clone();
                self.command_line.add_to_history(input.clone());
                self.command_line.exit_input_mode();
                return self.run_command_line(&input);
            }
            KeyCode::Backspace => {
                if self.command_line.input.is_empty() {
                    self.command_line.exit_input_mode();
                } else {
                    self.command_line.delete_char();
                }
            }
            KeyCode::Left => self.command_line.move_left(),
            KeyCode::Right => self.command_line.move_right(),
            KeyCode::Up => self.command_line.history_up(),
            KeyCode::Down => self.command_line.history_down(),
            KeyCode::Char(c) => self.command_line.insert_char(c),
            _ => {}
        }
        Effect::None
    }

    /// Parse and run a command line entry
    pub fn run_command_line(&mut self, input: &str) -> Effect {
        match parse_command(input) {
            ParseResult::Ok(command) => self.run_command(command),
            ParseResult::UnknownCommand(cmd) => {
                self.command_line.set_error(format!("Unknown command: {}", cmd));
                Effect::None
            }
            ParseResult::MissingArgument(cmd) => {
                self.command_line.set_error(format!(":{} needs an argument", cmd));
                Effect::None
            }
            ParseResult::InvalidArgument(message) => {
                self.command_line.set_error(message);
                Effect::None
            }
        }
    }

    /// Run a parsed command
    pub fn run_command(&mut self, command: Command) -> Effect {
        let step = self.session.step();
        let result = match command {
            Command::Chapter(chapter) => self.session.set_chapter(chapter).map(|()| Effect::None),
            Command::Level(level) => self.session.set_level(level).map(|()| Effect::None),
            Command::Difficulty(difficulty) => {
                self.session.set_difficulty(difficulty).map(|()| Effect::None)
            }
            Command::Feedback(feedback) => {
                self.session.set_feedback(feedback).map(|()| Effect::None)
            }
            Command::Start => self.start(),
            Command::Retake => self.retake(),
            Command::New => self.new_session().map(|()| Effect::None),
            Command::Print(dir) => return self.on_results(Effect::Print(dir)),
            Command::Copy => return self.on_results(Effect::Copy),
            Command::Quit => return Effect::Quit,
            Command::Help => {
                self.show_help = true;
                Ok(Effect::None)
            }
            Command::Nop => {
                self.command_line.clear_message();
                Ok(Effect::None)
            }
        };

        match result {
            Ok(effect) => effect,
            Err(rejection) => {
                tracing::debug!(%rejection, "command ignored");
                self.command_line.set_error(format!("Not available during {}", step));
                Effect::None
            }
        }
    }

    fn start(&mut self) -> Result<Effect, Rejection> {
        let config = *self.session.config();
        let pending = self.session.start(config)?;
        self.loading.restart();
        Ok(Effect::Generate(pending))
    }

    fn retake(&mut self) -> Result<Effect, Rejection> {
        let pending = self.session.retake()?;
        self.loading.restart();
        Ok(Effect::Generate(pending))
    }

    fn answer(&mut self, option: usize) {
        accepted(self.session.select_answer(option));
    }

    fn advance(&mut self) {
        if accepted(self.session.advance()).is_none() {
            return;
        }
        match self.session.step() {
            Step::Results => self.enter_results(),
            _ => self.sync_quiz_view(),
        }
    }

    fn enter_results(&mut self) {
        self.quiz_view = Default::default();
        self.results_view.scroll_offset = 0;
    }

    /// Back to a fresh setup form; a request in flight runs to completion first
    fn new_session(&mut self) -> Result<(), Rejection> {
        if self.session.is_loading() {
            return Err(Rejection::RequestInFlight);
        }
        self.session.reset();
        self.setup_field = SetupField::default();
        self.quiz_view = Default::default();
        self.results_view = Default::default();
        Ok(())
    }

    fn on_results(&mut self, effect: Effect) -> Effect {
        if self.session.step() == Step::Results {
            effect
        } else {
            self.command_line.set_error("Finish a quiz first");
            Effect::None
        }
    }

    /// Move the focused setup field to its next or previous value
    fn step_value(&mut self, forward: bool) {
        let config = *self.session.config();
        let result = match self.setup_field {
            SetupField::Chapter => {
                let c = config.chapter;
                self.session.set_chapter(if forward { c.next() } else { c.prev() })
            }
            SetupField::Level => {
                let l = config.level;
                self.session.set_level(if forward { l.next() } else { l.prev() })
            }
            SetupField::Difficulty => {
                let d = config.difficulty;
                self.session.set_difficulty(if forward { d.next() } else { d.prev() })
            }
            SetupField::Feedback => {
                let f = config.feedback;
                self.session.set_feedback(if forward { f.next() } else { f.prev() })
            }
        };
        accepted(result);
    }

    /// Pick the n-th (1-based) value of the focused setup field
    fn pick_value(&mut self, n: usize) {
        let Some(index) = n.checked_sub(1) else { return };
        let result = match self.setup_field {
            SetupField::Chapter => match u8::try_from(n).ok().and_then(Chapter::new) {
                Some(chapter) => self.session.set_chapter(chapter),
                None => return,
            },
            SetupField::Level => match Level::ALL.get(index) {
                Some(level) => self.session.set_level(*level),
                None => return,
            },
            SetupField::Difficulty => match Difficulty::ALL.get(index) {
                Some(difficulty) => self.session.set_difficulty(*difficulty),
                None => return,
            },
            SetupField::Feedback => match Feedback::ALL.get(index) {
                Some(feedback) => self.session.set_feedback(*feedback),
                None => return,
            },
        };
        accepted(result);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::app::input::key_to_action;
    use crate::quiz::{Configuration, fixtures};

    /// State sitting on question one of the fixture quiz
    fn in_quiz() -> AppState {
        let mut state = AppState::default();
        let Effect::Generate(pending) = state.handle_action(Action::Start) else {
            panic!("expected a generation request");
        };
        state.session.complete(pending.ticket, Ok(fixtures::quiz())).unwrap();
        state
    }

    #[test]
    fn setup_keys_edit_configuration() {
        let mut state = AppState::default();
        state.handle_action(Action::ValuePrev);
        assert_eq!(state.session.config().chapter, Chapter::LAST);

        state.handle_action(Action::FieldDown);
        state.handle_action(Action::Pick(3));
        assert_eq!(state.session.config().level, Level::High);

        state.handle_action(Action::FieldDown);
        state.handle_action(Action::FieldDown);
        state.handle_action(Action::ValueNext);
        assert_eq!(state.session.config().feedback, Feedback::End);
    }

    #[test]
    fn out_of_range_pick_is_ignored() {
        let mut state = AppState::default();
        state.setup_field = SetupField::Level;
        state.handle_action(Action::Pick(7));
        assert_eq!(state.session.config().level, Level::default());
    }

    #[test]
    fn start_requests_generation() {
        let mut state = AppState::new(Configuration {
            chapter: Chapter::new(4).unwrap(),
            ..Configuration::default()
        });
        let Effect::Generate(pending) = state.handle_action(Action::Start) else {
            panic!("expected a generation request");
        };
        assert_eq!(pending.request.chapter.number(), 4);
        assert_eq!(state.session.step(), Step::Loading);

        assert!(matches!(state.handle_action(Action::Start), Effect::None));
    }

    #[test]
    fn submit_answers_then_continues() {
        let mut state = in_quiz();
        state.handle_action(Action::HighlightDown);
        state.handle_action(Action::Submit);
        assert_eq!(state.session.current_answer(), Some(1));
        assert_eq!(state.session.score(), 0);

        state.handle_action(Action::Submit);
        assert_eq!(state.session.current_index(), 1);
        assert_eq!(state.quiz_view.highlighted, 0);
    }

    #[test]
    fn going_back_highlights_stored_answer() {
        let mut state = in_quiz();
        state.handle_action(Action::Answer(2));
        state.handle_action(Action::Continue);
        state.handle_action(Action::Previous);
        assert_eq!(state.session.current_index(), 0);
        assert_eq!(state.quiz_view.highlighted, 2);
    }

    #[test]
    fn end_early_needs_confirmation() {
        let mut state = in_quiz();
        state.handle_action(Action::EndEarly);
        assert!(state.quiz_view.confirm_end);
        state.handle_action(Action::ConfirmNo);
        assert_eq!(state.session.step(), Step::Quiz);

        state.handle_action(Action::EndEarly);
        state.handle_action(Action::ConfirmYes);
        assert_eq!(state.session.step(), Step::Results);
        assert!(!state.quiz_view.confirm_end);
    }

    #[test]
    fn finishing_all_questions_shows_results() {
        let mut state = in_quiz();
        for i in 0..10 {
            state.handle_action(Action::Answer(i % 4));
            state.handle_action(Action::Continue);
        }
        assert_eq!(state.session.step(), Step::Results);
        assert_eq!(state.session.score(), 10);
        assert!(matches!(state.handle_action(Action::Print), Effect::Print(None)));
        assert!(matches!(state.handle_action(Action::Copy), Effect::Copy));
        assert!(matches!(state.handle_action(Action::Retake), Effect::Generate(_)));
    }

    #[test]
    fn print_outside_results_is_an_error_message() {
        let mut state = in_quiz();
        assert!(matches!(state.run_command_line("print"), Effect::None));
        assert!(state.command_line.is_error);
    }

    #[test]
    fn new_session_resets() {
        let mut state = in_quiz();
        state.handle_action(Action::EndEarly);
        state.handle_action(Action::ConfirmYes);
        state.handle_action(Action::NewSession);
        assert_eq!(state.session.step(), Step::Setup);
        assert!(state.session.quiz().is_none());
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let mut state = in_quiz();
        state.handle_action(Action::Help);
        assert!(state.show_help);
        state.handle_action(Action::Answer(0));
        assert!(!state.show_help);
        assert_eq!(state.session.current_answer(), None);
    }

    #[test]
    fn commands_edit_setup() {
        let mut state = AppState::default();
        state.run_command_line("chapter 9");
        state.run_command_line("difficulty intermediate");
        assert_eq!(state.session.config().chapter.number(), 9);
        assert_eq!(state.session.config().difficulty, Difficulty::Intermediate);

        state.run_command_line("bogus");
        assert_eq!(state.command_line.message.as_deref(), Some("Unknown command: bogus"));
    }

    #[test]
    fn setup_commands_rejected_mid_quiz() {
        let mut state = in_quiz();
        state.run_command_line("chapter 2");
        assert_eq!(state.session.config().chapter, Chapter::FIRST);
        assert_eq!(state.command_line.message.as_deref(), Some("Not available during quiz"));
    }

    #[test]
    fn back_key_returns_to_previous_question() {
        let mut state = in_quiz();
        state.handle_action(Action::Answer(0));
        state.handle_action(Action::Continue);

        let action = key_to_action(Step::Quiz, false, KeyCode::Char('b'), KeyModifiers::NONE);
        assert_eq!(action, Some(Action::Previous));
        state.handle_action(Action::Previous);

        assert_eq!(state.session.current_index(), 0);
        assert_eq!(state.session.answers()[1], None);
        assert_eq!(state.session.score(), 1);
    }

    #[test]
    fn start_and_retake_commands_report_wrong_step() {
        let mut state = in_quiz();
        assert!(matches!(state.run_command_line("start"), Effect::None));
        assert_eq!(state.command_line.message.as_deref(), Some("Not available during quiz"));
        assert!(state.command_line.is_error);

        state.command_line.clear_message();
        assert!(matches!(state.run_command_line("retake"), Effect::None));
        assert_eq!(state.command_line.message.as_deref(), Some("Not available during quiz"));
        assert_eq!(state.session.step(), Step::Quiz);
    }

    #[test]
    fn start_command_in_setup_requests_generation() {
        let mut state = AppState::default();
        assert!(matches!(state.run_command_line("start"), Effect::Generate(_)));
        assert!(state.command_line.message.is_none());
    }

    #[test]
    fn new_command_waits_for_request_in_flight() {
        let mut state = AppState::default();
        let Effect::Generate(pending) = state.handle_action(Action::Start) else {
            panic!("expected a generation request");
        };

        state.run_command_line("new");
        assert_eq!(state.session.step(), Step::Loading);
        assert_eq!(state.command_line.message.as_deref(), Some("Not available during loading"));

        state.session.complete(pending.ticket, Ok(fixtures::quiz())).unwrap();
        assert_eq!(state.session.step(), Step::Quiz);
    }

    #[test]
    fn typing_a_command() {
        let mut state = AppState::default();
        state.handle_action(Action::OpenCommand);
        for c in "ch 6".chars() {
            state.handle_command_key(KeyCode::Char(c));
        }
        state.handle_command_key(KeyCode::Enter);
        assert!(!state.command_line.is_input_mode());
        assert_eq!(state.session.config().chapter.number(), 6);
        assert_eq!(state.command_line.history, vec!["ch 6".to_string()]);
    }
}

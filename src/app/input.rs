//! Key mapping: a pure function from the current screen and a key to an action

use crossterm::event::{KeyCode, KeyModifiers};

use crate::quiz::Step;

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Global
    Quit,
    OpenCommand,
    Help,
    Back,

    // Setup form
    FieldUp,
    FieldDown,
    ValuePrev,
    ValueNext,
    /// Pick the n-th (1-based) value of the focused field
    Pick(usize),
    Start,

    // Quiz
    HighlightUp,
    HighlightDown,
    /// Answer with the given option (0-based)
    Answer(usize),
    /// Answer with the highlighted option, or continue if already answered
    Submit,
    Continue,
    Previous,
    EndEarly,

    // End-early dialog
    ConfirmYes,
    ConfirmNo,

    // Results
    Retake,
    NewSession,
    Print,
    Copy,
    ScrollUp,
    ScrollDown,
}

/// Map a key press to an action
///
/// `confirming` is true while the end-early dialog is open; it swallows
/// every key except its own answers and Ctrl-C.
pub fn key_to_action(
    step: Step,
    confirming: bool,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    if confirming {
        return confirm_key_to_action(key);
    }

    let screen = match step {
        Step::Setup => setup_key_to_action(key),
        Step::Loading => None,
        Step::Quiz => quiz_key_to_action(key),
        Step::Results => results_key_to_action(key),
    };

    screen.or(match key {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char(':') => Some(Action::OpenCommand),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Esc => Some(Action::Back),
        _ => None,
    })
}

fn confirm_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmYes),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::ConfirmNo),
        _ => None,
    }
}

fn setup_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Some(Action::FieldDown),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Some(Action::FieldUp),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::ValuePrev),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::ValueNext),
        KeyCode::Char(c @ '1'..='9') => Some(Action::Pick(digit(c))),
        KeyCode::Enter | KeyCode::Char('s') => Some(Action::Start),
        _ => None,
    }
}

fn quiz_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::HighlightDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::HighlightUp),
        // `b` is back, not option B; it must match before the letter range
        KeyCode::Char('h') | KeyCode::Char('b') | KeyCode::Left => Some(Action::Previous),
        KeyCode::Char(c @ 'a'..='d') => Some(Action::Answer((c as u8 - b'a') as usize)),
        KeyCode::Char(c @ '1'..='4') => Some(Action::Answer(digit(c) - 1)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Submit),
        KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => Some(Action::Continue),
        KeyCode::Char('x') => Some(Action::EndEarly),
        _ => None,
    }
}

fn results_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('r') => Some(Action::Retake),
        KeyCode::Char('n') => Some(Action::NewSession),
        KeyCode::Char('p') => Some(Action::Print),
        KeyCode::Char('y') => Some(Action::Copy),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
        _ => None,
    }
}

fn digit(c: char) -> usize {
    c.to_digit(10).map_or(0, |d| d as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(step: Step, code: KeyCode) -> Option<Action> {
        key_to_action(step, false, code, KeyModifiers::NONE)
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        for step in [Step::Setup, Step::Loading, Step::Quiz, Step::Results] {
            for confirming in [false, true] {
                assert_eq!(
                    key_to_action(step, confirming, KeyCode::Char('c'), KeyModifiers::CONTROL),
                    Some(Action::Quit)
                );
            }
        }
    }

    #[test]
    fn setup_keys() {
        assert_eq!(key(Step::Setup, KeyCode::Char('j')), Some(Action::FieldDown));
        assert_eq!(key(Step::Setup, KeyCode::Char('l')), Some(Action::ValueNext));
        assert_eq!(key(Step::Setup, KeyCode::Char('3')), Some(Action::Pick(3)));
        assert_eq!(key(Step::Setup, KeyCode::Enter), Some(Action::Start));
    }

    #[test]
    fn quiz_letters_and_digits_answer() {
        assert_eq!(key(Step::Quiz, KeyCode::Char('a')), Some(Action::Answer(0)));
        assert_eq!(key(Step::Quiz, KeyCode::Char('c')), Some(Action::Answer(2)));
        assert_eq!(key(Step::Quiz, KeyCode::Char('d')), Some(Action::Answer(3)));
        assert_eq!(key(Step::Quiz, KeyCode::Char('2')), Some(Action::Answer(1)));
        assert_eq!(key(Step::Quiz, KeyCode::Char('1')), Some(Action::Answer(0)));
        assert_eq!(key(Step::Quiz, KeyCode::Char('4')), Some(Action::Answer(3)));
        assert_eq!(key(Step::Quiz, KeyCode::Char('5')), None);
    }

    #[test]
    fn quiz_navigation() {
        assert_eq!(key(Step::Quiz, KeyCode::Char('n')), Some(Action::Continue));
        assert_eq!(key(Step::Quiz, KeyCode::Char('b')), Some(Action::Previous));
        assert_eq!(key(Step::Quiz, KeyCode::Char('x')), Some(Action::EndEarly));
        assert_eq!(key(Step::Quiz, KeyCode::Enter), Some(Action::Submit));
    }

    #[test]
    fn confirm_dialog_swallows_other_keys() {
        let confirm = |code| key_to_action(Step::Quiz, true, code, KeyModifiers::NONE);
        assert_eq!(confirm(KeyCode::Char('y')), Some(Action::ConfirmYes));
        assert_eq!(confirm(KeyCode::Esc), Some(Action::ConfirmNo));
        assert_eq!(confirm(KeyCode::Char('a')), None);
        assert_eq!(confirm(KeyCode::Char('q')), None);
    }

    #[test]
    fn results_keys() {
        assert_eq!(key(Step::Results, KeyCode::Char('r')), Some(Action::Retake));
        assert_eq!(key(Step::Results, KeyCode::Char('n')), Some(Action::NewSession));
        assert_eq!(key(Step::Results, KeyCode::Char('p')), Some(Action::Print));
        assert_eq!(key(Step::Results, KeyCode::Char('y')), Some(Action::Copy));
    }

    #[test]
    fn loading_only_has_global_keys() {
        assert_eq!(key(Step::Loading, KeyCode::Enter), None);
        assert_eq!(key(Step::Loading, KeyCode::Char(':')), Some(Action::OpenCommand));
        assert_eq!(key(Step::Loading, KeyCode::Char('q')), Some(Action::Quit));
    }
}

//! Application state definitions

use std::time::Instant;

use crate::quiz::{Configuration, OPTION_COUNT, Session};

/// Which field of the setup form has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetupField {
    #[default]
    Chapter,
    Level,
    Difficulty,
    Feedback,
}

impl SetupField {
    pub const ALL: [SetupField; 4] =
        [SetupField::Chapter, SetupField::Level, SetupField::Difficulty, SetupField::Feedback];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Chapter => "Chapter",
            Self::Level => "Grade Level",
            Self::Difficulty => "Difficulty",
            Self::Feedback => "Feedback",
        }
    }

    /// Next field down, stopping at the last
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1).min(Self::ALL.len() - 1)]
    }

    /// Previous field up, stopping at the first
    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[i.saturating_sub(1)]
    }
}

/// View state for the question screen
#[derive(Debug, Clone, Default)]
pub struct QuizView {
    /// Option under the cursor
    pub highlighted: usize,
    /// Whether the "end early?" dialog is open
    pub confirm_end: bool,
}

impl QuizView {
    pub fn highlight_next(&mut self) {
        self.highlighted = (self.highlighted + 1) % OPTION_COUNT;
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = (self.highlighted + OPTION_COUNT - 1) % OPTION_COUNT;
    }
}

/// Scroll state for the scripture review
#[derive(Debug, Clone, Default)]
pub struct ResultsView {
    /// Current scroll position (lines from top)
    pub scroll_offset: usize,
    /// Total rendered lines (updated on render)
    pub total_lines: usize,
    /// Visible height in lines (updated on render)
    pub visible_height: usize,
}

impl ResultsView {
    /// Get the maximum allowed scroll offset
    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height)
    }

    /// Clamp scroll offset to valid range
    pub fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
        self.clamp_scroll();
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }
}

/// Spinner shown while a quiz is being generated
#[derive(Debug, Clone)]
pub struct LoadingAnimation {
    /// When the animation started
    pub start_time: Instant,
    /// Current animation frame
    pub current_frame: usize,
}

impl Default for LoadingAnimation {
    fn default() -> Self {
        Self { start_time: Instant::now(), current_frame: 0 }
    }
}

impl LoadingAnimation {
    pub const MS_PER_FRAME: u128 = 80;
    const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

    /// Advance the animation based on elapsed time
    pub fn tick(&mut self) {
        self.current_frame = (self.start_time.elapsed().as_millis() / Self::MS_PER_FRAME) as usize;
    }

    pub fn restart(&mut self) {
        *self = Self::default();
    }

    pub fn spinner(&self) -> char {
        Self::SPINNER[self.current_frame % Self::SPINNER.len()]
    }

    /// Trailing dots, one more every few frames
    pub fn dots(&self) -> &'static str {
        match (self.current_frame / 5) % 4 {
            0 => "",
            1 => ".",
            2 => "..",
            _ => "...",
        }
    }
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Command line hidden or showing status
    #[default]
    Normal,
    /// Accepting : commands
    Command,
}

/// State for the command line input
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    /// Current mode
    pub mode: CommandMode,
    /// Input buffer
    pub input: String,
    /// Cursor position in input
    pub cursor: usize,
    /// Status/error message to display (when not in input mode)
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
    /// Command history
    pub history: Vec<String>,
    /// Current history index when navigating
    pub history_index: Option<usize>,
}

impl CommandLineState {
    /// Maximum number of history entries to keep
    const MAX_HISTORY: usize = 100;

    /// Start command mode
    pub fn enter_command_mode(&mut self) {
        self.mode = CommandMode::Command;
        self.input.clear();
        self.cursor = 0;
        self.message = None;
        self.history_index = None;
    }

    /// Exit input mode
    pub fn exit_input_mode(&mut self) {
        self.mode = CommandMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at cursor (cursor is character index)
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn is_input_mode(&self) -> bool {
        self.mode == CommandMode::Command
    }

    /// Add to history, skipping repeats
    pub fn add_to_history(&mut self, cmd: String) {
        if !cmd.is_empty() && self.history.last() != Some(&cmd) {
            if self.history.len() >= Self::MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(cmd);
        }
    }

    /// Navigate history up
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let i = match self.history_index {
            None => self.history.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.history_index = Some(i);
        self.input = self.history[i].clone();
        self.cursor = self.char_count();
    }

    /// Navigate history down
    pub fn history_down(&mut self) {
        let Some(i) = self.history_index else { return };
        if i + 1 < self.history.len() {
            self.history_index = Some(i + 1);
            self.input = self.history[i + 1].clone();
            self.cursor = self.char_count();
        } else {
            self.history_index = None;
            self.input.clear();
            self.cursor = 0;
        }
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// The quiz session driving every screen
    pub session: Session,

    /// Focused setup field
    pub setup_field: SetupField,

    /// Question screen state
    pub quiz_view: QuizView,

    /// Results screen state
    pub results_view: ResultsView,

    /// Loading spinner
    pub loading: LoadingAnimation,

    /// Command line state
    pub command_line: CommandLineState,

    /// Whether the key help overlay is open
    pub show_help: bool,
}

impl AppState {
    /// State with the setup form preseeded
    pub fn new(config: Configuration) -> Self {
        Self { session: Session::with_config(config), ..Self::default() }
    }

    /// Reset per-question view state to match the session's current question
    pub fn sync_quiz_view(&mut self) {
        self.quiz_view.highlighted = self.session.current_answer().unwrap_or(0);
        self.quiz_view.confirm_end = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_field_navigation_stops_at_edges() {
        assert_eq!(SetupField::Chapter.prev(), SetupField::Chapter);
        assert_eq!(SetupField::Chapter.next(), SetupField::Level);
        assert_eq!(SetupField::Feedback.next(), SetupField::Feedback);
        assert_eq!(SetupField::Feedback.prev(), SetupField::Difficulty);
    }

    #[test]
    fn highlight_wraps() {
        let mut view = QuizView::default();
        view.highlight_prev();
        assert_eq!(view.highlighted, 3);
        view.highlight_next();
        assert_eq!(view.highlighted, 0);
    }

    #[test]
    fn results_scroll_is_clamped() {
        let mut view = ResultsView { scroll_offset: 0, total_lines: 30, visible_height: 10 };
        view.scroll_down(100);
        assert_eq!(view.scroll_offset, 20);
        view.scroll_up(5);
        assert_eq!(view.scroll_offset, 15);
        view.scroll_up(100);
        assert_eq!(view.scroll_offset, 0);
    }

    #[test]
    fn spinner_cycles() {
        let mut animation = LoadingAnimation::default();
        let first = animation.spinner();
        animation.current_frame = 10;
        assert_eq!(animation.spinner(), first);
        animation.current_frame = 5;
        assert_eq!(animation.dots(), ".");
    }

    #[test]
    fn command_history_navigation() {
        let mut cl = CommandLineState::default();
        cl.add_to_history("chapter 3".to_string());
        cl.add_to_history("chapter 3".to_string());
        cl.add_to_history("start".to_string());
        assert_eq!(cl.history.len(), 2);

        cl.history_up();
        assert_eq!(cl.input, "start");
        cl.history_up();
        assert_eq!(cl.input, "chapter 3");
        cl.history_down();
        assert_eq!(cl.input, "start");
        cl.history_down();
        assert!(cl.input.is_empty());
    }

    #[test]
    fn insert_and_delete_unicode() {
        let mut cl = CommandLineState::default();
        cl.enter_command_mode();
        for c in "lévél".chars() {
            cl.insert_char(c);
        }
        cl.move_left();
        cl.delete_char();
        assert_eq!(cl.input, "lévl");
        assert_eq!(cl.cursor, 3);
    }
}

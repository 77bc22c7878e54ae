//! Command parsing for the command line

use std::path::PathBuf;

use crate::quiz::{Chapter, Difficulty, Feedback, Level};

/// Parsed command from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick a chapter: :chapter 5
    Chapter(Chapter),
    /// Pick a grade level: :level high
    Level(Level),
    /// Pick a difficulty: :difficulty advanced
    Difficulty(Difficulty),
    /// Pick when feedback is shown: :feedback end
    Feedback(Feedback),
    /// Generate a quiz with the current setup: :start
    Start,
    /// Same configuration, new questions: :retake
    Retake,
    /// Back to setup: :new
    New,
    /// Write the printable summary, optionally into a directory: :print [dir]
    Print(Option<PathBuf>),
    /// Copy the printable summary to the clipboard: :copy
    Copy,
    /// Quit the application: :q or :quit
    Quit,
    /// Show help: :help or :h
    Help,
    /// Clear message: (empty command)
    Nop,
}

/// Result of parsing a command
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Unknown command
    UnknownCommand(String),
    /// Command needs an argument
    MissingArgument(String),
    /// Argument could not be understood
    InvalidArgument(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Ok(Command::Nop);
    }

    let mut parts = input.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim()).unwrap_or("");

    match cmd.to_lowercase().as_str() {
        "chapter" | "ch" | "c" => with_arg("chapter", args, |a| a.parse().map(Command::Chapter)),
        "level" | "lv" => with_arg("level", args, |a| a.parse().map(Command::Level)),
        "difficulty" | "diff" | "d" => {
            with_arg("difficulty", args, |a| a.parse().map(Command::Difficulty))
        }
        "feedback" | "fb" => with_arg("feedback", args, |a| a.parse().map(Command::Feedback)),
        "start" | "s" | "go" => ParseResult::Ok(Command::Start),
        "retake" | "r" => ParseResult::Ok(Command::Retake),
        "new" | "reset" => ParseResult::Ok(Command::New),
        "print" | "p" | "export" => {
            ParseResult::Ok(Command::Print((!args.is_empty()).then(|| PathBuf::from(args))))
        }
        "copy" | "y" => ParseResult::Ok(Command::Copy),
        "quit" | "q" => ParseResult::Ok(Command::Quit),
        "help" | "h" | "?" => ParseResult::Ok(Command::Help),
        _ => ParseResult::UnknownCommand(cmd.to_string()),
    }
}

fn with_arg(
    name: &str,
    args: &str,
    parse: impl FnOnce(&str) -> Result<Command, String>,
) -> ParseResult {
    if args.is_empty() {
        return ParseResult::MissingArgument(name.to_string());
    }
    match parse(args) {
        Ok(command) => ParseResult::Ok(command),
        Err(message) => ParseResult::InvalidArgument(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_command() {
        assert_eq!(parse_command("q"), ParseResult::Ok(Command::Quit));
        assert_eq!(parse_command("quit"), ParseResult::Ok(Command::Quit));
        assert_eq!(parse_command("Q"), ParseResult::Ok(Command::Quit));
    }

    #[test]
    fn parse_help_command() {
        assert_eq!(parse_command("help"), ParseResult::Ok(Command::Help));
        assert_eq!(parse_command("?"), ParseResult::Ok(Command::Help));
    }

    #[test]
    fn parse_chapter_command() {
        assert_eq!(
            parse_command("chapter 12"),
            ParseResult::Ok(Command::Chapter(Chapter::LAST))
        );
        assert!(matches!(parse_command("chapter 13"), ParseResult::InvalidArgument(_)));
        assert!(matches!(parse_command("chapter two"), ParseResult::InvalidArgument(_)));
        assert_eq!(parse_command("chapter"), ParseResult::MissingArgument("chapter".to_string()));
    }

    #[test]
    fn parse_choice_commands() {
        assert_eq!(parse_command("level high"), ParseResult::Ok(Command::Level(Level::High)));
        assert_eq!(
            parse_command("difficulty Advanced"),
            ParseResult::Ok(Command::Difficulty(Difficulty::Advanced))
        );
        assert_eq!(parse_command("feedback end"), ParseResult::Ok(Command::Feedback(Feedback::End)));
        assert!(matches!(parse_command("level college"), ParseResult::InvalidArgument(_)));
    }

    #[test]
    fn parse_print_command() {
        assert_eq!(parse_command("print"), ParseResult::Ok(Command::Print(None)));
        assert_eq!(
            parse_command("print /tmp/luke"),
            ParseResult::Ok(Command::Print(Some(PathBuf::from("/tmp/luke"))))
        );
    }

    #[test]
    fn parse_session_commands() {
        assert_eq!(parse_command("start"), ParseResult::Ok(Command::Start));
        assert_eq!(parse_command("retake"), ParseResult::Ok(Command::Retake));
        assert_eq!(parse_command("new"), ParseResult::Ok(Command::New));
        assert_eq!(parse_command("copy"), ParseResult::Ok(Command::Copy));
    }

    #[test]
    fn parse_unknown_command() {
        assert!(matches!(parse_command("unknown"), ParseResult::UnknownCommand(_)));
    }

    #[test]
    fn parse_empty_is_nop() {
        assert_eq!(parse_command(""), ParseResult::Ok(Command::Nop));
        assert_eq!(parse_command("   "), ParseResult::Ok(Command::Nop));
    }
}

//! Quiz domain types: study configuration, questions and generated quizzes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of questions every generated quiz must contain
pub const QUESTION_COUNT: usize = 10;

/// Number of answer options every question must offer
pub const OPTION_COUNT: usize = 4;

/// A closed set of values the student picks from on the setup screen
pub trait Choice: Copy + PartialEq + 'static {
    /// Every variant, in display order
    const ALL: &'static [Self];

    /// Human-readable label
    fn label(&self) -> &'static str;

    /// Index of this variant within [`Choice::ALL`]
    fn position(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    /// The following variant, wrapping around
    fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// The preceding variant, wrapping around
    fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

/// Grade band the quiz is pitched at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Upper elementary grades
    Elementary,
    /// Middle school
    #[default]
    Middle,
    /// High school
    High,
}

impl Choice for Level {
    const ALL: &'static [Self] = &[Self::Elementary, Self::Middle, Self::High];

    fn label(&self) -> &'static str {
        match self {
            Self::Elementary => "Upper Elementary",
            Self::Middle => "Middle School",
            Self::High => "High School",
        }
    }
}

impl Level {
    /// Parse a level from a short name or its label
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "elementary" | "upper-elementary" | "upper elementary" | "e" => Some(Self::Elementary),
            "middle" | "middle-school" | "middle school" | "m" => Some(Self::Middle),
            "high" | "high-school" | "high school" | "h" => Some(Self::High),
            _ => None,
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown level: {}. Options: elementary, middle, high", s))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How demanding the generated questions should be
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Direct narrative facts
    #[default]
    Beginner,
    /// Context, parables and basic application
    Intermediate,
    /// Theological depth, prophecy and tradition
    Advanced,
}

impl Choice for Difficulty {
    const ALL: &'static [Self] = &[Self::Beginner, Self::Intermediate, Self::Advanced];

    fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl Difficulty {
    /// What the provider is asked to focus on at this difficulty
    pub fn guideline(&self) -> &'static str {
        match self {
            Self::Beginner => "direct facts from the narrative",
            Self::Intermediate => "context, parables and basic application",
            Self::Advanced => "theological depth, Old Testament prophecy links and Church tradition",
        }
    }

    /// Parse a difficulty from its name or first letter
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "easy" | "b" => Some(Self::Beginner),
            "intermediate" | "medium" | "i" => Some(Self::Intermediate),
            "advanced" | "hard" | "a" => Some(Self::Advanced),
            _ => None,
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("Unknown difficulty: {}. Options: beginner, intermediate, advanced", s)
        })
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// When the student learns whether an answer was right
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    /// Reveal correctness and the explanation right after answering
    #[default]
    Immediate,
    /// Only show the grade on the results screen
    End,
}

impl Choice for Feedback {
    const ALL: &'static [Self] = &[Self::Immediate, Self::End];

    fn label(&self) -> &'static str {
        match self {
            Self::Immediate => "Active Learning",
            Self::End => "Full Review",
        }
    }
}

impl Feedback {
    /// One-line description shown under the label
    pub fn description(&self) -> &'static str {
        match self {
            Self::Immediate => "Correct me as I go",
            Self::End => "Show grade at the end",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "immediate" | "now" | "active" | "i" => Some(Self::Immediate),
            "end" | "later" | "review" | "e" => Some(Self::End),
            _ => None,
        }
    }
}

impl FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown feedback style: {}. Options: immediate, end", s))
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A chapter of St. Luke covered by the study curriculum (1 through 12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Chapter(u8);

impl Chapter {
    /// First chapter in the curriculum
    pub const FIRST: Chapter = Chapter(1);
    /// Last chapter in the curriculum
    pub const LAST: Chapter = Chapter(12);

    /// Create a chapter, returning `None` outside 1..=12
    pub fn new(number: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::LAST.0).contains(&number).then_some(Self(number))
    }

    /// The chapter number
    pub fn number(self) -> u8 {
        self.0
    }

    /// The following chapter, wrapping from the last back to the first
    pub fn next(self) -> Self {
        if self == Self::LAST { Self::FIRST } else { Self(self.0 + 1) }
    }

    /// The preceding chapter, wrapping from the first to the last
    pub fn prev(self) -> Self {
        if self == Self::FIRST { Self::LAST } else { Self(self.0 - 1) }
    }

    /// Every chapter in order
    pub fn all() -> impl Iterator<Item = Chapter> {
        (Self::FIRST.0..=Self::LAST.0).map(Chapter)
    }
}

impl Default for Chapter {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for Chapter {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or_else(|| {
            format!("Chapter must be between {} and {}, got {}", Self::FIRST, Self::LAST, number)
        })
    }
}

impl From<Chapter> for u8 {
    fn from(chapter: Chapter) -> Self {
        chapter.0
    }
}

impl FromStr for Chapter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u8 = s.trim().parse().map_err(|_| format!("Not a chapter number: {}", s))?;
        Self::try_from(number)
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the student picks before a quiz is generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub level: Level,
    pub difficulty: Difficulty,
    pub chapter: Chapter,
    pub feedback: Feedback,
}

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "question")]
    prompt: String,
    options: [String; OPTION_COUNT],
    #[serde(rename = "answerIndex")]
    correct_index: usize,
    explanation: String,
}

impl Question {
    /// Build a question, returning `None` if `correct_index` does not point at an option
    pub fn new(
        prompt: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Option<Self> {
        (correct_index < OPTION_COUNT).then(|| Self {
            prompt: prompt.into(),
            options,
            correct_index,
            explanation: explanation.into(),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Text of the correct option
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// Letter shown next to an option ("A" for 0, "B" for 1, ...)
pub fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// A generated quiz: a title and exactly [`QUESTION_COUNT`] questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quiz {
    title: String,
    questions: Vec<Question>,
}

impl Quiz {
    /// Build a quiz, rejecting anything but exactly [`QUESTION_COUNT`] questions
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, ContractViolation> {
        if questions.len() != QUESTION_COUNT {
            return Err(ContractViolation::WrongQuestionCount {
                expected: QUESTION_COUNT,
                found: questions.len(),
            });
        }
        Ok(Self { title: title.into(), questions })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Ways a provider response can break the quiz shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("expected {expected} questions, got {found}")]
    WrongQuestionCount { expected: usize, found: usize },

    #[error("question {question}: expected {expected} options, got {found}")]
    WrongOptionCount { question: usize, expected: usize, found: usize },

    #[error("question {question}: answer index {index} is out of range")]
    AnswerOutOfRange { question: usize, index: i64 },
}

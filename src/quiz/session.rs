//! Quiz session state machine
//!
//! A [`Session`] moves through `setup → loading → quiz → results`. From
//! results it can go back to setup ([`Session::reset`]) or straight to
//! loading again with the same configuration ([`Session::retake`]).
//!
//! Generation is split in two so the provider call can run elsewhere:
//! [`Session::start`] hands out a [`PendingGeneration`] carrying a ticket, and
//! [`Session::complete`] applies the outcome only if that ticket is still the
//! one in flight. Operations whose preconditions do not hold return a
//! [`Rejection`] and leave the session untouched.

use std::fmt;

use thiserror::Error;

use super::model::{Chapter, Configuration, Difficulty, Feedback, Level, Question, Quiz};
use super::provider::{GenerationFailure, GenerationRequest, QuizProvider};
use super::summary::{Outcome, Review, Summary};

/// Coarse phase of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Step {
    /// Choosing chapter, level, difficulty and feedback style
    #[default]
    Setup,
    /// Waiting on the provider
    Loading,
    /// Answering questions
    Quiz,
    /// Reviewing the score
    Results,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Loading => "loading",
            Self::Quiz => "quiz",
            Self::Results => "results",
        })
    }
}

/// Identifies one generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// A generation request the caller must run and report back
#[derive(Debug, Clone)]
pub struct PendingGeneration {
    pub ticket: Ticket,
    pub request: GenerationRequest,
}

/// Why an operation was not applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{action} is only valid during {expected}, session is in {actual}")]
    WrongStep { action: &'static str, expected: Step, actual: Step },

    #[error("a generation request is already in flight")]
    RequestInFlight,

    #[error("question {0} is already answered")]
    AlreadyAnswered(usize),

    #[error("question {0} has not been answered")]
    Unanswered(usize),

    #[error("option {index} is out of range for {count} options")]
    OptionOutOfRange { index: usize, count: usize },

    #[error("already at the first question")]
    AtFirstQuestion,

    #[error("response belongs to a request that is no longer active")]
    StaleResponse,
}

/// The live state of one student's study session
#[derive(Debug, Clone, Default)]
pub struct Session {
    step: Step,
    config: Configuration,
    quiz: Option<Quiz>,
    /// One slot per question, `None` until answered
    answers: Vec<Option<usize>>,
    score: usize,
    current: usize,
    error: Option<String>,
    in_flight: Option<Ticket>,
    /// Tickets issued so far; survives reset so old tickets never match again
    issued: u64,
}

impl Session {
    /// A fresh session in setup with the given configuration
    pub fn with_config(config: Configuration) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Index of the question on screen
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Message from the last failed generation, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a generation request is outstanding
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.as_ref().and_then(|quiz| quiz.question(self.current))
    }

    /// The answer recorded for the question on screen
    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.current).copied().flatten()
    }

    pub fn is_last_question(&self) -> bool {
        self.quiz.as_ref().is_some_and(|quiz| self.current + 1 >= quiz.len())
    }

    /// 1-based position of the current question and the question count
    pub fn progress(&self) -> (usize, usize) {
        let total = self.quiz.as_ref().map_or(0, Quiz::len);
        ((self.current + 1).min(total), total)
    }

    fn require_step(&self, action: &'static str, expected: Step) -> Result<(), Rejection> {
        if self.step == expected {
            Ok(())
        } else {
            Err(Rejection::WrongStep { action, expected, actual: self.step })
        }
    }

    pub fn set_chapter(&mut self, chapter: Chapter) -> Result<(), Rejection> {
        self.require_step("set_chapter", Step::Setup)?;
        self.config.chapter = chapter;
        Ok(())
    }

    pub fn set_level(&mut self, level: Level) -> Result<(), Rejection> {
        self.require_step("set_level", Step::Setup)?;
        self.config.level = level;
        Ok(())
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), Rejection> {
        self.require_step("set_difficulty", Step::Setup)?;
        self.config.difficulty = difficulty;
        Ok(())
    }

    pub fn set_feedback(&mut self, feedback: Feedback) -> Result<(), Rejection> {
        self.require_step("set_feedback", Step::Setup)?;
        self.config.feedback = feedback;
        Ok(())
    }

    /// Begin generating a quiz for `config`
    ///
    /// Moves to loading immediately. The caller runs the returned request and
    /// reports the result with [`Session::complete`].
    pub fn start(&mut self, config: Configuration) -> Result<PendingGeneration, Rejection> {
        if self.in_flight.is_some() {
            return Err(Rejection::RequestInFlight);
        }
        self.require_step("start", Step::Setup)?;
        self.config = config;
        Ok(self.issue())
    }

    /// Generate a new quiz with the same configuration after finishing one
    pub fn retake(&mut self) -> Result<PendingGeneration, Rejection> {
        if self.in_flight.is_some() {
            return Err(Rejection::RequestInFlight);
        }
        self.require_step("retake", Step::Results)?;
        Ok(self.issue())
    }

    fn issue(&mut self) -> PendingGeneration {
        self.issued += 1;
        let ticket = Ticket(self.issued);

        self.in_flight = Some(ticket);
        self.error = None;
        self.quiz = None;
        self.answers.clear();
        self.score = 0;
        self.current = 0;
        self.step = Step::Loading;

        tracing::debug!(ticket = ticket.0, chapter = %self.config.chapter, "generation issued");
        PendingGeneration { ticket, request: GenerationRequest::for_config(&self.config) }
    }

    /// Apply the outcome of the request identified by `ticket`
    ///
    /// On success the quiz is installed with every answer slot empty. On
    /// failure the session returns to setup with the configuration intact
    /// and a message for the student.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Quiz, GenerationFailure>,
    ) -> Result<(), Rejection> {
        if self.in_flight != Some(ticket) {
            return Err(Rejection::StaleResponse);
        }
        self.in_flight = None;

        match outcome {
            Ok(quiz) => {
                tracing::info!(title = quiz.title(), questions = quiz.len(), "quiz ready");
                self.answers = vec![None; quiz.len()];
                self.quiz = Some(quiz);
                self.score = 0;
                self.current = 0;
                self.step = Step::Quiz;
            }
            Err(failure) => {
                tracing::warn!(reason = failure.reason(), "quiz generation failed");
                self.error = Some(failure.to_string());
                self.quiz = None;
                self.answers.clear();
                self.step = Step::Setup;
            }
        }
        Ok(())
    }

    /// Start, run the provider and apply its outcome in one call
    pub async fn start_with<P: QuizProvider>(
        &mut self,
        config: Configuration,
        provider: &P,
    ) -> Result<(), Rejection> {
        let PendingGeneration { ticket, request } = self.start(config)?;
        let outcome = provider.generate(request).await;
        self.complete(ticket, outcome)
    }

    /// Record an answer for the current question
    ///
    /// The first answer is final. Returns whether the answer was correct.
    pub fn select_answer(&mut self, option: usize) -> Result<bool, Rejection> {
        self.require_step("select_answer", Step::Quiz)?;
        let question = self.current_question().ok_or(Rejection::Unanswered(self.current))?;

        let count = question.options().len();
        if option >= count {
            return Err(Rejection::OptionOutOfRange { index: option, count });
        }
        if self.current_answer().is_some() {
            return Err(Rejection::AlreadyAnswered(self.current));
        }

        let correct = question.is_correct(option);
        self.answers[self.current] = Some(option);
        if correct {
            self.score += 1;
        }
        Ok(correct)
    }

    /// Move past an answered question, finishing the quiz after the last one
    pub fn advance(&mut self) -> Result<(), Rejection> {
        self.require_step("advance", Step::Quiz)?;
        if self.current_answer().is_none() {
            return Err(Rejection::Unanswered(self.current));
        }

        if self.is_last_question() {
            self.step = Step::Results;
        } else {
            self.current += 1;
        }
        Ok(())
    }

    /// Revisit the previous question without touching answers or score
    pub fn go_back(&mut self) -> Result<(), Rejection> {
        self.require_step("go_back", Step::Quiz)?;
        if self.current == 0 {
            return Err(Rejection::AtFirstQuestion);
        }
        self.current -= 1;
        Ok(())
    }

    /// Stop the quiz now; unanswered questions count as skipped
    pub fn end_early(&mut self) -> Result<(), Rejection> {
        self.require_step("end_early", Step::Quiz)?;
        self.step = Step::Results;
        Ok(())
    }

    /// Discard everything and return to setup with default choices
    ///
    /// A request still in flight is forgotten, so its outcome will be stale.
    pub fn reset(&mut self) {
        *self = Self { issued: self.issued, ..Self::default() };
    }

    /// Per-question review, available on the results step
    pub fn summary(&self) -> Option<Summary<'_>> {
        if self.step != Step::Results {
            return None;
        }
        let quiz = self.quiz.as_ref()?;

        let reviews = quiz
            .questions()
            .iter()
            .enumerate()
            .map(|(i, question)| Review {
                number: i + 1,
                question,
                outcome: Outcome::classify(question, self.answers.get(i).copied().flatten()),
            })
            .collect();

        Some(Summary {
            title: quiz.title(),
            config: self.config,
            score: self.score,
            total: quiz.len(),
            reviews,
        })
    }
}

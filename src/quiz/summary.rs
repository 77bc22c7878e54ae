//! Read-only view of a finished (or ended) quiz

use super::model::{Configuration, Question};

/// How the student did on one question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    /// Answered with the wrong option
    Incorrect { chosen: usize },
    /// Left unanswered when the quiz ended
    Skipped,
}

impl Outcome {
    /// Classify an answer slot against its question
    pub fn classify(question: &Question, answer: Option<usize>) -> Self {
        match answer {
            Some(chosen) if question.is_correct(chosen) => Self::Correct,
            Some(chosen) => Self::Incorrect { chosen },
            None => Self::Skipped,
        }
    }

    /// Badge shown in the review, if any
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Self::Correct => None,
            Self::Incorrect { .. } => Some("Requires Study"),
            Self::Skipped => Some("Incomplete"),
        }
    }
}

/// One reviewed question
#[derive(Debug, Clone, Copy)]
pub struct Review<'a> {
    /// 1-based question number
    pub number: usize,
    pub question: &'a Question,
    pub outcome: Outcome,
}

impl Review<'_> {
    /// Text of the option the student picked, if they answered
    pub fn chosen_option(&self) -> Option<&str> {
        match self.outcome {
            Outcome::Correct => Some(self.question.correct_option()),
            Outcome::Incorrect { chosen } => self.question.option(chosen),
            Outcome::Skipped => None,
        }
    }
}

/// Results of a session
#[derive(Debug, Clone)]
pub struct Summary<'a> {
    pub title: &'a str,
    pub config: Configuration,
    pub score: usize,
    pub total: usize,
    pub reviews: Vec<Review<'a>>,
}

impl Summary<'_> {
    /// Score as a whole percentage of the question count
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.score as f64 / self.total as f64) * 100.0).round() as u32
    }

    /// Number of questions left unanswered
    pub fn skipped(&self) -> usize {
        self.reviews.iter().filter(|r| r.outcome == Outcome::Skipped).count()
    }

    /// Number of questions answered incorrectly
    pub fn incorrect(&self) -> usize {
        self.reviews.iter().filter(|r| matches!(r.outcome, Outcome::Incorrect { .. })).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::fixtures;

    #[test]
    fn classify_answers() {
        let quiz = fixtures::quiz();
        let question = quiz.question(1).unwrap();
        let correct = question.correct_index();
        let wrong = (correct + 1) % 4;

        assert_eq!(Outcome::classify(question, Some(correct)), Outcome::Correct);
        assert_eq!(Outcome::classify(question, Some(wrong)), Outcome::Incorrect { chosen: wrong });
        assert_eq!(Outcome::classify(question, None), Outcome::Skipped);
    }

    #[test]
    fn badges() {
        assert_eq!(Outcome::Correct.badge(), None);
        assert_eq!(Outcome::Incorrect { chosen: 0 }.badge(), Some("Requires Study"));
        assert_eq!(Outcome::Skipped.badge(), Some("Incomplete"));
    }

    #[test]
    fn percent_rounds() {
        let quiz = fixtures::quiz();
        let summary = Summary {
            title: quiz.title(),
            config: Configuration::default(),
            score: 7,
            total: 10,
            reviews: Vec::new(),
        };
        assert_eq!(summary.percent(), 70);

        let thirds = Summary { score: 2, total: 3, ..summary.clone() };
        assert_eq!(thirds.percent(), 67);

        let empty = Summary { score: 0, total: 0, ..summary };
        assert_eq!(empty.percent(), 0);
    }
}

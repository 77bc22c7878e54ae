//! Quiz domain: configuration, generated quizzes, the provider contract and
//! the session state machine.

pub mod curriculum;
pub mod model;
pub mod provider;
pub mod session;
pub mod summary;

pub use model::{
    Chapter, Choice, Configuration, Difficulty, Feedback, Level, OPTION_COUNT, QUESTION_COUNT,
    Question, Quiz, option_letter,
};
pub use provider::{GenerationFailure, GenerationRequest, QuizProvider, parse_quiz};
pub use session::{PendingGeneration, Rejection, Session, Step, Ticket};
pub use summary::{Outcome, Review, Summary};

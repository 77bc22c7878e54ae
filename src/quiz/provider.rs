//! Contract with the quiz content provider
//!
//! A provider turns a [`GenerationRequest`] into a [`Quiz`] or a single
//! opaque [`GenerationFailure`]. Raw provider output is parsed with
//! [`parse_quiz`], which accepts only the exact quiz shape: ten questions,
//! four options each, an in-range answer index.

use std::future::Future;

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

use super::curriculum;
use super::model::{
    Chapter, Configuration, ContractViolation, Difficulty, Level, OPTION_COUNT, QUESTION_COUNT,
    Question, Quiz,
};

/// Parameters for one quiz generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub level: Level,
    pub difficulty: Difficulty,
    pub chapter: Chapter,
    /// Curriculum focus for the chapter, may be empty
    pub curriculum_hint: &'static str,
}

impl GenerationRequest {
    /// Build a request, looking up the curriculum hint for `chapter`
    pub fn new(level: Level, difficulty: Difficulty, chapter: Chapter) -> Self {
        Self { level, difficulty, chapter, curriculum_hint: curriculum::summary(chapter) }
    }

    /// Build a request from a study configuration
    pub fn for_config(config: &Configuration) -> Self {
        Self::new(config.level, config.difficulty, config.chapter)
    }

    /// System instruction describing the educator persona and output rules
    pub fn system_instruction(&self) -> String {
        format!(
            "You are a Bible educator preparing study material for students.\n\
             Write EXACTLY {count} multiple-choice questions on St. Luke chapter {chapter}.\n\
             \n\
             Student level: {level}\n\
             Difficulty: {difficulty} ({guideline})\n\
             Curriculum focus: {hint}\n\
             \n\
             Rules:\n\
             - Base every scripture reference, quotation and turn of phrase on the New King James Version (NKJV).\n\
             - Each question has exactly {options} options and one correct answer.\n\
             - Cover a range of verses and ideas across the chapter rather than only the most familiar facts.\n\
             - Every question carries a short teacher's explanation citing the verse where possible (e.g. Luke 1:37 NKJV).\n\
             - Reply with JSON that matches the response schema and nothing else.",
            count = QUESTION_COUNT,
            chapter = self.chapter,
            level = self.level,
            difficulty = self.difficulty,
            guideline = self.difficulty.guideline(),
            hint = self.curriculum_hint,
            options = OPTION_COUNT,
        )
    }

    /// User prompt asking for a fresh quiz
    pub fn prompt(&self) -> String {
        let mut prompt = format!(
            "Create a fresh {} study quiz for {} students on Luke chapter {} (NKJV).",
            self.difficulty, self.level, self.chapter
        );
        if !self.curriculum_hint.is_empty() {
            prompt.push_str(&format!(" Focus on these key points: {}", self.curriculum_hint));
        }
        prompt.push_str(
            " Vary the questions from the usual sets for this chapter and keep the tone encouraging.",
        );
        prompt
    }
}

/// The only failure the quiz core knows about
///
/// Displays as a generic message meant for the student. The underlying reason
/// is kept for logging and never shown on screen.
#[derive(Debug, Error)]
#[error("I couldn't generate the study session. Please try again.")]
pub struct GenerationFailure {
    reason: String,
}

impl GenerationFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    /// Internal reason, for logs
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<ContractViolation> for GenerationFailure {
    fn from(violation: ContractViolation) -> Self {
        Self::new(format!("response broke the quiz contract: {}", violation))
    }
}

impl From<serde_json::Error> for GenerationFailure {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("response is not valid quiz JSON: {}", err))
    }
}

/// A source of generated quizzes
pub trait QuizProvider {
    /// Generate one quiz. A single attempt: no retry, no streaming.
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<Quiz, GenerationFailure>> + Send;
}

/// Output schema handed to the provider alongside the prompt
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "questions": {
                "type": "ARRAY",
                "minItems": QUESTION_COUNT,
                "maxItems": QUESTION_COUNT,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "options": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "minItems": OPTION_COUNT,
                            "maxItems": OPTION_COUNT
                        },
                        "answerIndex": { "type": "INTEGER" },
                        "explanation": { "type": "STRING" }
                    },
                    "required": ["question", "options", "answerIndex", "explanation"]
                }
            }
        },
        "required": ["title", "questions"]
    })
}

/// Quiz as the provider emits it, before validation
#[derive(Debug, Deserialize)]
struct QuizPayload {
    title: String,
    questions: Vec<QuestionPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionPayload {
    question: String,
    options: Vec<String>,
    answer_index: i64,
    explanation: String,
}

impl QuizPayload {
    fn into_quiz(self) -> Result<Quiz, ContractViolation> {
        if self.questions.len() != QUESTION_COUNT {
            return Err(ContractViolation::WrongQuestionCount {
                expected: QUESTION_COUNT,
                found: self.questions.len(),
            });
        }

        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| q.into_question(i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Quiz::new(self.title, questions)
    }
}

impl QuestionPayload {
    /// Validate one question; `number` is 1-based for error messages
    fn into_question(self, number: usize) -> Result<Question, ContractViolation> {
        let found = self.options.len();
        let options: [String; OPTION_COUNT] = self.options.try_into().map_err(|_| {
            ContractViolation::WrongOptionCount { question: number, expected: OPTION_COUNT, found }
        })?;

        let out_of_range =
            ContractViolation::AnswerOutOfRange { question: number, index: self.answer_index };
        let index = usize::try_from(self.answer_index).map_err(|_| out_of_range.clone())?;

        Question::new(self.question, options, index, self.explanation).ok_or(out_of_range)
    }
}

/// Parse raw provider text into a quiz
///
/// Any JSON error or shape mismatch is a [`GenerationFailure`]; a partial
/// quiz is never returned.
pub fn parse_quiz(raw: &str) -> Result<Quiz, GenerationFailure> {
    let payload: QuizPayload = serde_json::from_str(raw.trim())?;
    Ok(payload.into_quiz()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_json(options: usize, answer: i64) -> Value {
        json!({
            "question": "Who was the father of John the Forerunner?",
            "options": (0..options).map(|i| format!("option {}", i)).collect::<Vec<_>>(),
            "answerIndex": answer,
            "explanation": "Luke 1:13 NKJV"
        })
    }

    fn quiz_json(questions: Vec<Value>) -> String {
        json!({ "title": "The Annunciation", "questions": questions }).to_string()
    }

    #[test]
    fn parses_well_formed_quiz() {
        let raw = quiz_json((0..10).map(|i| question_json(4, i % 4)).collect());
        let quiz = parse_quiz(&format!("  {}\n", raw)).unwrap();

        assert_eq!(quiz.title(), "The Annunciation");
        assert_eq!(quiz.len(), 10);
        assert_eq!(quiz.question(5).map(Question::correct_index), Some(1));
    }

    #[test]
    fn malformed_json_is_a_failure() {
        let failure = parse_quiz("{ not json").unwrap_err();
        assert!(failure.reason().contains("not valid quiz JSON"));
        assert_eq!(failure.to_string(), "I couldn't generate the study session. Please try again.");
    }

    #[test]
    fn missing_field_is_a_failure() {
        let raw = json!({ "title": "No questions" }).to_string();
        assert!(parse_quiz(&raw).is_err());
    }

    #[test]
    fn wrong_question_count_is_a_failure() {
        let raw = quiz_json((0..9).map(|_| question_json(4, 0)).collect());
        let failure = parse_quiz(&raw).unwrap_err();
        assert!(failure.reason().contains("expected 10 questions, got 9"));
    }

    #[test]
    fn wrong_option_count_is_a_failure() {
        let mut questions: Vec<Value> = (0..10).map(|_| question_json(4, 0)).collect();
        questions[3] = question_json(3, 0);
        let failure = parse_quiz(&quiz_json(questions)).unwrap_err();
        assert!(failure.reason().contains("question 4: expected 4 options, got 3"));
    }

    #[test]
    fn answer_index_out_of_range_is_a_failure() {
        for bad in [4, -1] {
            let mut questions: Vec<Value> = (0..10).map(|_| question_json(4, 0)).collect();
            questions[9] = question_json(4, bad);
            let failure = parse_quiz(&quiz_json(questions)).unwrap_err();
            assert!(failure.reason().contains("question 10: answer index"), "{}", failure.reason());
        }
    }

    #[test]
    fn request_carries_curriculum_hint() {
        let chapter = Chapter::new(10).unwrap();
        let request = GenerationRequest::new(Level::High, Difficulty::Advanced, chapter);

        assert!(request.curriculum_hint.contains("Good Samaritan"));
        assert!(request.prompt().contains("Good Samaritan"));
        assert!(request.prompt().contains("High School"));

        let system = request.system_instruction();
        assert!(system.contains("EXACTLY 10"));
        assert!(system.contains("chapter 10"));
        assert!(system.contains("NKJV"));
        assert!(system.contains("Advanced"));
    }

    #[test]
    fn request_from_configuration() {
        let config = Configuration::default();
        let request = GenerationRequest::for_config(&config);
        assert_eq!(request.chapter, Chapter::FIRST);
        assert_eq!(request.level, Level::Middle);
        assert_eq!(request.difficulty, Difficulty::Beginner);
    }

    #[test]
    fn schema_pins_counts() {
        let schema = response_schema();
        let questions = &schema["properties"]["questions"];
        assert_eq!(questions["minItems"], 10);
        assert_eq!(questions["maxItems"], 10);
        assert_eq!(questions["items"]["properties"]["options"]["minItems"], 4);
        assert_eq!(schema["required"], json!(["title", "questions"]));
    }
}

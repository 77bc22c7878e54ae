//! Quiz generation backed by the Gemini API

use std::future::Future;

use super::client::GeminiClient;
use super::error::GeminiError;
use super::models::{GeminiModel, GenerateContentRequest};
use crate::quiz::{GenerationFailure, GenerationRequest, Quiz, QuizProvider, parse_quiz};
use crate::quiz::provider::response_schema;

/// Generates quizzes with one `generateContent` call per request
pub struct GeminiQuizProvider {
    client: GeminiClient,
    model: GeminiModel,
}

impl GeminiQuizProvider {
    pub fn new(client: GeminiClient, model: GeminiModel) -> Self {
        Self { client, model }
    }

    pub fn model(&self) -> GeminiModel {
        self.model
    }

    /// Build the API request for a quiz
    fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
        GenerateContentRequest::new(request.prompt())
            .with_system(request.system_instruction())
            .with_json_schema(response_schema())
    }

    async fn generate_text(&self, request: &GenerationRequest) -> Result<String, GeminiError> {
        let body = Self::build_request(request);
        let response = self.client.generate_content(self.model, &body).await?;

        if let Some(reason) = response.block_reason() {
            return Err(GeminiError::Blocked(reason.to_string()));
        }

        let finish_reason = response.finish_reason().unwrap_or("UNSPECIFIED");
        match response.text() {
            Some(text) => {
                // MAX_TOKENS here usually means truncated JSON
                if finish_reason != "STOP" {
                    tracing::warn!(finish_reason, "response stopped early");
                }
                Ok(text)
            }
            None => {
                tracing::warn!(finish_reason, "response carried no text");
                Err(GeminiError::EmptyResponse)
            }
        }
    }
}

impl QuizProvider for GeminiQuizProvider {
    fn generate(
        &self,
        request: GenerationRequest,
    ) -> impl Future<Output = Result<Quiz, GenerationFailure>> + Send {
        async move {
            tracing::info!(
                model = self.model.model_id(),
                chapter = request.chapter.number(),
                level = %request.level,
                difficulty = %request.difficulty,
                "requesting quiz"
            );
            let text = match self.generate_text(&request).await {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        recoverable = err.is_recoverable(),
                        reauth = err.requires_reauth(),
                        "quiz request failed"
                    );
                    return Err(err.into());
                }
            };
            parse_quiz(&text)
        }
    }
}

impl From<GeminiError> for GenerationFailure {
    fn from(err: GeminiError) -> Self {
        if err.requires_reauth() {
            GenerationFailure::new(format!("{} (store a valid key with `lectio key set`)", err))
        } else {
            GenerationFailure::new(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Chapter, Difficulty, Level};

    #[test]
    fn request_asks_for_json_quiz() {
        let request =
            GenerationRequest::new(Level::Elementary, Difficulty::Beginner, Chapter::new(2).unwrap());
        let body = serde_json::to_value(GeminiQuizProvider::build_request(&request)).unwrap();

        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["properties"]["questions"]["maxItems"], 10);
        assert!(body["contents"][0]["parts"][0]["text"].as_str().unwrap().contains("Luke chapter 2"));
        assert!(body["systemInstruction"]["parts"][0]["text"].as_str().unwrap().contains("NKJV"));
    }

    #[test]
    fn gemini_errors_become_generic_failures() {
        let failure: GenerationFailure = GeminiError::Blocked("SAFETY".to_string()).into();
        assert_eq!(failure.reason(), "Prompt blocked: SAFETY");
        assert_eq!(failure.to_string(), "I couldn't generate the study session. Please try again.");
    }

    #[test]
    fn auth_failures_point_at_key_set() {
        let err = GeminiError::ApiError { status: 403, message: "API key not valid.".to_string() };
        let failure: GenerationFailure = err.into();
        assert!(failure.reason().starts_with("API error (403)"));
        assert!(failure.reason().contains("lectio key set"));

        let failure: GenerationFailure = GeminiError::EmptyResponse.into();
        assert!(!failure.reason().contains("lectio key set"));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_failure() {
        let client = GeminiClient::new("AIza-test".to_string())
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let provider = GeminiQuizProvider::new(client, GeminiModel::Gemini25Flash);
        let request = GenerationRequest::for_config(&Default::default());

        let failure = provider.generate(request).await.unwrap_err();
        assert!(failure.reason().starts_with("HTTP request failed"), "{}", failure.reason());
    }
}

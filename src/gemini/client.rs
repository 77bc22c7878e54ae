//! HTTP client for the Gemini API

use reqwest::{Client, Response, StatusCode};

use super::error::GeminiError;
use super::models::{GeminiModel, GenerateContentRequest, GenerateContentResponse};

/// Gemini API client
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Scheme and host, without version segment
    base_url: String,
}

impl GeminiClient {
    /// Public Gemini API host
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    /// API version path segment
    const API_VERSION: &'static str = "v1beta";

    /// Create a new Gemini client with the given API key
    pub fn new(api_key: String) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .user_agent(concat!("lectio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, api_key, base_url: Self::DEFAULT_BASE_URL.to_string() })
    }

    /// Point the client at another host (a proxy or a local mock)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full URL for a `generateContent` call
    fn endpoint(&self, model: GeminiModel) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            Self::API_VERSION,
            model.model_id()
        )
    }

    /// Send one `generateContent` request and return the parsed response
    pub async fn generate_content(
        &self,
        model: GeminiModel,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        tracing::debug!(model = model.model_id(), "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "generateContent finished"
            );
        }
        Ok(parsed)
    }

    /// Test the API key by sending a minimal request
    pub async fn test_connection(&self) -> Result<(), GeminiError> {
        let request = GenerateContentRequest::new("Hi").with_max_tokens(10);
        self.generate_content(GeminiModel::Gemini25FlashLite, &request).await?;
        Ok(())
    }
}

/// Turn non-success HTTP statuses into errors
async fn check_status(response: Response) -> Result<Response, GeminiError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return Err(GeminiError::RateLimited { retry_after_seconds: retry_after });
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GeminiError::ApiError { status: status.as_u16(), message: error_message(&body) });
    }

    Ok(response)
}

/// Pull `error.message` out of a Gemini error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

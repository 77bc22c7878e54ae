//! Data models for Gemini `generateContent` requests and responses

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Available Gemini models
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum GeminiModel {
    /// Gemini 3 Pro preview - strongest reasoning
    #[default]
    Gemini3Pro,
    /// Gemini 2.5 Pro
    Gemini25Pro,
    /// Gemini 2.5 Flash - fast
    Gemini25Flash,
    /// Gemini 2.5 Flash-Lite - fastest and cheapest
    Gemini25FlashLite,
}

impl GeminiModel {
    /// Get the API model identifier
    pub fn model_id(&self) -> &'static str {
        match self {
            Self::Gemini3Pro => "gemini-3-pro-preview",
            Self::Gemini25Pro => "gemini-2.5-pro",
            Self::Gemini25Flash => "gemini-2.5-flash",
            Self::Gemini25FlashLite => "gemini-2.5-flash-lite",
        }
    }

    /// Get a human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini3Pro => "Gemini 3 Pro",
            Self::Gemini25Pro => "Gemini 2.5 Pro",
            Self::Gemini25Flash => "Gemini 2.5 Flash",
            Self::Gemini25FlashLite => "Gemini 2.5 Flash-Lite",
        }
    }

    /// Parse model from a short name or model ID
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pro" | "3-pro" | "gemini-3-pro" | "gemini-3-pro-preview" => Some(Self::Gemini3Pro),
            "2.5-pro" | "gemini-2.5-pro" => Some(Self::Gemini25Pro),
            "flash" | "2.5-flash" | "gemini-2.5-flash" => Some(Self::Gemini25Flash),
            "flash-lite" | "lite" | "2.5-flash-lite" | "gemini-2.5-flash-lite" => {
                Some(Self::Gemini25FlashLite)
            }
            _ => None,
        }
    }

    /// List all available models
    pub fn all() -> &'static [GeminiModel] {
        &[Self::Gemini3Pro, Self::Gemini25Pro, Self::Gemini25Flash, Self::Gemini25FlashLite]
    }
}

impl std::str::FromStr for GeminiModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let ids: Vec<_> = Self::all().iter().map(GeminiModel::model_id).collect();
            format!("Unknown model: {}. Options: {}", s, ids.join(", "))
        })
    }
}

/// Author of a content turn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One piece of a content turn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set on thought-summary parts, which are not part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), thought: None }
    }
}

/// A content turn (or the system instruction, which has no role)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn with a single text part
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Some(Role::User), parts: vec![Part::text(text)] }
    }

    /// A role-less text block, used for system instructions
    pub fn instruction(text: impl Into<String>) -> Self {
        Self { role: None, parts: vec![Part::text(text)] }
    }
}

/// Generation settings
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns
    pub contents: Vec<Content>,
    /// Optional system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Create a request with a single user prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { contents: vec![Content::user(prompt)], system_instruction: None, generation_config: None }
    }

    /// Set the system instruction
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::instruction(system));
        self
    }

    /// Require a JSON reply matching `schema`
    pub fn with_json_schema(mut self, schema: Value) -> Self {
        let config = self.generation_config.get_or_insert_with(GenerationConfig::default);
        config.response_mime_type = Some("application/json".to_string());
        config.response_schema = Some(schema);
        self
    }

    /// Set max output tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.generation_config.get_or_insert_with(GenerationConfig::default).max_output_tokens =
            Some(max_tokens);
        self
    }
}

/// Response from `generateContent`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Answer text of the first candidate, thought parts excluded
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    /// Why the first candidate stopped generating
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }

    /// Why the prompt was blocked, if it was
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

/// One generated candidate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Missing when generation stopped for safety reasons
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

/// Feedback on the prompt itself
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

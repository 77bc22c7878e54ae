//! Gemini API integration
//!
//! API key lookup, the `generateContent` HTTP client and the quiz provider
//! built on top of it.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod provider;

pub use auth::{ApiKeyManager, KeySource};
pub use client::GeminiClient;
pub use error::GeminiError;
pub use models::{GeminiModel, GenerateContentRequest, GenerateContentResponse};
pub use provider::GeminiQuizProvider;

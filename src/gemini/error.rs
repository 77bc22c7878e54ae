//! Error types for Gemini API integration

use thiserror::Error;

/// Errors that can occur when talking to the Gemini API
#[derive(Debug, Error)]
pub enum GeminiError {
    /// API key is not configured
    #[error("API key not configured. Set GEMINI_API_KEY or run `lectio key set <KEY>`")]
    ApiKeyNotFound,

    /// Failed to access system keyring
    #[error("Failed to access keyring: {0}")]
    KeyringError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// Rate limited by the API
    #[error("Rate limited. Retry after {retry_after_seconds} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_seconds: u64,
    },

    /// The prompt was blocked by safety filters
    #[error("Prompt blocked: {0}")]
    Blocked(String),

    /// The response carried no text
    #[error("Response contained no text")]
    EmptyResponse,

    /// Invalid API key format
    #[error("Invalid API key format. Gemini keys start with 'AIza' and are 39 characters long")]
    InvalidApiKey,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GeminiError {
    /// Check if this error is transient (a later attempt might succeed)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GeminiError::RateLimited { .. }
                | GeminiError::RequestError(_)
                | GeminiError::ApiError { status: 500..=599, .. }
        )
    }

    /// Check if this error requires a new API key
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            GeminiError::ApiKeyNotFound
                | GeminiError::InvalidApiKey
                | GeminiError::ApiError { status: 401 | 403, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_is_recoverable() {
        assert!(GeminiError::RateLimited { retry_after_seconds: 5 }.is_recoverable());
        assert!(GeminiError::ApiError { status: 503, message: String::new() }.is_recoverable());
        assert!(!GeminiError::EmptyResponse.is_recoverable());
    }

    #[test]
    fn auth_errors_require_reauth() {
        assert!(GeminiError::ApiKeyNotFound.requires_reauth());
        assert!(GeminiError::ApiError { status: 403, message: String::new() }.requires_reauth());
        assert!(!GeminiError::ApiError { status: 400, message: String::new() }.requires_reauth());
    }
}

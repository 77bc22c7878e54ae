//! API key lookup: environment first, then the system keyring

use keyring::Entry;

use super::error::GeminiError;

/// Service name for keyring storage
const SERVICE_NAME: &str = "lectio";
/// Entry name for the API key
const API_KEY_ENTRY: &str = "gemini-api-key";
/// Environment variables checked, in order
const ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Where a resolved key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// An environment variable
    Env(&'static str),
    /// The system keyring
    Keyring,
}

/// Manages the Gemini API key
pub struct ApiKeyManager;

impl ApiKeyManager {
    /// Resolve the key to use, preferring the environment over the keyring
    pub fn resolve() -> Result<(String, KeySource), GeminiError> {
        if let Some((name, key)) = Self::from_env() {
            return Ok((key, KeySource::Env(name)));
        }
        Self::get_api_key().map(|key| (key, KeySource::Keyring))
    }

    /// First non-empty key found in the environment
    fn from_env() -> Option<(&'static str, String)> {
        ENV_VARS.iter().find_map(|name| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (*name, v))
        })
    }

    /// Get the API key from system keyring
    pub fn get_api_key() -> Result<String, GeminiError> {
        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| GeminiError::KeyringError(e.to_string()))?;

        entry.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => GeminiError::ApiKeyNotFound,
            _ => GeminiError::KeyringError(e.to_string()),
        })
    }

    /// Store the API key in system keyring
    pub fn set_api_key(key: &str) -> Result<(), GeminiError> {
        if !Self::validate_key_format(key) {
            return Err(GeminiError::InvalidApiKey);
        }

        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| GeminiError::KeyringError(e.to_string()))?;

        entry.set_password(key).map_err(|e| GeminiError::KeyringError(e.to_string()))
    }

    /// Delete the stored API key
    pub fn delete_api_key() -> Result<(), GeminiError> {
        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| GeminiError::KeyringError(e.to_string()))?;

        entry.delete_credential().map_err(|e| match e {
            keyring::Error::NoEntry => GeminiError::ApiKeyNotFound,
            _ => GeminiError::KeyringError(e.to_string()),
        })
    }

    /// Validate API key format
    fn validate_key_format(key: &str) -> bool {
        // Google API keys are "AIza" followed by 35 URL-safe characters
        key.len() == 39
            && key.starts_with("AIza")
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    /// Mask an API key for display (show first 6 and last 4 chars)
    pub fn mask_key(key: &str) -> String {
        if key.len() <= 12 || !key.is_ascii() {
            return "*".repeat(key.chars().count());
        }
        format!("{}...{}", &key[..6], &key[key.len() - 4..])
    }
}

//! Configuration management for Lectio

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::gemini::GeminiModel;
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Gemini model used for quiz generation
    #[serde(with = "model_id")]
    pub model: GeminiModel,

    /// Override for the Gemini API host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    /// Where printable summaries are written (current directory if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Vellum".to_string(),
            model: GeminiModel::default(),
            api_base_url: None,
            export_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {:?}", path))
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    /// Log file used while the TUI owns the terminal
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("lectio.log"))
    }

    /// Directory for printable summaries
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the active theme
    pub fn active_theme(&self) -> Theme {
        Theme::by_name(&self.theme)
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "lectio").context("Failed to determine config directory")
    }
}

/// Stores the model as its API identifier so the file reads like the docs
mod model_id {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::gemini::GeminiModel;

    pub fn serialize<S: Serializer>(model: &GeminiModel, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(model.model_id())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GeminiModel, D::Error> {
        let id = String::deserialize(deserializer)?;
        id.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_vellum_and_gemini_3() {
        let config = Config::default();
        assert_eq!(config.theme, "Vellum");
        assert_eq!(config.model, GeminiModel::Gemini3Pro);
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn config_serializes_model_id() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"model\":\"gemini-3-pro-preview\""));
        assert!(!json.contains("api_base_url"));
    }

    #[test]
    fn config_deserializes_partial_json() {
        let json = r#"{"theme":"Vigil","model":"gemini-2.5-flash"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.active_theme().name, "Vigil");
        assert_eq!(config.model, GeminiModel::Gemini25Flash);
        assert!(config.export_dir.is_none());
    }

    #[test]
    fn unknown_model_is_rejected() {
        let json = r#"{"model":"gpt-4"}"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            theme: "Vigil".to_string(),
            model: GeminiModel::Gemini25Pro,
            api_base_url: Some("http://localhost:8080".to_string()),
            export_dir: Some(dir.path().to_path_buf()),
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}

//! Configuration settings for Svar.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub scoring: ScoringSettings,
    pub model: ModelSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Scoring server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Base URL of the scoring server.
    pub api_url: String,
    /// Timeout for fetching the question set, in seconds.
    pub questions_timeout_secs: u64,
    /// Timeout for per-task file probes, in seconds.
    pub files_timeout_secs: u64,
    /// Timeout for the final answer submission, in seconds.
    pub submit_timeout_secs: u64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            api_url: crate::scoring::DEFAULT_API_URL.to_string(),
            questions_timeout_secs: 15,
            files_timeout_secs: 10,
            submit_timeout_secs: 60,
        }
    }
}

/// Model provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Gemini model to use.
    pub name: String,
    /// Sampling temperature. Kept low for answer consistency.
    pub temperature: f32,
    /// Maximum tool-loop iterations for the chat agent.
    pub max_tool_iterations: usize,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: "gemini-2.5-pro".to_string(),
            temperature: 0.2,
            max_tool_iterations: 10,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SvarError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("svar")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use crate::error::SvarError;
use anyhow::Result;

/// Manage configuration.
pub fn run_config(action: &ConfigAction, mut settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&settings)
                .map_err(|e| SvarError::Config(e.to_string()))?;
            println!("{}", content);
        }

        ConfigAction::Path => {
            println!("{}", Settings::default_config_path().display());
        }

        ConfigAction::Set { key, value } => {
            match key.as_str() {
                "general.log_level" => settings.general.log_level = value.clone(),
                "scoring.api_url" => settings.scoring.api_url = value.clone(),
                "model.name" => settings.model.name = value.clone(),
                "model.temperature" => {
                    settings.model.temperature = value.parse().map_err(|_| {
                        SvarError::InvalidInput(format!("Invalid temperature: {}", value))
                    })?;
                }
                "model.max_tool_iterations" => {
                    settings.model.max_tool_iterations = value.parse().map_err(|_| {
                        SvarError::InvalidInput(format!("Invalid iteration count: {}", value))
                    })?;
                }
                _ => {
                    return Err(SvarError::InvalidInput(format!(
                        "Unknown configuration key: {}",
                        key
                    ))
                    .into());
                }
            }
            settings.save()?;
            Output::success(&format!("Set {} = {}", key, value));
        }
    }

    Ok(())
}

//! Doctor command implementation.

use crate::cli::Output;
use crate::config::{space_host, space_id, Credentials, Settings, API_KEY_VARS};
use crate::scoring::ScoringClient;
use anyhow::Result;

/// Check environment and configuration.
pub fn run_doctor(settings: &Settings) -> Result<()> {
    Output::header("Environment");

    match Credentials::from_env() {
        Ok(_) => Output::success("Gemini API key found"),
        Err(e) => Output::error(&format!("{}", e)),
    }
    for var in API_KEY_VARS {
        let status = match std::env::var(var) {
            Ok(v) if !v.is_empty() => "set",
            _ => "not set",
        };
        Output::kv(var, status);
    }

    match space_id() {
        Some(id) => {
            Output::kv("SPACE_ID", &id);
            Output::kv(
                "Repo URL",
                &format!("https://huggingface.co/spaces/{}", id),
            );
        }
        None => Output::info("SPACE_ID not set (running locally?)"),
    }
    match space_host() {
        Some(host) => Output::kv("SPACE_HOST", &host),
        None => Output::info("SPACE_HOST not set (running locally?)"),
    }

    Output::header("Configuration");
    Output::kv(
        "Config file",
        &Settings::default_config_path().display().to_string(),
    );
    Output::kv("Scoring API", &settings.scoring.api_url);
    match ScoringClient::new(&settings.scoring) {
        Ok(_) => Output::success("Scoring API URL is valid"),
        Err(e) => Output::error(&format!("{}", e)),
    }
    Output::kv("Model", &settings.model.name);
    Output::kv("Temperature", &settings.model.temperature.to_string());

    Ok(())
}

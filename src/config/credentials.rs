//! Provider credentials and deployment environment lookup.

use crate::error::{Result, SvarError};

/// Environment variables checked for the Gemini API key, in order.
/// The first non-empty value wins.
pub const API_KEY_VARS: [&str; 3] = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "GOOGLE_GEMINI_API_KEY"];

/// Provider credentials, resolved once at startup and read-only thereafter.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
}

impl Credentials {
    /// Resolve credentials from the environment.
    ///
    /// A missing API key is a fatal startup condition.
    pub fn from_env() -> Result<Self> {
        for var in API_KEY_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.is_empty() {
                    return Ok(Self { api_key: key });
                }
            }
        }
        Err(SvarError::Config(format!(
            "No Gemini API key found. Set one of: {}",
            API_KEY_VARS.join(", ")
        )))
    }
}

/// Hugging Face Space ID, when running inside a Space. Informational only.
pub fn space_id() -> Option<String> {
    std::env::var("SPACE_ID").ok().filter(|s| !s.is_empty())
}

/// Hugging Face Space host, when running inside a Space. Informational only.
pub fn space_host() -> Option<String> {
    std::env::var("SPACE_HOST").ok().filter(|s| !s.is_empty())
}

/// URL identifying the agent's code, included in the submission payload.
///
/// Points at the Space repository when deployed, otherwise at this crate's
/// repository. The scoring server only displays this string.
pub fn agent_code_url() -> String {
    match space_id() {
        Some(id) => format!("https://huggingface.co/spaces/{}/tree/main", id),
        None => env!("CARGO_PKG_REPOSITORY").to_string(),
    }
}

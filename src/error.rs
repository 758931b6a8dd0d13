//! Error types for Svar.

use thiserror::Error;

/// Library-level error type for Svar operations.
#[derive(Error, Debug)]
pub enum SvarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model provider error: {0}")]
    Provider(String),

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

/// Result type alias for Svar operations.
pub type Result<T> = std::result::Result<T, SvarError>;

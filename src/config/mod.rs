//! Configuration module for Svar.
//!
//! Handles application settings and environment credential lookup.

mod credentials;
mod settings;

pub use credentials::{agent_code_url, space_host, space_id, Credentials, API_KEY_VARS};
pub use settings::{GeneralSettings, ModelSettings, ScoringSettings, Settings};

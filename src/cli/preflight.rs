//! Pre-flight checks before network operations.
//!
//! Validates required credentials before starting operations that would
//! otherwise fail midway.

use crate::config::Credentials;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// The full batch run requires a provider API key.
    Run,
    /// Answering a single question requires a provider API key.
    Answer,
    /// The chat agent requires a provider API key.
    Chat,
    /// Listing questions needs nothing beyond the scoring server.
    Questions,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Run | Operation::Answer | Operation::Chat => {
            Credentials::from_env()?;
        }
        Operation::Questions => {
            // No credential requirements for a read-only fetch
        }
    }
    Ok(())
}

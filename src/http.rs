//! HTTP client configuration with sensible defaults.

use std::time::Duration;

/// Default timeout for outbound HTTP requests (2 minutes).
/// Individual calls set tighter per-request budgets where required.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Create an HTTP client with the configured default timeout.
pub fn create_client() -> reqwest::Client {
    create_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an HTTP client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client")
}

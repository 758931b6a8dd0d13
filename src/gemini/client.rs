//! Minimal Gemini REST client.

use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::error::{Result, SvarError};
use crate::http::create_client;
use tracing::debug;

/// Default base URL for the Gemini API.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client for the given model.
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            http: create_client(),
            api_base: GEMINI_API_BASE.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Override the API base URL (used by tests).
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// The model this client targets.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Issue a single generateContent call.
    pub async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);
        debug!("Calling {} with {} turn(s)", self.model, request.contents.len());

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| SvarError::Provider(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(500).collect();
            return Err(SvarError::Provider(format!(
                "Gemini API returned {}: {}",
                status, preview
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SvarError::Provider(format!("Invalid Gemini response: {}", e)))
    }
}

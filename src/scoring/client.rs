//! HTTP client for the scoring server.

use super::types::{Question, SubmissionPayload, SubmissionResult};
use crate::config::ScoringSettings;
use crate::error::{Result, SvarError};
use crate::http::create_client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default base URL for the scoring server.
pub const DEFAULT_API_URL: &str = "https://agents-course-unit4-scoring.hf.space";

/// Maximum characters of file content appended to a question.
const MAX_FILE_CONTEXT_CHARS: usize = 5000;

/// Client for the questions, files, and submit endpoints.
pub struct ScoringClient {
    http: reqwest::Client,
    base_url: String,
    questions_timeout: Duration,
    files_timeout: Duration,
    submit_timeout: Duration,
}

impl ScoringClient {
    /// Create a client from scoring settings, validating the base URL.
    pub fn new(settings: &ScoringSettings) -> Result<Self> {
        let base = Url::parse(&settings.api_url).map_err(|e| {
            SvarError::Config(format!(
                "Invalid scoring API URL '{}': {}",
                settings.api_url, e
            ))
        })?;

        Ok(Self {
            http: create_client(),
            base_url: base.as_str().trim_end_matches('/').to_string(),
            questions_timeout: Duration::from_secs(settings.questions_timeout_secs),
            files_timeout: Duration::from_secs(settings.files_timeout_secs),
            submit_timeout: Duration::from_secs(settings.submit_timeout_secs),
        })
    }

    /// Fetch the current question set.
    pub async fn fetch_questions(&self) -> Result<Vec<Question>> {
        let url = format!("{}/questions", self.base_url);
        debug!("Fetching questions from {}", url);

        let response = self
            .http
            .get(&url)
            .timeout(self.questions_timeout)
            .send()
            .await?
            .error_for_status()?;

        let questions: Vec<Question> = response.json().await?;
        debug!("Fetched {} questions", questions.len());
        Ok(questions)
    }

    /// Fetch auxiliary file content for a task, rendered as question context.
    ///
    /// Best-effort: returns an empty string when the task has no files (404),
    /// on unexpected statuses, and on any network failure. Enrichment must
    /// never block answering, so nothing here propagates to the caller.
    pub async fn fetch_file_context(&self, task_id: &str) -> String {
        let url = format!("{}/files/{}", self.base_url, task_id);
        debug!("Checking for files at {}", url);

        let response = match self.http.get(&url).timeout(self.files_timeout).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("File probe failed for task {}: {}", task_id, e);
                return String::new();
            }
        };

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => {
                // No files is a normal outcome for most tasks.
                debug!("No files found for task {}", task_id);
                return String::new();
            }
            status => {
                warn!("Unexpected status {} fetching files for task {}", status, task_id);
                return String::new();
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if content_type.contains("application/json") {
            let body = match response.text().await {
                Ok(b) => b,
                Err(e) => {
                    warn!("Failed to read file body for task {}: {}", task_id, e);
                    return String::new();
                }
            };
            match serde_json::from_str::<serde_json::Value>(&body) {
                Ok(value) if value.is_array() => {
                    format!("\n\nAssociated files for this task: {}", value)
                }
                Ok(value) => format!("\n\nFile data: {}", value),
                Err(_) => {
                    // Declared JSON but does not parse; fall back to raw text.
                    warn!(
                        "File response for task {} declared JSON but failed to parse",
                        task_id
                    );
                    format!(
                        "\n\nFile content:\n{}",
                        truncate_chars(&body, MAX_FILE_CONTEXT_CHARS)
                    )
                }
            }
        } else if content_type.contains("text") {
            match response.text().await {
                Ok(body) => format!(
                    "\n\nFile content:\n{}",
                    truncate_chars(&body, MAX_FILE_CONTEXT_CHARS)
                ),
                Err(e) => {
                    warn!("Failed to read file body for task {}: {}", task_id, e);
                    String::new()
                }
            }
        } else {
            match response.bytes().await {
                Ok(bytes) => format!(
                    "\n\n[Binary file of type {} - {} bytes]",
                    content_type,
                    bytes.len()
                ),
                Err(e) => {
                    warn!("Failed to read file body for task {}: {}", task_id, e);
                    String::new()
                }
            }
        }
    }

    /// Submit the answer batch.
    ///
    /// A non-2xx response becomes `SvarError::Submission` carrying the status
    /// code and any server-provided detail; network and body-parse failures
    /// surface as `SvarError::Http`.
    pub async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionResult> {
        let url = format!("{}/submit", self.base_url);
        debug!("Submitting {} answers to {}", payload.answers.len(), url);

        let response = self
            .http
            .post(&url)
            .timeout(self.submit_timeout)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
                .unwrap_or_else(|| truncate_chars(&body, 500));
            return Err(SvarError::Submission(format!(
                "Server responded with status {}. Detail: {}",
                status.as_u16(),
                detail
            )));
        }

        Ok(response.json().await?)
    }
}

/// Truncate on character boundaries.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

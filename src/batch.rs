//! Batch runner for the answer-and-submit pipeline.
//!
//! Drives the whole run: fetches the question set, enriches and answers each
//! question strictly sequentially, and performs a single batch submission at
//! the end. The runner exclusively owns the growing results log and answers
//! payload; a single failing question never aborts the batch.

use crate::error::SvarError;
use crate::normalize::normalize;
use crate::scoring::{AnswerItem, ResultRecord, ScoringClient, SubmissionPayload, SubmissionResult};
use crate::solver::AnswerProvider;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Outcome of one batch run: a human-readable status and the full results
/// log. The log is returned in every outcome, including failures, so
/// partial progress is never discarded.
#[derive(Debug)]
pub struct RunOutcome {
    pub status: String,
    pub records: Vec<ResultRecord>,
}

/// Coordinates enrichment, answering, normalization, and submission.
pub struct BatchRunner {
    scoring: ScoringClient,
    provider: Arc<dyn AnswerProvider>,
    agent_code: String,
}

impl BatchRunner {
    pub fn new(
        scoring: ScoringClient,
        provider: Arc<dyn AnswerProvider>,
        agent_code: String,
    ) -> Self {
        Self {
            scoring,
            provider,
            agent_code,
        }
    }

    /// Run the full batch for the given username.
    ///
    /// Total: every failure mode is folded into the status string. The only
    /// checks that skip network activity entirely are a missing username and
    /// an empty question set.
    #[instrument(skip(self), fields(username = %username))]
    pub async fn run(&self, username: &str) -> RunOutcome {
        let username = username.trim();
        if username.is_empty() {
            return RunOutcome {
                status: "No username provided. Pass --username to submit answers.".to_string(),
                records: Vec::new(),
            };
        }

        let questions = match self.scoring.fetch_questions().await {
            Ok(questions) if questions.is_empty() => {
                return RunOutcome {
                    status: "Fetched questions list is empty.".to_string(),
                    records: Vec::new(),
                };
            }
            Ok(questions) => questions,
            Err(e) => {
                return RunOutcome {
                    status: format!("Error fetching questions: {}", e),
                    records: Vec::new(),
                };
            }
        };

        info!("Running agent on {} questions", questions.len());

        let mut records: Vec<ResultRecord> = Vec::new();
        let mut answers: Vec<AnswerItem> = Vec::new();

        for (idx, item) in questions.iter().enumerate() {
            let Some((task_id, question_text)) = item.fields() else {
                warn!("Skipping item with missing task_id or question");
                continue;
            };

            info!("[{}/{}] Processing task {}", idx + 1, questions.len(), task_id);

            let context = self.scoring.fetch_file_context(task_id).await;
            let enriched = if context.is_empty() {
                question_text.to_string()
            } else {
                format!("{}{}", question_text, context)
            };

            match self.provider.answer(&enriched).await {
                Ok(raw) => {
                    let answer = normalize(&raw);
                    info!("Answer for task {}: {}", task_id, answer);
                    answers.push(AnswerItem {
                        task_id: task_id.to_string(),
                        submitted_answer: answer.clone(),
                    });
                    records.push(ResultRecord::new(task_id, question_text, &answer));
                }
                Err(e) => {
                    warn!("Provider failed on task {}: {}", task_id, e);
                    let detail: String = e.to_string().chars().take(50).collect();
                    records.push(ResultRecord::new(
                        task_id,
                        question_text,
                        &format!("AGENT ERROR: {}", detail),
                    ));
                }
            }
        }

        if answers.is_empty() {
            return RunOutcome {
                status: "Agent did not produce any answers to submit.".to_string(),
                records,
            };
        }

        let payload = SubmissionPayload {
            username: username.to_string(),
            agent_code: self.agent_code.clone(),
            answers,
        };
        info!(
            "Submitting {} answers for user '{}'",
            payload.answers.len(),
            username
        );

        let status = match self.scoring.submit(&payload).await {
            Ok(result) => format_success_status(&result),
            Err(SvarError::Submission(detail)) => format!("Submission Failed: {}", detail),
            Err(e) => format!("An unexpected error occurred during submission: {}", e),
        };

        RunOutcome { status, records }
    }
}

/// Render the server's scoring result as a multi-line status message.
fn format_success_status(result: &SubmissionResult) -> String {
    format!(
        "Submission Successful!\nUser: {}\nOverall Score: {}% ({}/{} correct)\nMessage: {}",
        result.username.as_deref().unwrap_or("unknown"),
        result
            .score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        result
            .correct_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string()),
        result
            .total_attempted
            .map(|t| t.to_string())
            .unwrap_or_else(|| "?".to_string()),
        result.message.as_deref().unwrap_or("No message received.")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status_formatting() {
        let result = SubmissionResult {
            username: Some("u".to_string()),
            score: Some(80.0),
            correct_count: Some(4),
            total_attempted: Some(5),
            message: Some("ok".to_string()),
        };
        let status = format_success_status(&result);
        assert!(status.contains("80"));
        assert!(status.contains("4"));
        assert!(status.contains("5"));
        assert!(status.contains("ok"));
        assert!(status.contains("u"));
    }

    #[test]
    fn test_success_status_missing_fields() {
        let result = SubmissionResult {
            username: None,
            score: None,
            correct_count: None,
            total_attempted: None,
            message: None,
        };
        let status = format_success_status(&result);
        assert!(status.contains("N/A"));
        assert!(status.contains("?/?"));
        assert!(status.contains("No message received."));
    }
}

//! Data model for the scoring server exchange.

use serde::{Deserialize, Serialize};

/// A benchmark question as returned by the questions endpoint.
///
/// Fields are optional because the server occasionally returns incomplete
/// items; those are skipped by the batch runner rather than failing the
/// whole fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

impl Question {
    /// Task ID and question text, when both are usable.
    ///
    /// An empty task ID counts as missing.
    pub fn fields(&self) -> Option<(&str, &str)> {
        let task_id = self.task_id.as_deref().filter(|id| !id.is_empty())?;
        let question = self.question.as_deref()?;
        Some((task_id, question))
    }
}

/// One answered question in the submission payload.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerItem {
    pub task_id: String,
    pub submitted_answer: String,
}

/// The single batch submission body. Built once, immutable thereafter.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPayload {
    pub username: String,
    pub agent_code: String,
    pub answers: Vec<AnswerItem>,
}

/// Scoring result returned by the submission endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionResult {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub correct_count: Option<u32>,
    #[serde(default)]
    pub total_attempted: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One row of the per-question results log.
#[derive(Debug, Clone)]
pub struct ResultRecord {
    pub task_id: String,
    /// Question text, truncated to 100 characters for display.
    pub question: String,
    /// The normalized answer, or an error marker if the provider failed.
    pub submitted_answer: String,
}

impl ResultRecord {
    pub fn new(task_id: &str, question_text: &str, submitted_answer: &str) -> Self {
        Self {
            task_id: task_id.to_string(),
            question: preview(question_text, 100),
            submitted_answer: submitted_answer.to_string(),
        }
    }
}

/// Truncate on character boundaries with a trailing ellipsis.
fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    }
}

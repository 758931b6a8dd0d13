//! Scoring server boundary: data model and HTTP client.

mod client;
mod types;

pub use client::{ScoringClient, DEFAULT_API_URL};
pub use types::{AnswerItem, Question, ResultRecord, SubmissionPayload, SubmissionResult};

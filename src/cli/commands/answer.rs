//! Single-question answer command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Credentials, Settings};
use crate::error::SvarError;
use crate::gemini::GeminiClient;
use crate::normalize::normalize;
use crate::scoring::ScoringClient;
use crate::solver::{AnswerProvider, Solver};
use anyhow::Result;

/// Answer one question, either given directly or looked up by task ID.
/// Nothing is submitted.
pub async fn run_answer(
    question: Option<&str>,
    task: Option<&str>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Answer) {
        Output::error(&format!("{}", e));
        Output::info("Run 'svar doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let credentials = Credentials::from_env()?;
    let scoring = ScoringClient::new(&settings.scoring)?;
    let gemini = GeminiClient::new(&credentials.api_key, &settings.model.name);
    let solver = Solver::new(gemini, settings.model.temperature);

    let (task_id, question_text) = match (question, task) {
        (Some(q), None) => (None, q.to_string()),
        (None, Some(id)) => {
            let questions = scoring.fetch_questions().await?;
            let text = questions
                .iter()
                .find_map(|item| match item.fields() {
                    Some((tid, text)) if tid == id => Some(text.to_string()),
                    _ => None,
                })
                .ok_or_else(|| {
                    SvarError::InvalidInput(format!("No question with task ID '{}'", id))
                })?;
            (Some(id.to_string()), text)
        }
        (Some(_), Some(_)) => {
            return Err(
                SvarError::InvalidInput("Pass either a question or --task, not both".into()).into(),
            );
        }
        (None, None) => {
            return Err(SvarError::InvalidInput("Provide a question or --task <id>".into()).into());
        }
    };

    let enriched = match &task_id {
        Some(id) => {
            let context = scoring.fetch_file_context(id).await;
            if context.is_empty() {
                question_text.clone()
            } else {
                format!("{}{}", question_text, context)
            }
        }
        None => question_text.clone(),
    };

    let spinner = Output::spinner("Thinking...");
    let result = solver.answer(&enriched).await;
    spinner.finish_and_clear();

    match result {
        Ok(raw) => {
            println!("{}", normalize(&raw));
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to answer: {}", e));
            Err(e.into())
        }
    }
}

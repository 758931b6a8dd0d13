//! Questions listing command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::scoring::ScoringClient;
use anyhow::Result;

/// Fetch and list the current question set.
pub async fn run_questions(settings: Settings) -> Result<()> {
    preflight::check(Operation::Questions)?;

    let scoring = ScoringClient::new(&settings.scoring)?;

    let spinner = Output::spinner("Fetching questions...");
    let questions = scoring.fetch_questions().await;
    spinner.finish_and_clear();

    let questions = match questions {
        Ok(q) => q,
        Err(e) => {
            Output::error(&format!("Error fetching questions: {}", e));
            return Err(e.into());
        }
    };

    if questions.is_empty() {
        Output::warning("Fetched questions list is empty.");
        return Ok(());
    }

    Output::header(&format!("Questions ({})", questions.len()));
    for item in &questions {
        match item.fields() {
            Some((task_id, text)) => Output::question_row(task_id, text),
            None => Output::warning("Skipping item with missing task_id or question"),
        }
    }

    Ok(())
}

//! Batch run command implementation.

use crate::batch::BatchRunner;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{agent_code_url, Credentials, Settings};
use crate::gemini::GeminiClient;
use crate::scoring::ScoringClient;
use crate::solver::Solver;
use anyhow::Result;
use std::sync::Arc;

/// Run the full batch: fetch, answer, and submit.
pub async fn run_batch(username: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Run) {
        Output::error(&format!("{}", e));
        Output::info("Run 'svar doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let credentials = Credentials::from_env()?;
    let scoring = ScoringClient::new(&settings.scoring)?;
    let gemini = GeminiClient::new(&credentials.api_key, &settings.model.name);

    Output::info(&format!(
        "Answering with {} as '{}'",
        gemini.model(),
        username
    ));

    let solver = Solver::new(gemini, settings.model.temperature);
    let runner = BatchRunner::new(scoring, Arc::new(solver), agent_code_url());

    let spinner = Output::spinner("Running agent on benchmark questions...");
    let outcome = runner.run(username).await;
    spinner.finish_and_clear();

    println!("{}", outcome.status);

    if !outcome.records.is_empty() {
        Output::header(&format!("Results ({})", outcome.records.len()));
        for record in &outcome.records {
            Output::result_row(&record.task_id, &record.question, &record.submitted_answer);
        }
    }

    Ok(())
}

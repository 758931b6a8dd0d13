//! Svar CLI entry point.

use anyhow::Result;
use clap::Parser;
use svar::cli::{commands, Cli, Commands};
use svar::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("svar={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };

    // Execute command
    match &cli.command {
        Commands::Run { username } => {
            commands::run_batch(username, settings).await?;
        }

        Commands::Answer { question, task } => {
            commands::run_answer(question.as_deref(), task.as_deref(), settings).await?;
        }

        Commands::Questions => {
            commands::run_questions(settings).await?;
        }

        Commands::Chat { message } => {
            commands::run_chat(message, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}

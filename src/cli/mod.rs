//! CLI module for Svar.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Svar - Benchmark Question Agent
///
/// A CLI agent that answers GAIA-style benchmark questions with Gemini and
/// submits them to a scoring server. The name "Svar" comes from the
/// Norwegian/Scandinavian word for "answer."
#[derive(Parser, Debug)]
#[command(name = "svar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all benchmark questions, answer them, and submit the batch
    Run {
        /// Username to submit answers under
        #[arg(short, long, env = "HF_USERNAME")]
        username: String,
    },

    /// Answer a single question without submitting
    Answer {
        /// Question text (omit when using --task)
        question: Option<String>,

        /// Answer the fetched question with this task ID instead
        #[arg(short, long)]
        task: Option<String>,
    },

    /// Fetch and list the current question set
    Questions,

    /// Chat with the tool-calling agent (weather, Hugging Face Hub stats)
    Chat {
        /// Message for the agent
        message: String,
    },

    /// Check environment and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "model.name")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Show configuration file path
    Path,
}

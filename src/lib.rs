//! Svar - Benchmark Question Agent
//!
//! A CLI agent that answers GAIA-style benchmark questions and submits them
//! to a scoring server.
//!
//! The name "Svar" comes from the Norwegian/Scandinavian word for "answer."
//!
//! # Overview
//!
//! Svar allows you to:
//! - Fetch a benchmark question set from a scoring server
//! - Answer each question with Gemini, enriched with per-task file context
//! - Normalize verbose model output into exact short answers
//! - Submit the whole batch and report the score
//! - Chat with a small tool-calling agent (weather, Hub statistics)
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and credential management
//! - `http` - Shared HTTP client construction
//! - `gemini` - Gemini wire types and REST client
//! - `solver` - Question solver with tool-equipped primary and bare fallback
//! - `normalize` - Answer normalization
//! - `scoring` - Scoring server client and data model
//! - `batch` - Batch runner coordinating the answer-and-submit pipeline
//! - `agent` - Tool-calling chat agent
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use svar::batch::BatchRunner;
//! use svar::config::{agent_code_url, Credentials, Settings};
//! use svar::gemini::GeminiClient;
//! use svar::scoring::ScoringClient;
//! use svar::solver::Solver;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = Credentials::from_env()?;
//!
//!     let scoring = ScoringClient::new(&settings.scoring)?;
//!     let gemini = GeminiClient::new(&credentials.api_key, &settings.model.name);
//!     let solver = Solver::new(gemini, settings.model.temperature);
//!     let runner = BatchRunner::new(scoring, Arc::new(solver), agent_code_url());
//!
//!     let outcome = runner.run("my-username").await;
//!     println!("{}", outcome.status);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod http;
pub mod normalize;
pub mod scoring;
pub mod solver;

pub use error::{Result, SvarError};

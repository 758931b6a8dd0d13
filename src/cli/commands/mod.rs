//! CLI command implementations.

mod answer;
mod chat;
mod config;
mod doctor;
mod questions;
mod run;

pub use answer::run_answer;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use questions::run_questions;
pub use run::run_batch;

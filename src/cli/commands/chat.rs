//! Chat command implementation.

use crate::agent::{ChatAgent, ToolContext};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Credentials, Settings};
use crate::gemini::GeminiClient;
use crate::http::create_client;
use anyhow::Result;

/// Run the tool-calling chat agent on a single message.
pub async fn run_chat(message: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Chat) {
        Output::error(&format!("{}", e));
        Output::info("Run 'svar doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let credentials = Credentials::from_env()?;
    let gemini = GeminiClient::new(&credentials.api_key, &settings.model.name);
    let tools = ToolContext::new(create_client());
    let agent =
        ChatAgent::new(gemini, tools).with_max_iterations(settings.model.max_tool_iterations);

    let spinner = Output::spinner("Agent working...");

    match agent.run(message).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.content);

            if !response.tool_calls.is_empty() {
                Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    Output::info(&format!("  {}", call));
                }
                println!();
            }

            Output::info(&format!(
                "Completed in {} iteration(s)",
                response.iterations
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Agent failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

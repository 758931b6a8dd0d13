//! Chat agent with a function-calling loop.
//!
//! Alternates between two states: waiting on the model, and waiting on tool
//! results. The loop continues while the latest model turn requests a
//! function call and terminates on the first tool-free message, bounded by a
//! maximum iteration count.

use super::tools::{parse_tool_call, tool_declarations, ToolContext};
use crate::error::{Result, SvarError};
use crate::gemini::{
    Content, FunctionCall, GeminiClient, GenerateContentRequest, GenerationConfig, Part, Tool,
};
use serde_json::json;
use tracing::{debug, info};

/// Default system prompt for the chat agent.
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant with access to tools for \
weather lookups and Hugging Face Hub statistics. Use a tool when it helps answer the question, \
then give a concise final answer.";

/// Agent that can call local tools while chatting.
pub struct ChatAgent {
    gemini: GeminiClient,
    tools: ToolContext,
    max_iterations: usize,
    system_prompt: String,
}

impl ChatAgent {
    /// Create a new agent with the given tool context.
    pub fn new(gemini: GeminiClient, tools: ToolContext) -> Self {
        Self {
            gemini,
            tools,
            max_iterations: 10,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the agent on a user message.
    pub async fn run(&self, message: &str) -> Result<AgentResponse> {
        let mut contents = vec![Content::user(message)];
        let mut tool_calls_made = Vec::new();
        let mut iterations = 0;

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(SvarError::Agent(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("Agent iteration {}", iterations);

            let request = GenerateContentRequest {
                contents: contents.clone(),
                system_instruction: Some(Content::text(&self.system_prompt)),
                tools: vec![Tool::functions(tool_declarations())],
                generation_config: Some(GenerationConfig {
                    temperature: Some(0.0),
                    thinking_config: None,
                }),
            };

            let response = self.gemini.generate(&request).await?;
            let Some(content) = response.candidates.first().and_then(|c| c.content.clone())
            else {
                return Err(SvarError::Agent("No response from model".to_string()));
            };

            let calls: Vec<FunctionCall> =
                response.function_calls().into_iter().cloned().collect();

            if calls.is_empty() {
                // Tool-free message: the agent is done.
                return Ok(AgentResponse {
                    content: response.text(),
                    tool_calls: tool_calls_made,
                    iterations,
                });
            }

            // Keep the model turn in the transcript, then answer each call.
            contents.push(content);

            let mut response_parts = Vec::new();
            for call in calls {
                let record = self.execute_tool_call(&call).await;
                response_parts.push(Part::function_response(
                    &call.name,
                    json!({ "result": record.result }),
                ));
                tool_calls_made.push(record);
            }
            contents.push(Content::function_responses(response_parts));
        }
    }

    /// Execute a single tool call and return a record of it.
    async fn execute_tool_call(&self, call: &FunctionCall) -> ToolCallRecord {
        info!("Agent calling tool: {} with args: {}", call.name, call.args);

        let result = match parse_tool_call(&call.name, &call.args) {
            Ok(tool) => self.tools.execute(&tool).await,
            Err(e) => format!("Failed to parse tool call: {}", e),
        };

        ToolCallRecord {
            name: call.name.clone(),
            arguments: call.args.to_string(),
            result,
        }
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (model calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

//! Tool-calling chat agent.

mod runner;
mod tools;

pub use runner::{AgentResponse, ChatAgent, ToolCallRecord};
pub use tools::{parse_tool_call, tool_declarations, ToolCall, ToolContext};

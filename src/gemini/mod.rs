//! Gemini provider boundary: wire types and a thin REST client.

mod client;
mod types;

pub use client::{GeminiClient, GEMINI_API_BASE};
pub use types::{
    Candidate, Content, FunctionCall, FunctionDeclaration, FunctionResponse,
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, ThinkingConfig, Tool,
};

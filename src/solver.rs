//! Question solver built on the Gemini client.
//!
//! Two-attempt policy: one fully equipped call (search, code execution, URL
//! context), then one bare retry with a simplified prompt. There is no
//! backoff loop; if both attempts fail the error propagates to the caller.

use crate::error::{Result, SvarError};
use crate::gemini::{
    Content, GeminiClient, GenerateContentRequest, GenerationConfig, ThinkingConfig, Tool,
};
use async_trait::async_trait;
use tracing::{debug, warn};

/// System instruction for exact-answer questions.
pub const SYSTEM_INSTRUCTION: &str = r#"You are an expert problem-solving agent designed to answer questions accurately.

IMPORTANT INSTRUCTIONS:
1. Read the question carefully and identify what specific information is being asked for.
2. If the question requires current information, use Google Search.
3. If the question involves code or calculations, use code execution.
4. If the question references URLs or files, use URL context to read them.
5. Your final answer should be ONLY the direct answer to the question - no explanations, no "The answer is...", just the answer itself.
6. For numerical answers, provide just the number (e.g., "42" not "42 people").
7. For yes/no questions, answer only "yes" or "no".
8. For multiple choice, provide only the letter or the exact option text.
9. Be extremely precise - the answer must match exactly what is expected.

Examples of good final answers:
- "42"
- "Paris"
- "yes"
- "2024-03-15"
- "$1,234.56"

Remember: Output ONLY the final answer, nothing else."#;

/// Something that can answer an enriched question.
///
/// The batch runner depends on this trait rather than on `Solver` directly
/// so it can be driven by a scripted provider in tests.
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Answer a question, returning the raw (un-normalized) model text.
    async fn answer(&self, question: &str) -> Result<String>;
}

/// Gemini-backed answer provider.
pub struct Solver {
    gemini: GeminiClient,
    temperature: f32,
}

impl Solver {
    pub fn new(gemini: GeminiClient, temperature: f32) -> Self {
        Self {
            gemini,
            temperature,
        }
    }

    fn primary_request(&self, question: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(question)],
            system_instruction: Some(Content::text(SYSTEM_INSTRUCTION)),
            tools: vec![
                Tool::google_search(),
                Tool::code_execution(),
                Tool::url_context(),
            ],
            generation_config: Some(GenerationConfig {
                temperature: Some(self.temperature),
                thinking_config: Some(ThinkingConfig {
                    include_thoughts: false,
                }),
            }),
        }
    }

    fn fallback_request(&self, question: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(format!(
                "Answer this question with ONLY the direct answer, no explanation: {}",
                question
            ))],
            generation_config: Some(GenerationConfig {
                temperature: Some(self.temperature),
                thinking_config: None,
            }),
            ..Default::default()
        }
    }
}

#[async_trait]
impl AnswerProvider for Solver {
    async fn answer(&self, question: &str) -> Result<String> {
        match self.gemini.generate(&self.primary_request(question)).await {
            Ok(response) => {
                let text = response.text();
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    debug!("Primary attempt answered with {} chars", trimmed.len());
                    return Ok(trimmed.to_string());
                }
                warn!("Primary model call returned no text, retrying without tools");
            }
            Err(e) => {
                warn!("Primary model call failed ({}), retrying without tools", e);
            }
        }

        let response = self
            .gemini
            .generate(&self.fallback_request(question))
            .await?;
        let text = response.text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SvarError::Provider(
                "Fallback model call returned no text".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }
}

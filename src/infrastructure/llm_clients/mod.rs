pub mod gemini;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;

pub use gemini::GeminiClient;

/// A single-shot text generation backend.
#[async_trait]
pub trait LLMClient {
    async fn generate(&self, config: &LLMConfig, api_key: &str, prompt: &str) -> Result<String>;
}

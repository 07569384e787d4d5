use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::llm::LLMClient;
use crate::types::Result;

/// Opaque text-to-text summarization function.
///
/// Receives the full compression prompt and returns the new summary payload.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> Result<String>;
}

/// Summarizer backed by any configured LLM provider.
pub struct LlmSummarizer {
    llm: Arc<dyn LLMClient>,
}

impl LlmSummarizer {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String> {
        debug!(model = self.llm.model_name(), "Requesting conversation summary");
        let summary = self.llm.generate(prompt).await?;
        Ok(summary.trim().to_string())
    }
}

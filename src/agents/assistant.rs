use std::sync::Arc;

use tracing::debug;

use crate::{
    llm::LLMClient,
    memory::{ChatMemoryStore, codec},
    types::{AppError, Message, MessageRole, Result},
};

/// System prompt used when the configuration does not set one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant";

/// General-purpose chat assistant with compressed conversation memory.
///
/// Each turn reads the stored history, asks the model for a reply and hands
/// the whole updated history back to the memory store in one write.
pub struct Assistant {
    llm: Arc<dyn LLMClient>,
    memory: Arc<dyn ChatMemoryStore>,
    system_prompt: String,
}

impl Assistant {
    pub fn new(
        llm: Arc<dyn LLMClient>,
        memory: Arc<dyn ChatMemoryStore>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            memory,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Answer `query` within `session_id` and record the exchange.
    pub async fn chat(&self, session_id: &str, query: &str) -> Result<String> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput("Query must not be empty".to_string()));
        }

        let stored = self.memory.get_messages(session_id).await?;
        let mut messages = with_system_prompt(stored, &self.system_prompt);
        messages.push(Message::user(query));

        let history: Vec<(String, String)> = messages.iter().filter_map(chat_pair).collect();
        debug!(
            session_id,
            history_len = history.len(),
            model = self.llm.model_name(),
            "Generating assistant reply"
        );
        let reply = self.llm.generate_with_history(&history).await?;

        messages.push(Message::assistant(reply.clone()));
        self.memory.update_messages(session_id, messages).await?;

        Ok(reply)
    }
}

/// Puts `system_prompt` at the head of `messages` as the only System message.
///
/// A summary carried by any stored System message is kept, attached to the
/// new prompt, so re-asserting the prompt never drops compressed context.
pub fn with_system_prompt(messages: Vec<Message>, system_prompt: &str) -> Vec<Message> {
    let mut summary = None;
    let mut rest = Vec::with_capacity(messages.len() + 2);

    for msg in messages {
        if msg.is_system() {
            if let Some(found) = codec::extract_summary(msg.text()) {
                summary = Some(found);
            }
        } else {
            rest.push(msg);
        }
    }

    let system_text = match summary {
        Some(summary) => codec::merge_summary(Some(system_prompt), &summary),
        None => system_prompt.to_string(),
    };

    let mut result = Vec::with_capacity(rest.len() + 1);
    result.push(Message::system(system_text));
    result.extend(rest);
    result
}

/// (role, content) pair for the chat model; tool traffic is not replayed.
fn chat_pair(msg: &Message) -> Option<(String, String)> {
    match msg.role() {
        MessageRole::System | MessageRole::User | MessageRole::Assistant => {
            Some((msg.role().as_str().to_string(), msg.text().to_string()))
        }
        MessageRole::ToolCall | MessageRole::ToolResult => None,
    }
}

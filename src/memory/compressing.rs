//! Compression-aware chat memory store.
//!
//! [`CompressingMemoryStore`] sits in front of a plain [`ChatMemoryStore`] and
//! decides on every write whether to store the submitted history as-is or to
//! replace it with a single System message carrying an LLM-written summary.
//!
//! # Write decision
//!
//! Evaluated in order, first match wins:
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | empty list | nothing written |
//! | last message is an assistant reply with a pending tool call | stored as-is |
//! | last message is System or ToolResult | stored as-is |
//! | `len <= threshold` | stored as-is |
//! | otherwise | compressed |
//!
//! # Lost updates
//!
//! Callers may delete a session and resubmit a history that lacks the System
//! message carrying the summary. The latest summary of every session is kept
//! in a [`SummaryCache`] that survives deletes, and is fed back into the next
//! compression prompt when the submitted history carries none. Summaries seen
//! in histories stored as-is refresh the cache too.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::memory::cache::{CacheStats, CachedSummary, SummaryCache};
use crate::memory::codec;
use crate::memory::locks::SessionLocks;
use crate::memory::store::{ChatMemoryStore, InMemoryChatMemoryStore};
use crate::memory::summarizer::Summarizer;
use crate::types::{AppError, Message, MessageRole, Result};

/// Default number of messages a session may hold before it is compressed.
pub const DEFAULT_COMPRESSION_THRESHOLD: usize = 5;

/// Default upper bound for a single summarizer call.
pub const DEFAULT_SUMMARIZER_TIMEOUT: Duration = Duration::from_secs(60);

/// Instruction header of every compression prompt.
pub const SUMMARY_INSTRUCTION: &str =
    "Summarize the following dialogue into a brief summary, preserving context and tone:\n\n";

/// Tunables read once at construction
#[derive(Debug, Clone)]
pub struct CompressionConfig {
    /// Histories longer than this are compressed
    pub threshold: usize,
    /// How long a summarizer call may hold the session before the write fails
    pub summarizer_timeout: Duration,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_COMPRESSION_THRESHOLD,
            summarizer_timeout: DEFAULT_SUMMARIZER_TIMEOUT,
        }
    }
}

/// Why a history was stored without compression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassthroughReason {
    /// The assistant is waiting on a tool result
    PendingToolCall,
    /// The turn ended on a System or ToolResult message
    SystemOrToolResultTail,
    /// Not enough messages to be worth summarizing
    UnderThreshold,
}

/// Outcome of inspecting a submitted history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDecision {
    /// Nothing submitted; leave the session untouched
    Ignore,
    /// Store the history unchanged
    Passthrough(PassthroughReason),
    /// Replace the history with a summary
    Compress,
}

/// Decide what a write of `messages` should do.
pub fn decide(messages: &[Message], threshold: usize) -> WriteDecision {
    let Some(last) = messages.last() else {
        return WriteDecision::Ignore;
    };

    match last.role() {
        MessageRole::Assistant if last.has_pending_tool_call() => {
            return WriteDecision::Passthrough(PassthroughReason::PendingToolCall);
        }
        MessageRole::System | MessageRole::ToolResult => {
            return WriteDecision::Passthrough(PassthroughReason::SystemOrToolResultTail);
        }
        MessageRole::User | MessageRole::Assistant | MessageRole::ToolCall => {}
    }

    if messages.len() <= threshold {
        WriteDecision::Passthrough(PassthroughReason::UnderThreshold)
    } else {
        WriteDecision::Compress
    }
}

/// One line of a compression prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptLine<'a> {
    /// A previous summary
    Context(String),
    User(&'a str),
    Assistant(&'a str),
}

impl PromptLine<'_> {
    fn tag(&self) -> &'static str {
        match self {
            PromptLine::Context(_) => "Context",
            PromptLine::User(_) => "User",
            PromptLine::Assistant(_) => "Assistant",
        }
    }

    fn text(&self) -> &str {
        match self {
            PromptLine::Context(text) => text,
            PromptLine::User(text) | PromptLine::Assistant(text) => text,
        }
    }
}

/// Select the parts of `messages` that go into a compression prompt.
///
/// System messages contribute their summary payload only; System messages
/// without one are dropped. Tool traffic is skipped. The returned flag tells
/// whether any System message carried a summary.
pub fn prompt_lines(messages: &[Message]) -> (Vec<PromptLine<'_>>, bool) {
    let mut lines = Vec::with_capacity(messages.len());
    let mut carried_summary = false;

    for msg in messages {
        match msg.role() {
            MessageRole::System => {
                if let Some(summary) = codec::extract_summary(msg.text()) {
                    carried_summary = true;
                    lines.push(PromptLine::Context(summary));
                } else if codec::contains_marker(msg.text()) {
                    warn!("Ignoring summary block without payload");
                }
            }
            MessageRole::User => lines.push(PromptLine::User(msg.text())),
            MessageRole::Assistant => lines.push(PromptLine::Assistant(msg.text())),
            MessageRole::ToolCall | MessageRole::ToolResult => {
                debug!(role = ?msg.role(), "Skipping message in compression prompt");
            }
        }
    }

    (lines, carried_summary)
}

/// Payload of the last System message that carries a summary.
fn stored_summary(messages: &[Message]) -> Option<String> {
    messages
        .iter()
        .rev()
        .filter(|m| m.is_system())
        .find_map(|m| codec::extract_summary(m.text()))
}

/// Render the prompt handed to the summarizer.
pub fn build_prompt(lines: &[PromptLine<'_>]) -> String {
    let mut prompt = String::from(SUMMARY_INSTRUCTION);
    for line in lines {
        prompt.push_str(line.tag());
        prompt.push_str(": ");
        prompt.push_str(line.text());
        prompt.push('\n');
    }
    prompt
}

/// Chat memory store that compresses long histories into a summary.
pub struct CompressingMemoryStore {
    delegate: Arc<dyn ChatMemoryStore>,
    summarizer: Arc<dyn Summarizer>,
    cache: SummaryCache,
    locks: SessionLocks,
    config: CompressionConfig,
}

impl CompressingMemoryStore {
    pub fn new(
        delegate: Arc<dyn ChatMemoryStore>,
        summarizer: Arc<dyn Summarizer>,
        config: CompressionConfig,
    ) -> Self {
        Self {
            delegate,
            summarizer,
            cache: SummaryCache::new(),
            locks: SessionLocks::new(),
            config,
        }
    }

    /// Compressing store over a fresh in-process store
    pub fn in_memory(summarizer: Arc<dyn Summarizer>, config: CompressionConfig) -> Self {
        Self::new(
            Arc::new(InMemoryChatMemoryStore::new()),
            summarizer,
            config,
        )
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Latest summary known for a session, including after it was deleted
    pub fn cached_summary(&self, session_id: &str) -> Option<CachedSummary> {
        self.cache.entry(session_id)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    async fn compress(&self, session_id: &str, messages: Vec<Message>) -> Result<()> {
        info!(
            session_id,
            message_count = messages.len(),
            "Triggering semantic compression"
        );

        let (mut lines, carried_summary) = prompt_lines(&messages);
        if !carried_summary && let Some(cached) = self.cache.get(session_id) {
            info!(session_id, "Restoring cached summary missing from submitted history");
            lines.insert(0, PromptLine::Context(cached));
        }
        let prompt = build_prompt(&lines);

        let summary = tokio::time::timeout(
            self.config.summarizer_timeout,
            self.summarizer.summarize(&prompt),
        )
        .await
        .map_err(|_| {
            AppError::Timeout(format!(
                "Summarizer did not respond within {:?} for session {}",
                self.config.summarizer_timeout, session_id
            ))
        })??;

        let Some(summary) = codec::clean_summary(&summary) else {
            return Err(AppError::LLM(format!(
                "Summarizer returned an empty summary for session {}",
                session_id
            )));
        };

        let existing = messages
            .iter()
            .rev()
            .find(|m| m.is_system())
            .map(Message::text);
        let system_msg = Message::system(codec::merge_summary(existing, &summary));
        debug!(session_id, text = system_msg.text(), "Generated summary message");

        self.delegate
            .update_messages(session_id, vec![system_msg])
            .await?;
        self.cache.set(session_id, &summary);

        info!(session_id, "Compressed session history into a summary");
        Ok(())
    }
}

#[async_trait]
impl ChatMemoryStore for CompressingMemoryStore {
    async fn get_messages(&self, session_id: &str) -> Result<Vec<Message>> {
        let messages = self.delegate.get_messages(session_id).await?;
        debug!(session_id, message_count = messages.len(), "Read session messages");
        Ok(messages)
    }

    async fn update_messages(&self, session_id: &str, messages: Vec<Message>) -> Result<()> {
        let _guard = self.locks.acquire(session_id).await;

        match decide(&messages, self.config.threshold) {
            WriteDecision::Ignore => {
                warn!(session_id, "No messages to store, ignoring write");
                Ok(())
            }
            WriteDecision::Passthrough(reason) => {
                debug!(
                    session_id,
                    message_count = messages.len(),
                    ?reason,
                    "Storing messages without compression"
                );
                let carried = stored_summary(&messages);
                self.delegate.update_messages(session_id, messages).await?;
                if let Some(summary) = carried {
                    debug!(session_id, "Caching summary carried by stored history");
                    self.cache.set(session_id, &summary);
                }
                Ok(())
            }
            WriteDecision::Compress => self.compress(session_id, messages).await,
        }
    }

    async fn delete_messages(&self, session_id: &str) -> Result<()> {
        let _guard = self.locks.acquire(session_id).await;

        let current = self.delegate.get_messages(session_id).await?;
        if let Some(summary) = stored_summary(&current) {
            debug!(session_id, "Caching summary before delete");
            self.cache.set(session_id, &summary);
        }

        info!(
            session_id,
            message_count = current.len(),
            "Deleting session messages"
        );
        self.delegate.delete_messages(session_id).await
    }
}

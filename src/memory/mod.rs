//! Conversation memory with summary-based compression.
//!
//! This module provides:
//! - [`ChatMemoryStore`] - the keyed, replace-on-write storage contract
//! - [`CompressingMemoryStore`] - a store that folds long histories into a
//!   single System message carrying an LLM-written summary
//! - [`codec`] - the marker format of that summary block
//! - [`SummaryCache`] - the last known summary per session, kept across deletes
//!
//! # Example
//!
//! ```ignore
//! use recall::memory::{CompressingMemoryStore, CompressionConfig, LlmSummarizer, ChatMemoryStore};
//!
//! let summarizer = Arc::new(LlmSummarizer::new(llm));
//! let store = CompressingMemoryStore::in_memory(summarizer, CompressionConfig::default());
//!
//! store.update_messages("session-1", history).await?;
//! let messages = store.get_messages("session-1").await?;
//! ```

pub mod cache;
pub mod codec;
pub mod compressing;
pub mod locks;
pub mod store;
pub mod summarizer;

pub use cache::{CacheStats, CachedSummary, SummaryCache};
pub use compressing::{
    CompressingMemoryStore, CompressionConfig, DEFAULT_COMPRESSION_THRESHOLD,
    DEFAULT_SUMMARIZER_TIMEOUT, PassthroughReason, WriteDecision,
};
pub use locks::{SessionGuard, SessionLocks};
pub use store::{ChatMemoryStore, InMemoryChatMemoryStore};
pub use summarizer::{LlmSummarizer, Summarizer};

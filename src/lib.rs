//! # Recall - compressed conversation memory for chat agents
//!
//! Recall keeps a chat agent's context bounded by replacing long histories
//! with a single System message that carries an LLM-written summary, while
//! defending that summary against callers that clear and rewrite sessions
//! between turns.
//!
//! Recall can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `recall-server` binary
//! 2. **As a library** - Put [`CompressingMemoryStore`] in front of your own
//!    [`ChatMemoryStore`]
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use recall::memory::{ChatMemoryStore, CompressingMemoryStore, CompressionConfig, LlmSummarizer};
//! use recall::{Message, Provider};
//! use std::sync::Arc;
//!
//! let llm = Provider::Ollama {
//!     base_url: "http://localhost:11434".to_string(),
//!     model: "llama3.2".to_string(),
//! }
//! .create_client()
//! .await?;
//!
//! let store = CompressingMemoryStore::in_memory(
//!     Arc::new(LlmSummarizer::new(Arc::from(llm))),
//!     CompressionConfig::default(),
//! );
//! store.update_messages("session-1", vec![Message::user("Hi!")]).await?;
//! ```
//!
//! ## Modules
//!
//! - [`memory`] - Compression engine, summary codec, reconciliation cache
//! - [`llm`] - LLM client implementations
//! - [`agents`] - The chat assistant
//! - [`api`] - REST API handlers and routes
//! - [`utils`] - TOML configuration
//! - [`types`] - Messages and error handling
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ollama` | Ollama local inference (default) |

#![warn(rustdoc::missing_crate_level_docs)]

/// The chat assistant that drives the memory store.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Conversation memory and summary-based compression.
pub mod memory;
/// Core types (messages, requests, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::Assistant;
pub use llm::{LLMClient, Provider};
pub use memory::{ChatMemoryStore, CompressingMemoryStore, CompressionConfig};
pub use types::{AppError, Message, MessageRole, Result};
pub use utils::toml_config::{ConfigError, RecallConfig};

use crate::memory::LlmSummarizer;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Configuration read at startup
    pub config: Arc<RecallConfig>,
    /// Compressing memory store
    pub memory: Arc<CompressingMemoryStore>,
    /// Chat assistant writing through `memory`
    pub assistant: Arc<Assistant>,
}

impl AppState {
    /// Wire the memory store and assistant around the given clients.
    pub fn new(
        config: RecallConfig,
        chat_llm: Arc<dyn LLMClient>,
        summarizer_llm: Arc<dyn LLMClient>,
    ) -> Self {
        let memory = Arc::new(CompressingMemoryStore::in_memory(
            Arc::new(LlmSummarizer::new(summarizer_llm)),
            config.memory.compression(),
        ));
        let assistant = Arc::new(Assistant::new(
            chat_llm,
            memory.clone(),
            config.assistant.system_prompt.clone(),
        ));

        Self {
            config: Arc::new(config),
            memory,
            assistant,
        }
    }

    /// Build the providers named in `config` and wire the state around them.
    pub async fn from_config(config: RecallConfig) -> anyhow::Result<Self> {
        let chat_llm: Arc<dyn LLMClient> =
            Arc::from(config.chat_provider()?.create_client().await?);
        let summarizer_llm: Arc<dyn LLMClient> =
            Arc::from(config.summarizer_provider()?.create_client().await?);

        Ok(Self::new(config, chat_llm, summarizer_llm))
    }
}

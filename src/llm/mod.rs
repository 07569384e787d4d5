//! LLM Provider Clients and Abstractions
//!
//! This module provides a unified interface for the language models Recall
//! uses: one for the per-turn chat reply and one (often the same) for
//! summarizing conversations.
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that all providers implement
//! - [`Provider`] - Runtime provider selection, builds clients
//!
//! # Supported Providers
//!
//! - `ollama` - Local Ollama server (Cargo feature, on by default)
//! - `openai` - Any OpenAI-compatible `/chat/completions` endpoint
//!
//! # Example
//!
//! ```ignore
//! use recall::llm::Provider;
//!
//! let client = provider.create_client().await?;
//!
//! let response = client.generate("What is 2+2?").await?;
//! ```

/// Core LLM client trait and provider selection.
pub mod client;

#[cfg(feature = "ollama")]
pub mod ollama;

pub mod openai;

pub use client::{LLMClient, Provider};

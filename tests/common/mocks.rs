//! Mock implementations for testing.
//!
//! This module provides mock LLM clients and summarizers that can be used
//! across different test files without duplication.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use recall::llm::LLMClient;
use recall::memory::Summarizer;
use recall::types::{AppError, Result};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock LLM client for testing with configurable responses.
///
/// Records every history it was asked to answer so tests can check what the
/// model actually saw.
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    histories: Arc<Mutex<Vec<Vec<(String, String)>>>>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            histories: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            should_fail: true,
            histories: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Histories passed to `generate_with_history`, oldest first.
    pub fn histories(&self) -> Vec<Vec<(String, String)>> {
        self.histories.lock().clone()
    }

    fn reply(&self) -> Result<String> {
        if self.should_fail {
            return Err(AppError::LLM("Mock LLM failure".to_string()));
        }
        Ok(self.response.clone())
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.reply()
    }

    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String> {
        self.histories.lock().push(messages.to_vec());
        self.reply()
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Summarizer that replays scripted summaries and records its prompts.
///
/// Once the script runs out the last summary is repeated.
#[derive(Default)]
pub struct RecordingSummarizer {
    script: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingSummarizer {
    pub fn new(summaries: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(summaries.iter().map(|s| s.to_string()).collect()),
            last: Mutex::new("summary".to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl Summarizer for RecordingSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        let mut last = self.last.lock();
        if let Some(next) = self.script.lock().pop_front() {
            *last = next;
        }
        Ok(last.clone())
    }
}

/// Summarizer whose backend is down.
pub struct FailingSummarizer;

#[async_trait]
impl Summarizer for FailingSummarizer {
    async fn summarize(&self, _prompt: &str) -> Result<String> {
        Err(AppError::LLM("summarizer backend unavailable".to_string()))
    }
}

/// Summarizer that takes `delay` per call and tracks how many calls overlap.
pub struct SlowSummarizer {
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl SlowSummarizer {
    pub fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }

    /// Highest number of calls that were running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for SlowSummarizer {
    async fn summarize(&self, _prompt: &str) -> Result<String> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok("slow summary".to_string())
    }
}

//! Reconciliation cache of the last known summary per session.
//!
//! Callers of the memory store are allowed to clear a session and resubmit a
//! truncated history that no longer contains the System message holding the
//! summary. The cache keeps the latest summary out of band so the next
//! compression can put it back into the prompt.
//!
//! Entries are only ever overwritten. Deleting a session does not clear them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Statistics for cache monitoring
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups that found a summary
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Number of sessions with a cached summary
    pub entry_count: usize,
}

/// A cached summary and when it was last written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedSummary {
    pub summary: String,
    pub updated_at: DateTime<Utc>,
}

/// Session key → last known summary payload.
#[derive(Debug, Default)]
pub struct SummaryCache {
    entries: RwLock<HashMap<String, CachedSummary>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the summary for a session, counting the hit or miss
    pub fn get(&self, session_id: &str) -> Option<String> {
        match self.entries.read().get(session_id) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.summary.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Full entry including its timestamp. Does not touch the counters.
    pub fn entry(&self, session_id: &str) -> Option<CachedSummary> {
        self.entries.read().get(session_id).cloned()
    }

    /// Record `summary` as the latest for `session_id`.
    ///
    /// Blank summaries are ignored so a malformed block can never shadow a
    /// good one.
    pub fn set(&self, session_id: &str, summary: &str) {
        let summary = summary.trim();
        if summary.is_empty() {
            return;
        }

        self.entries.write().insert(
            session_id.to_string(),
            CachedSummary {
                summary: summary.to_string(),
                updated_at: Utc::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: self.len(),
        }
    }
}

//! Per-session serialization.
//!
//! Each session key maps to its own async mutex, so a compression (read,
//! summarize, replace) on one session is atomic with respect to other writers
//! of that session while other sessions proceed untouched.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

/// Registry of per-session locks.
///
/// Entries are created on demand and dropped again once no task holds or is
/// waiting for them.
#[derive(Debug, Default, Clone)]
pub struct SessionLocks {
    locks: LockMap,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `session_id`
    pub async fn acquire(&self, session_id: &str) -> SessionGuard {
        // Clone under the registry lock so `release` can trust the strong count
        let lock = {
            let mut locks = self.locks.lock();
            Arc::clone(
                locks
                    .entry(session_id.to_string())
                    .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
            )
        };

        let guard = lock.lock_owned().await;

        SessionGuard {
            session_id: session_id.to_string(),
            locks: Arc::clone(&self.locks),
            guard: Some(guard),
        }
    }

    /// Number of sessions with a live lock entry
    pub fn active(&self) -> usize {
        self.locks.lock().len()
    }
}

/// Exclusive access to one session; released on drop.
#[derive(Debug)]
pub struct SessionGuard {
    session_id: String,
    locks: LockMap,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let mut locks = self.locks.lock();
        self.guard.take();

        // Only the registry holds it now: nobody is waiting
        if let Some(lock) = locks.get(&self.session_id)
            && Arc::strong_count(lock) == 1
        {
            locks.remove(&self.session_id);
        }
    }
}

//! Registry of pending simulated-transition timers.
//!
//! Each uploaded dataset and each new deployment schedules one delayed
//! status flip. Timers are keyed by entity id so a delete can cancel
//! the pending flip — a deleted entity must never be resurrected by a
//! late timer. Clearing the layer (identity loss) aborts everything.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

/// Pending transition tasks, keyed by entity id.
#[derive(Default)]
pub struct TimerRegistry {
    inner: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl TimerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks a scheduled transition. An existing timer under the same
    /// id is aborted and replaced.
    pub fn register(&self, id: &str, handle: JoinHandle<()>) {
        if let Some(previous) = self.lock().insert(id.to_string(), handle) {
            previous.abort();
        }
    }

    /// Aborts and forgets the timer for an entity, if one is pending.
    /// Returns true when a timer was cancelled.
    pub fn cancel(&self, id: &str) -> bool {
        match self.lock().remove(id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Forgets a timer that ran to completion.
    pub fn complete(&self, id: &str) {
        self.lock().remove(id);
    }

    /// Aborts every pending timer.
    pub fn cancel_all(&self) {
        for (_, handle) in self.lock().drain() {
            handle.abort();
        }
    }

    /// Number of timers currently tracked.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, JoinHandle<()>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

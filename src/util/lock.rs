//! Keyed async locks for per-user and per-clan write serialization.
//!
//! Concurrent declarations for the same user must not both pass the overlap
//! check, and reconciliation passes for the same clan must not interleave.
//! Both are serialized by taking an async mutex keyed by the user or clan id
//! before entering the critical section; different keys proceed concurrently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;

/// Registry of async mutexes keyed by string id.
///
/// Cheap to clone: clones share the same underlying registry. Lock entries are
/// created on first use and live for the lifetime of the registry; the key
/// space (users and clans seen by this process) is small enough that entries
/// are never reclaimed.
#[derive(Clone, Default)]
pub struct KeyedLocks {
    inner: Arc<StdMutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl KeyedLocks {
    /// Creates an empty lock registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mutex for the given key, creating it on first use.
    ///
    /// Callers hold the returned `Arc` and `.lock().await` it for the duration
    /// of their critical section:
    ///
    /// ```rust,ignore
    /// let lock = locks.get(&discord_id.to_string());
    /// let _guard = lock.lock().await;
    /// // critical section
    /// ```
    pub fn get(&self, key: &str) -> Arc<Mutex<()>> {
        let mut registry = match self.inner.lock() {
            Ok(guard) => guard,
            // A poisoned registry only means another thread panicked while
            // inserting; the map itself is still usable.
            Err(poisoned) => poisoned.into_inner(),
        };

        registry
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

//! Per-session serialization.
//!
//! `MakeChoice` and its siblings read-modify-write the whole session
//! aggregate; two interleaved writers would silently drop a choice or an
//! achievement. Each session id gets its own async mutex so operations on
//! one session queue up while different sessions proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex;
use uuid::Uuid;

/// Registry of one async mutex per live session id.
#[derive(Debug, Default)]
pub(crate) struct SessionLocks {
    inner: StdMutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the mutex for a session id, creating it on first use.
    ///
    /// The returned handle stays valid even if the entry is dropped
    /// concurrently; `forget` only prevents the map from growing without
    /// bound.
    pub(crate) fn lock_for(&self, session_id: Uuid) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().expect("session lock registry poisoned");
        Arc::clone(map.entry(session_id).or_default())
    }

    /// Drops the registry entry for a deleted session.
    pub(crate) fn forget(&self, session_id: Uuid) {
        let mut map = self.inner.lock().expect("session lock registry poisoned");
        map.remove(&session_id);
    }
}

//! Test session stores — `SessionStore` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;
use wondertale_core::error::EngineError;
use wondertale_session::application::ports::SessionStore;
use wondertale_session::domain::session::GameSession;

/// A session store backed by an in-memory map. This is the reference
/// implementation of the persistence contract: plain get/save/delete with
/// whole-aggregate snapshots.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<Uuid, GameSession>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently stored.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Returns true if no sessions are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: Uuid) -> Result<Option<GameSession>, EngineError> {
        Ok(self.sessions.lock().unwrap().get(&session_id).cloned())
    }

    async fn save(&self, session: &GameSession) -> Result<(), EngineError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id, session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> Result<bool, EngineError> {
        Ok(self.sessions.lock().unwrap().remove(&session_id).is_some())
    }
}

/// A session store that always fails with a storage error, for testing
/// pass-through of persistence failures.
#[derive(Debug)]
pub struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn get(&self, _session_id: Uuid) -> Result<Option<GameSession>, EngineError> {
        Err(EngineError::Storage("connection refused".into()))
    }

    async fn save(&self, _session: &GameSession) -> Result<(), EngineError> {
        Err(EngineError::Storage("connection refused".into()))
    }

    async fn delete(&self, _session_id: Uuid) -> Result<bool, EngineError> {
        Err(EngineError::Storage("connection refused".into()))
    }
}

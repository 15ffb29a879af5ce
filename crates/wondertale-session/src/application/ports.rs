//! Session persistence port.

use async_trait::async_trait;
use uuid::Uuid;
use wondertale_core::error::EngineError;

use crate::domain::session::GameSession;

/// Whole-aggregate persistence for game sessions.
///
/// The engine guarantees at most one in-flight mutation per session id, so
/// implementations only need plain get/save/delete semantics — no
/// optimistic concurrency. I/O failures surface as
/// [`EngineError::Storage`] and are the caller's to retry or report.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads a session by id, or `None` if unknown.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the backing store fails.
    async fn get(&self, session_id: Uuid) -> Result<Option<GameSession>, EngineError>;

    /// Persists a session, overwriting any previous state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the backing store fails.
    async fn save(&self, session: &GameSession) -> Result<(), EngineError>;

    /// Removes a session. Returns true if a session was removed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the backing store fails.
    async fn delete(&self, session_id: Uuid) -> Result<bool, EngineError>;
}

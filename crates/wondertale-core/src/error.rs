//! Engine error taxonomy.

use thiserror::Error;
use uuid::Uuid;

use crate::age::AgeGroup;

/// Top-level error type for the session engine.
///
/// Every variant is terminal for the triggering call; nothing is retried
/// internally. `Storage` wraps failures from the persistence port and passes
/// them through unchanged.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No scenario exists with the given identifier.
    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    /// No session exists with the given identifier.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// The scene is not part of the session's scenario.
    #[error("scene {scene_id} not found in scenario {scenario_id}")]
    SceneNotFound {
        /// The scenario that was searched.
        scenario_id: String,
        /// The scene that was requested.
        scene_id: String,
    },

    /// No branch on the scene matches the supplied choice text.
    #[error("no branch on scene {scene_id} matches choice {choice_text:?}")]
    InvalidChoice {
        /// The scene whose branches were searched.
        scene_id: String,
        /// The choice text that failed to match.
        choice_text: String,
    },

    /// The operation is not permitted in the session's current state.
    #[error("invalid session state: {0}")]
    InvalidState(String),

    /// The scenario's minimum age exceeds the requested target age group.
    #[error("scenario requires age group {minimum:?} or above, requested {requested:?}")]
    AgeIncompatible {
        /// The scenario's minimum age group.
        minimum: AgeGroup,
        /// The age group requested at session start.
        requested: AgeGroup,
    },

    /// A persistence-layer failure, passed through for the caller to handle.
    #[error("storage error: {0}")]
    Storage(String),
}

//! Read-only session statistics view.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::achievements::SessionAchievement;
use crate::domain::session::{EchoEntry, GameSession, SessionStatus};

/// How many recent echoes the stats view surfaces.
const RECENT_ECHO_LIMIT: usize = 5;

/// Snapshot of a session for progress screens and parent dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    /// The session this snapshot describes.
    pub session_id: Uuid,
    /// Lifecycle state at snapshot time.
    pub status: SessionStatus,
    /// Current value per tracked axis.
    pub compass_values: HashMap<String, f64>,
    /// The last five echoes, most recent first.
    pub recent_echoes: Vec<EchoEntry>,
    /// Everything earned so far.
    pub achievements: Vec<SessionAchievement>,
    /// How many choices have been made.
    pub choice_count: usize,
    /// Wall-clock seconds played.
    pub duration_seconds: i64,
}

impl SessionStats {
    /// Builds the snapshot from a session aggregate.
    #[must_use]
    pub fn from_session(session: &GameSession) -> Self {
        let compass_values = session
            .compass
            .iter()
            .map(|(axis, tracker)| (axis.clone(), tracker.value))
            .collect();

        let recent_echoes = session
            .echoes
            .iter()
            .rev()
            .take(RECENT_ECHO_LIMIT)
            .cloned()
            .collect();

        Self {
            session_id: session.id,
            status: session.status,
            compass_values,
            recent_echoes,
            achievements: session.achievements.clone(),
            choice_count: session.choices.len(),
            duration_seconds: session.elapsed_seconds,
        }
    }
}

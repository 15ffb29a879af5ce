//! The game-session aggregate.
//!
//! A `GameSession` is created by the engine's start operation and mutated
//! only through the engine's own operations; the persistence port stores
//! and returns it whole. State-machine preconditions live here, on the
//! aggregate, so no caller can drive an invalid transition.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wondertale_core::age::AgeGroup;
use wondertale_core::error::EngineError;
use wondertale_scenario::{Branch, CompassChange, EchoKind, EchoLog, Scenario, Scene};

use super::achievements::SessionAchievement;
use super::compass::{CompassIgnoreReason, CompassOutcome, CompassTracking};

/// Lifecycle state of a session. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// The session is live and accepting choices.
    InProgress,
    /// The session is paused; only `Resume` and `End` move it on.
    Paused,
    /// The story ended. No further transitions exist.
    Completed,
}

/// An echo recorded into the session's history when a branch was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoEntry {
    /// The callback flavor.
    pub kind: EchoKind,
    /// Human-readable description.
    pub description: String,
    /// Resurface strength, copied from the authored echo.
    pub strength: f64,
    /// When the branch carrying this echo was taken.
    pub recorded_at: DateTime<Utc>,
}

impl EchoEntry {
    /// Copies an authored echo into a history entry with a fresh timestamp.
    #[must_use]
    pub fn from_log(echo: &EchoLog, now: DateTime<Utc>) -> Self {
        Self {
            kind: echo.kind,
            description: echo.description.clone(),
            strength: echo.strength,
            recorded_at: now,
        }
    }
}

/// One resolved choice in the session's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionChoice {
    /// The scene the choice was made on.
    pub scene_id: String,
    /// That scene's title at the time of the choice.
    pub scene_title: String,
    /// Stable id of the branch that matched.
    pub branch_id: String,
    /// The label the player picked.
    pub choice_text: String,
    /// The scene the choice led to.
    pub next_scene_id: String,
    /// When the choice was made.
    pub chosen_at: DateTime<Utc>,
    /// Copy of the branch's echo, if it carried one.
    pub echo: Option<EchoLog>,
    /// Copy of the branch's compass change, if it carried one.
    pub compass_change: Option<CompassChange>,
}

/// The aggregate root for one play-through of a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Session identifier.
    pub id: Uuid,
    /// The scenario being played.
    pub scenario_id: String,
    /// Where the player currently is. Once `Completed` this may be a
    /// terminal sentinel rather than a scene id.
    pub current_scene_id: String,
    /// Lifecycle state.
    pub status: SessionStatus,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// When the session completed, if it has.
    pub ended_at: Option<DateTime<Utc>>,
    /// Wall-clock seconds since start, recomputed on choice and end.
    pub elapsed_seconds: i64,
    /// When the session was paused, while `Paused`.
    pub paused_at: Option<DateTime<Utc>>,
    /// The grown-up running the session.
    pub dm_name: String,
    /// The players at the table.
    pub player_names: Vec<String>,
    /// One tracker per axis the scenario declares.
    pub compass: HashMap<String, CompassTracking>,
    /// Choice history, append-only.
    pub choices: Vec<SessionChoice>,
    /// Echo history, append-only.
    pub echoes: Vec<EchoEntry>,
    /// Earned achievements, unique by id.
    pub achievements: Vec<SessionAchievement>,
    /// The character the player picked, if any.
    pub character_id: Option<String>,
}

impl GameSession {
    /// Starts a new session against a scenario.
    ///
    /// Initializes one compass tracker at 0.0 per declared axis and places
    /// the player at the scenario's first scene.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AgeIncompatible`] if the scenario's minimum
    /// age exceeds the target group, and [`EngineError::ScenarioNotFound`]
    /// for a scene-less graph (an empty scenario is as good as absent;
    /// authoring validation rejects them before publication).
    pub fn start(
        id: Uuid,
        scenario: &Scenario,
        target_age_group: AgeGroup,
        dm_name: &str,
        player_names: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, EngineError> {
        if !scenario.minimum_age.admits(target_age_group) {
            return Err(EngineError::AgeIncompatible {
                minimum: scenario.minimum_age,
                requested: target_age_group,
            });
        }

        let first_scene = scenario
            .first_scene()
            .ok_or_else(|| EngineError::ScenarioNotFound(scenario.id.clone()))?;

        let compass = scenario
            .compass_axes
            .iter()
            .map(|axis| (axis.clone(), CompassTracking::new(axis.clone(), now)))
            .collect();

        Ok(Self {
            id,
            scenario_id: scenario.id.clone(),
            current_scene_id: first_scene.id.clone(),
            status: SessionStatus::InProgress,
            started_at: now,
            ended_at: None,
            elapsed_seconds: 0,
            paused_at: None,
            dm_name: dm_name.to_owned(),
            player_names,
            compass,
            choices: Vec::new(),
            echoes: Vec::new(),
            achievements: Vec::new(),
            character_id: None,
        })
    }

    pub(crate) fn ensure_in_progress(&self, operation: &str) -> Result<(), EngineError> {
        if self.status == SessionStatus::InProgress {
            Ok(())
        } else {
            Err(EngineError::InvalidState(format!(
                "cannot {operation} while session {} is {:?}",
                self.id, self.status
            )))
        }
    }

    /// Pauses a running session.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidState`] unless the session is
    /// `InProgress`; state is left unchanged on failure.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), EngineError> {
        self.ensure_in_progress("pause")?;
        self.status = SessionStatus::Paused;
        self.paused_at = Some(now);
        Ok(())
    }

    /// Resumes a paused session.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidState`] unless the session is
    /// `Paused`; state is left unchanged on failure.
    pub fn resume(&mut self) -> Result<(), EngineError> {
        if self.status != SessionStatus::Paused {
            return Err(EngineError::InvalidState(format!(
                "cannot resume while session {} is {:?}",
                self.id, self.status
            )));
        }
        self.status = SessionStatus::InProgress;
        self.paused_at = None;
        Ok(())
    }

    /// Ends the session, stamping the end time and final elapsed duration.
    ///
    /// A session completes exactly once: ending an already-`Completed`
    /// session is a no-op.
    pub fn end(&mut self, now: DateTime<Utc>) {
        if self.status == SessionStatus::Completed {
            return;
        }
        self.status = SessionStatus::Completed;
        self.paused_at = None;
        self.ended_at = Some(now);
        self.recompute_elapsed(now);
    }

    /// Moves the player to a scene directly, for narrative advancement
    /// outside a choice point.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidState`] unless the session is
    /// `InProgress`.
    pub fn progress_to(&mut self, scene_id: &str) -> Result<(), EngineError> {
        self.ensure_in_progress("progress")?;
        self.current_scene_id = scene_id.to_owned();
        Ok(())
    }

    /// Sets the selected character. Allowed in any state.
    pub fn select_character(&mut self, character_id: &str) {
        self.character_id = Some(character_id.to_owned());
    }

    /// Records a resolved choice: appends the choice and any echo to
    /// history, routes any compass change to the tracker, and moves the
    /// player to the caller-asserted next scene.
    ///
    /// Returns the compass outcome if the branch carried a change.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidState`] unless the session is
    /// `InProgress`; a completed session records no further choices.
    pub fn take_branch(
        &mut self,
        scene: &Scene,
        branch: &Branch,
        next_scene_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<CompassOutcome>, EngineError> {
        self.ensure_in_progress("make a choice")?;

        self.choices.push(SessionChoice {
            scene_id: scene.id.clone(),
            scene_title: scene.title.clone(),
            branch_id: branch.id.clone(),
            choice_text: branch.choice_text.clone(),
            next_scene_id: next_scene_id.to_owned(),
            chosen_at: now,
            echo: branch.echo.clone(),
            compass_change: branch.compass_change.clone(),
        });

        if let Some(echo) = &branch.echo {
            self.echoes.push(EchoEntry::from_log(echo, now));
        }

        let outcome = branch
            .compass_change
            .as_ref()
            .map(|change| self.apply_compass_change(change, now));

        self.current_scene_id = next_scene_id.to_owned();
        self.recompute_elapsed(now);

        Ok(outcome)
    }

    /// Routes a compass change to the matching tracker.
    ///
    /// A change naming an axis this session does not track is dropped
    /// without error and reported as `Ignored`.
    pub fn apply_compass_change(
        &mut self,
        change: &CompassChange,
        now: DateTime<Utc>,
    ) -> CompassOutcome {
        match self.compass.get_mut(&change.axis) {
            Some(tracker) => CompassOutcome::Applied {
                axis: change.axis.clone(),
                value: tracker.apply(change.delta, now),
            },
            None => CompassOutcome::Ignored {
                axis: change.axis.clone(),
                reason: CompassIgnoreReason::UnknownAxis,
            },
        }
    }

    /// Returns true if an achievement with this id is already on the session.
    #[must_use]
    pub fn has_achievement(&self, achievement_id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == achievement_id)
    }

    /// Merges achievements whose id is not yet present. Returns how many
    /// were added.
    pub fn merge_achievements(&mut self, earned: Vec<SessionAchievement>) -> usize {
        let mut added = 0;
        for achievement in earned {
            if !self.has_achievement(&achievement.id) {
                self.achievements.push(achievement);
                added += 1;
            }
        }
        added
    }

    fn recompute_elapsed(&mut self, now: DateTime<Utc>) {
        self.elapsed_seconds = (now - self.started_at).num_seconds();
    }
}

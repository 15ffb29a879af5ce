//! The session engine.
//!
//! One public operation per lifecycle transition, each running to
//! completion against a single session: load, apply domain logic, save.
//! The only suspension points are the two ports. Operations on the same
//! session id are serialized through the per-session lock registry;
//! different sessions never contend.

use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;
use wondertale_core::age::AgeGroup;
use wondertale_core::clock::Clock;
use wondertale_core::error::EngineError;
use wondertale_scenario::{Scenario, ScenarioProvider};

use crate::domain::achievements::{self, AchievementConfig};
use crate::domain::compass::CompassOutcome;
use crate::domain::session::GameSession;

use super::locks::SessionLocks;
use super::ports::SessionStore;
use super::stats::SessionStats;

/// Orchestrates session lifecycle, choice resolution, compass tracking,
/// and achievement evaluation against the scenario and persistence ports.
pub struct SessionEngine {
    scenarios: Arc<dyn ScenarioProvider>,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    achievement_config: AchievementConfig,
    locks: SessionLocks,
}

impl SessionEngine {
    /// Creates an engine with the default achievement configuration.
    #[must_use]
    pub fn new(
        scenarios: Arc<dyn ScenarioProvider>,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            scenarios,
            store,
            clock,
            achievement_config: AchievementConfig::default(),
            locks: SessionLocks::new(),
        }
    }

    /// Replaces the achievement configuration, e.g. with per-axis
    /// thresholds from the badge-configuration service.
    #[must_use]
    pub fn with_achievement_config(mut self, config: AchievementConfig) -> Self {
        self.achievement_config = config;
        self
    }

    async fn resolve_scenario(&self, scenario_id: &str) -> Result<Arc<Scenario>, EngineError> {
        self.scenarios
            .scenario_by_id(scenario_id)
            .await?
            .ok_or_else(|| EngineError::ScenarioNotFound(scenario_id.to_owned()))
    }

    async fn load(&self, session_id: Uuid) -> Result<GameSession, EngineError> {
        self.store
            .get(session_id)
            .await?
            .ok_or(EngineError::SessionNotFound(session_id))
    }

    /// Starts a new session against a scenario.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ScenarioNotFound`] if the scenario is
    /// unknown, [`EngineError::AgeIncompatible`] if the target audience is
    /// younger than the scenario allows, or [`EngineError::Storage`] from
    /// the ports.
    #[instrument(skip(self, player_names), fields(scenario_id = %scenario_id))]
    pub async fn start_session(
        &self,
        scenario_id: &str,
        target_age_group: AgeGroup,
        dm_name: &str,
        player_names: Vec<String>,
    ) -> Result<GameSession, EngineError> {
        let scenario = self.resolve_scenario(scenario_id).await?;
        let session = GameSession::start(
            Uuid::new_v4(),
            &scenario,
            target_age_group,
            dm_name,
            player_names,
            self.clock.now(),
        )?;
        self.store.save(&session).await?;

        info!(session_id = %session.id, "session started");
        Ok(session)
    }

    /// Resolves one player choice: records it, applies any echo and
    /// compass change, moves to the asserted next scene, completes the
    /// session if that scene is terminal, and evaluates achievements.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SessionNotFound`],
    /// [`EngineError::ScenarioNotFound`], or [`EngineError::SceneNotFound`]
    /// when resolution fails; [`EngineError::InvalidChoice`] when no branch
    /// matches the choice text; [`EngineError::InvalidState`] when the
    /// session is not `InProgress`; [`EngineError::Storage`] from the
    /// ports.
    #[instrument(skip(self), fields(session_id = %session_id, scene_id = %scene_id))]
    pub async fn make_choice(
        &self,
        session_id: Uuid,
        scene_id: &str,
        choice_text: &str,
        next_scene_id: &str,
    ) -> Result<GameSession, EngineError> {
        let lock = self.locks.lock_for(session_id);
        let _guard = lock.lock().await;

        let mut session = self.load(session_id).await?;
        session.ensure_in_progress("make a choice")?;

        let scenario = self.resolve_scenario(&session.scenario_id).await?;
        let scene = scenario
            .scene_by_id(scene_id)
            .ok_or_else(|| EngineError::SceneNotFound {
                scenario_id: scenario.id.clone(),
                scene_id: scene_id.to_owned(),
            })?;
        let branch = scene
            .branch_by_text(choice_text)
            .ok_or_else(|| EngineError::InvalidChoice {
                scene_id: scene_id.to_owned(),
                choice_text: choice_text.to_owned(),
            })?;

        let now = self.clock.now();
        let outcome = session.take_branch(scene, branch, next_scene_id, now)?;
        if let Some(CompassOutcome::Ignored { axis, .. }) = &outcome {
            debug!(axis = %axis, "compass change dropped: axis not tracked by session");
        }

        // A target that is absent from the graph (the terminal sentinels
        // included) or that has no outgoing branches ends the story. An
        // out-of-graph target from malformed content lands here too: the
        // graph was validated at authoring time, so mid-walk this is a
        // completion signal, not an error.
        let reached_terminal = scenario
            .scene_by_id(&session.current_scene_id)
            .is_none_or(|scene| scene.branches.is_empty());
        if reached_terminal {
            session.end(now);
            info!(session_id = %session.id, "session completed");
        }

        let earned = achievements::evaluate(&session, &self.achievement_config, now);
        let added = session.merge_achievements(earned);
        if added > 0 {
            info!(session_id = %session.id, count = added, "achievements earned");
        }

        self.store.save(&session).await?;
        Ok(session)
    }

    /// Pauses a running session.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SessionNotFound`],
    /// [`EngineError::InvalidState`] unless the session is `InProgress`,
    /// or [`EngineError::Storage`] from the ports.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn pause_session(&self, session_id: Uuid) -> Result<GameSession, EngineError> {
        let lock = self.locks.lock_for(session_id);
        let _guard = lock.lock().await;

        let mut session = self.load(session_id).await?;
        session.pause(self.clock.now())?;
        self.store.save(&session).await?;

        info!(session_id = %session.id, "session paused");
        Ok(session)
    }

    /// Resumes a paused session.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SessionNotFound`],
    /// [`EngineError::InvalidState`] unless the session is `Paused`, or
    /// [`EngineError::Storage`] from the ports.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn resume_session(&self, session_id: Uuid) -> Result<GameSession, EngineError> {
        let lock = self.locks.lock_for(session_id);
        let _guard = lock.lock().await;

        let mut session = self.load(session_id).await?;
        session.resume()?;
        self.store.save(&session).await?;

        info!(session_id = %session.id, "session resumed");
        Ok(session)
    }

    /// Ends a session, stamping the end time and final duration. Ending an
    /// already-completed session returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SessionNotFound`] or
    /// [`EngineError::Storage`] from the ports.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn end_session(&self, session_id: Uuid) -> Result<GameSession, EngineError> {
        let lock = self.locks.lock_for(session_id);
        let _guard = lock.lock().await;

        let mut session = self.load(session_id).await?;
        let now = self.clock.now();
        session.end(now);

        let earned = achievements::evaluate(&session, &self.achievement_config, now);
        session.merge_achievements(earned);

        self.store.save(&session).await?;

        info!(session_id = %session.id, "session ended");
        Ok(session)
    }

    /// Moves a session to a scene directly, for narrative advancement
    /// outside a choice point.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SessionNotFound`],
    /// [`EngineError::ScenarioNotFound`], or [`EngineError::SceneNotFound`]
    /// when resolution fails; [`EngineError::InvalidState`] unless the
    /// session is `InProgress`; [`EngineError::Storage`] from the ports.
    #[instrument(skip(self), fields(session_id = %session_id, scene_id = %scene_id))]
    pub async fn progress_to_scene(
        &self,
        session_id: Uuid,
        scene_id: &str,
    ) -> Result<GameSession, EngineError> {
        let lock = self.locks.lock_for(session_id);
        let _guard = lock.lock().await;

        let mut session = self.load(session_id).await?;
        session.ensure_in_progress("progress")?;

        // Direct advancement must keep the current-scene invariant: the
        // target has to be a real scene in this session's scenario.
        let scenario = self.resolve_scenario(&session.scenario_id).await?;
        if scenario.scene_by_id(scene_id).is_none() {
            return Err(EngineError::SceneNotFound {
                scenario_id: scenario.id.clone(),
                scene_id: scene_id.to_owned(),
            });
        }

        session.progress_to(scene_id)?;
        self.store.save(&session).await?;
        Ok(session)
    }

    /// Sets the session's selected character. Allowed in any state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SessionNotFound`] or
    /// [`EngineError::Storage`] from the ports.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn select_character(
        &self,
        session_id: Uuid,
        character_id: &str,
    ) -> Result<GameSession, EngineError> {
        let lock = self.locks.lock_for(session_id);
        let _guard = lock.lock().await;

        let mut session = self.load(session_id).await?;
        session.select_character(character_id);
        self.store.save(&session).await?;
        Ok(session)
    }

    /// Removes a session. Returns true if one was removed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the backing store fails.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn delete_session(&self, session_id: Uuid) -> Result<bool, EngineError> {
        let lock = self.locks.lock_for(session_id);
        let deleted = {
            let _guard = lock.lock().await;
            self.store.delete(session_id).await?
        };
        self.locks.forget(session_id);

        if deleted {
            info!(session_id = %session_id, "session deleted");
        }
        Ok(deleted)
    }

    /// Returns the stats snapshot for a session, or `None` if unknown.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the backing store fails.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn session_stats(
        &self,
        session_id: Uuid,
    ) -> Result<Option<SessionStats>, EngineError> {
        let session = self.store.get(session_id).await?;
        Ok(session.as_ref().map(SessionStats::from_session))
    }
}

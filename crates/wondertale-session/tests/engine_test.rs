//! Engine unit tests, relocated from the inline `#[cfg(test)] mod tests` in
//! `application/engine.rs`. They must live here (an integration test target)
//! rather than inline: `wondertale-test-support` depends on this crate, so
//! inline unit tests using its test doubles would link a second copy of this
//! crate and fail to unify the `SessionStore` trait. As a separate target they
//! link the single final crate.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use uuid::Uuid;
use wondertale_core::age::AgeGroup;
use wondertale_core::error::EngineError;
use wondertale_session::application::engine::SessionEngine;
use wondertale_session::domain::session::SessionStatus;
use wondertale_test_support::{
    FixedClock, InMemoryScenarioProvider, InMemorySessionStore, single_choice_scenario,
};

    fn engine_with(scenario: wondertale_scenario::Scenario) -> SessionEngine {
        let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        SessionEngine::new(
            Arc::new(InMemoryScenarioProvider::with_scenario(scenario)),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(FixedClock(fixed_now)),
        )
    }

    #[tokio::test]
    async fn test_start_session_initializes_and_persists() {
        // Arrange
        let engine = engine_with(single_choice_scenario());

        // Act
        let session = engine
            .start_session("s1", AgeGroup::Ages7To9, "Robin", vec!["Alex".to_owned()])
            .await
            .unwrap();

        // Assert
        assert_eq!(session.status, SessionStatus::InProgress);
        assert_eq!(session.current_scene_id, "a");
        assert!(session.compass.contains_key("honesty"));

        let reloaded = engine.session_stats(session.id).await.unwrap().unwrap();
        assert_eq!(reloaded.choice_count, 0);
    }

    #[tokio::test]
    async fn test_start_session_unknown_scenario_fails() {
        // Arrange
        let engine = engine_with(single_choice_scenario());

        // Act
        let result = engine
            .start_session("missing", AgeGroup::Ages7To9, "Robin", vec![])
            .await;

        // Assert
        match result.unwrap_err() {
            EngineError::ScenarioNotFound(id) => assert_eq!(id, "missing"),
            other => panic!("expected ScenarioNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_start_session_rejects_young_audience() {
        // Arrange — fixture requires Ages7To9.
        let engine = engine_with(single_choice_scenario());

        // Act
        let result = engine
            .start_session("s1", AgeGroup::Ages4To6, "Robin", vec![])
            .await;

        // Assert
        match result.unwrap_err() {
            EngineError::AgeIncompatible { .. } => {}
            other => panic!("expected AgeIncompatible, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_make_choice_unknown_session_fails() {
        let engine = engine_with(single_choice_scenario());
        let session_id = Uuid::new_v4();

        let result = engine.make_choice(session_id, "a", "tell the truth", "b").await;

        match result.unwrap_err() {
            EngineError::SessionNotFound(id) => assert_eq!(id, session_id),
            other => panic!("expected SessionNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_make_choice_unmatched_text_fails() {
        // Arrange
        let engine = engine_with(single_choice_scenario());
        let session = engine
            .start_session("s1", AgeGroup::Ages7To9, "Robin", vec![])
            .await
            .unwrap();

        // Act
        let result = engine.make_choice(session.id, "a", "tell a fib", "b").await;

        // Assert
        match result.unwrap_err() {
            EngineError::InvalidChoice { choice_text, .. } => {
                assert_eq!(choice_text, "tell a fib");
            }
            other => panic!("expected InvalidChoice, got {other:?}"),
        }

        // No choice was recorded by the failed call.
        let stats = engine.session_stats(session.id).await.unwrap().unwrap();
        assert_eq!(stats.choice_count, 0);
    }

    #[tokio::test]
    async fn test_make_choice_unknown_scene_fails() {
        let engine = engine_with(single_choice_scenario());
        let session = engine
            .start_session("s1", AgeGroup::Ages7To9, "Robin", vec![])
            .await
            .unwrap();

        let result = engine
            .make_choice(session.id, "z", "tell the truth", "b")
            .await;

        match result.unwrap_err() {
            EngineError::SceneNotFound { scene_id, .. } => assert_eq!(scene_id, "z"),
            other => panic!("expected SceneNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_make_choice_rejected_after_completion() {
        // Arrange
        let engine = engine_with(single_choice_scenario());
        let session = engine
            .start_session("s1", AgeGroup::Ages7To9, "Robin", vec![])
            .await
            .unwrap();
        engine.end_session(session.id).await.unwrap();

        // Act
        let result = engine.make_choice(session.id, "a", "tell the truth", "b").await;

        // Assert
        match result.unwrap_err() {
            EngineError::InvalidState(_) => {}
            other => panic!("expected InvalidState, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pause_resume_and_invalid_transitions() {
        // Arrange
        let engine = engine_with(single_choice_scenario());
        let session = engine
            .start_session("s1", AgeGroup::Ages7To9, "Robin", vec![])
            .await
            .unwrap();

        // Act / Assert — resume before pause is rejected.
        match engine.resume_session(session.id).await.unwrap_err() {
            EngineError::InvalidState(_) => {}
            other => panic!("expected InvalidState, got {other:?}"),
        }

        let paused = engine.pause_session(session.id).await.unwrap();
        assert_eq!(paused.status, SessionStatus::Paused);
        assert!(paused.paused_at.is_some());

        // Pausing again is rejected and leaves the session paused.
        match engine.pause_session(session.id).await.unwrap_err() {
            EngineError::InvalidState(_) => {}
            other => panic!("expected InvalidState, got {other:?}"),
        }

        let resumed = engine.resume_session(session.id).await.unwrap();
        assert_eq!(resumed.status, SessionStatus::InProgress);
        assert_eq!(resumed.paused_at, None);
    }

    #[tokio::test]
    async fn test_end_from_paused_completes() {
        let engine = engine_with(single_choice_scenario());
        let session = engine
            .start_session("s1", AgeGroup::Ages7To9, "Robin", vec![])
            .await
            .unwrap();
        engine.pause_session(session.id).await.unwrap();

        let ended = engine.end_session(session.id).await.unwrap();

        assert_eq!(ended.status, SessionStatus::Completed);
        assert!(ended.ended_at.is_some());
        // Completion earns its achievement even without a choice.
        assert!(ended.has_achievement(&format!("{}_completion", ended.id)));
    }

    #[tokio::test]
    async fn test_progress_to_scene_validates_target() {
        // Arrange
        let engine = engine_with(single_choice_scenario());
        let session = engine
            .start_session("s1", AgeGroup::Ages7To9, "Robin", vec![])
            .await
            .unwrap();

        // Act
        let moved = engine.progress_to_scene(session.id, "b").await.unwrap();

        // Assert
        assert_eq!(moved.current_scene_id, "b");

        match engine
            .progress_to_scene(session.id, "nowhere")
            .await
            .unwrap_err()
        {
            EngineError::SceneNotFound { scene_id, .. } => assert_eq!(scene_id, "nowhere"),
            other => panic!("expected SceneNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_select_character_works_on_completed_session() {
        let engine = engine_with(single_choice_scenario());
        let session = engine
            .start_session("s1", AgeGroup::Ages7To9, "Robin", vec![])
            .await
            .unwrap();
        engine.end_session(session.id).await.unwrap();

        let updated = engine
            .select_character(session.id, "fox-cub")
            .await
            .unwrap();

        assert_eq!(updated.character_id.as_deref(), Some("fox-cub"));
    }

    #[tokio::test]
    async fn test_delete_session_reports_presence() {
        let engine = engine_with(single_choice_scenario());
        let session = engine
            .start_session("s1", AgeGroup::Ages7To9, "Robin", vec![])
            .await
            .unwrap();

        assert!(engine.delete_session(session.id).await.unwrap());
        assert!(!engine.delete_session(session.id).await.unwrap());
        assert!(engine.session_stats(session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_session_stats_none_for_unknown_session() {
        let engine = engine_with(single_choice_scenario());

        let stats = engine.session_stats(Uuid::new_v4()).await.unwrap();

        assert!(stats.is_none());
    }

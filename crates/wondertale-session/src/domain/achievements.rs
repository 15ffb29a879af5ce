//! Achievement derivation rules.
//!
//! Achievements are a pure function of session history. Identifiers are
//! deterministic (session id plus trigger), which is what makes repeated
//! evaluation safe: an id already on the session is never produced again.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::{GameSession, SessionStatus};

/// Threshold applied to every axis unless overridden per axis.
pub const DEFAULT_COMPASS_THRESHOLD: f64 = 3.0;

/// What rule earned an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AchievementKind {
    /// A compass axis crossed its threshold.
    CompassThreshold,
    /// The session's very first choice.
    FirstChoice,
    /// The session reached `Completed`.
    SessionComplete,
}

/// An achievement earned by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAchievement {
    /// Deterministic identifier, unique within the session.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Icon asset reference.
    pub icon: String,
    /// The rule that produced this achievement.
    pub kind: AchievementKind,
    /// The axis involved, for `CompassThreshold`.
    pub axis: Option<String>,
    /// The threshold that was crossed, for `CompassThreshold`.
    pub threshold: Option<f64>,
    /// When the achievement was earned.
    pub earned_at: DateTime<Utc>,
}

/// Injected evaluator configuration.
///
/// Per-axis thresholds come from an external badge-configuration service;
/// any axis without an override uses [`DEFAULT_COMPASS_THRESHOLD`].
#[derive(Debug, Clone)]
pub struct AchievementConfig {
    /// Threshold for axes without an override.
    pub default_threshold: f64,
    /// Per-axis overrides.
    pub axis_thresholds: HashMap<String, f64>,
}

impl Default for AchievementConfig {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_COMPASS_THRESHOLD,
            axis_thresholds: HashMap::new(),
        }
    }
}

impl AchievementConfig {
    /// Returns the threshold in effect for the given axis.
    #[must_use]
    pub fn threshold_for(&self, axis: &str) -> f64 {
        self.axis_thresholds
            .get(axis)
            .copied()
            .unwrap_or(self.default_threshold)
    }
}

/// Derives the achievements the session has newly earned.
///
/// Stateless and idempotent: achievements whose id is already present on
/// the session are skipped, so calling this twice on an unchanged session
/// yields an empty second result. The caller merges the returned set.
#[must_use]
pub fn evaluate(
    session: &GameSession,
    config: &AchievementConfig,
    now: DateTime<Utc>,
) -> Vec<SessionAchievement> {
    let mut earned = Vec::new();

    for tracker in session.compass.values() {
        let threshold = config.threshold_for(&tracker.axis);
        if tracker.value.abs() >= threshold {
            let id = format!("{}_{}_threshold", session.id, tracker.axis);
            if !session.has_achievement(&id) {
                earned.push(SessionAchievement {
                    id,
                    title: format!("Compass milestone: {}", tracker.axis),
                    description: format!(
                        "Your {} compass grew strong enough to leave its mark.",
                        tracker.axis
                    ),
                    icon: "badges/compass-milestone.png".to_owned(),
                    kind: AchievementKind::CompassThreshold,
                    axis: Some(tracker.axis.clone()),
                    threshold: Some(threshold),
                    earned_at: now,
                });
            }
        }
    }

    if session.choices.len() == 1 {
        let id = format!("{}_first_choice", session.id);
        if !session.has_achievement(&id) {
            earned.push(SessionAchievement {
                id,
                title: "First Choice".to_owned(),
                description: "You made your very first choice.".to_owned(),
                icon: "badges/first-choice.png".to_owned(),
                kind: AchievementKind::FirstChoice,
                axis: None,
                threshold: None,
                earned_at: now,
            });
        }
    }

    if session.status == SessionStatus::Completed {
        let id = format!("{}_completion", session.id);
        if !session.has_achievement(&id) {
            earned.push(SessionAchievement {
                id,
                title: "Story Complete".to_owned(),
                description: "You reached the end of the story.".to_owned(),
                icon: "badges/story-complete.png".to_owned(),
                kind: AchievementKind::SessionComplete,
                axis: None,
                threshold: None,
                earned_at: now,
            });
        }
    }

    earned
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;
    use wondertale_core::age::AgeGroup;
    use wondertale_scenario::{Scenario, Scene, SceneKind};

    fn scenario_with_axes(axes: &[&str]) -> Scenario {
        Scenario {
            id: "s1".to_owned(),
            title: "Test".to_owned(),
            minimum_age: AgeGroup::Ages4To6,
            compass_axes: axes.iter().map(|a| (*a).to_owned()).collect(),
            scenes: vec![Scene {
                id: "a".to_owned(),
                title: "A".to_owned(),
                kind: SceneKind::Choice,
                branches: vec![],
            }],
        }
    }

    fn session_with_axes(axes: &[&str]) -> GameSession {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        GameSession::start(
            Uuid::new_v4(),
            &scenario_with_axes(axes),
            AgeGroup::Ages7To9,
            "Robin",
            vec!["Alex".to_owned()],
            now,
        )
        .unwrap()
    }

    #[test]
    fn test_threshold_not_earned_below_default() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let mut session = session_with_axes(&["honesty"]);
        session
            .compass
            .get_mut("honesty")
            .unwrap()
            .apply(1.0, now);

        let earned = evaluate(&session, &AchievementConfig::default(), now);

        assert!(
            earned
                .iter()
                .all(|a| a.kind != AchievementKind::CompassThreshold)
        );
    }

    #[test]
    fn test_threshold_earned_with_per_axis_override() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let mut session = session_with_axes(&["honesty"]);
        session
            .compass
            .get_mut("honesty")
            .unwrap()
            .apply(1.5, now);

        let config = AchievementConfig {
            default_threshold: DEFAULT_COMPASS_THRESHOLD,
            axis_thresholds: HashMap::from([("honesty".to_owned(), 1.0)]),
        };

        let earned = evaluate(&session, &config, now);

        assert_eq!(earned.len(), 1);
        let achievement = &earned[0];
        assert_eq!(achievement.id, format!("{}_honesty_threshold", session.id));
        assert_eq!(achievement.kind, AchievementKind::CompassThreshold);
        assert_eq!(achievement.axis.as_deref(), Some("honesty"));
        assert_eq!(achievement.threshold, Some(1.0));
    }

    #[test]
    fn test_threshold_uses_absolute_value() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let mut session = session_with_axes(&["mischief"]);
        session
            .compass
            .get_mut("mischief")
            .unwrap()
            .apply(-2.0, now);

        let config = AchievementConfig {
            default_threshold: 2.0,
            axis_thresholds: HashMap::new(),
        };

        let earned = evaluate(&session, &config, now);

        assert_eq!(earned.len(), 1);
        assert_eq!(earned[0].kind, AchievementKind::CompassThreshold);
    }

    #[test]
    fn test_completion_earned_when_session_completed() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let mut session = session_with_axes(&[]);
        session.end(now);

        let earned = evaluate(&session, &AchievementConfig::default(), now);

        assert_eq!(earned.len(), 1);
        assert_eq!(earned[0].id, format!("{}_completion", session.id));
        assert_eq!(earned[0].kind, AchievementKind::SessionComplete);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let mut session = session_with_axes(&[]);
        session.end(now);

        let first = evaluate(&session, &AchievementConfig::default(), now);
        session.merge_achievements(first);
        let before = session.achievements.len();

        let second = evaluate(&session, &AchievementConfig::default(), now);
        session.merge_achievements(second);

        assert_eq!(session.achievements.len(), before);
    }
}

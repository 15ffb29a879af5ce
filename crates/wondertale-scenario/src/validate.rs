//! Authoring-side scenario validation.
//!
//! The session engine trusts its input: it never repairs or re-checks a
//! graph mid-traversal. This gate runs once in the authoring pipeline,
//! before a scenario is published to a [`ScenarioProvider`](crate::provider::ScenarioProvider).

use thiserror::Error;

use crate::graph::{Scenario, SceneKind};

/// Echo strength must fall in this closed range.
pub const STRENGTH_MIN: f64 = 0.1;
/// Echo strength must fall in this closed range.
pub const STRENGTH_MAX: f64 = 1.0;
/// Compass deltas must fall in [-`DELTA_MAX`, `DELTA_MAX`].
pub const DELTA_MAX: f64 = 1.0;

/// A structural defect found in an authored scenario.
#[derive(Debug, Error, PartialEq)]
pub enum ScenarioValidationError {
    /// The scenario has no scenes.
    #[error("scenario {0} has no scenes")]
    Empty(String),

    /// Two scenes share an id.
    #[error("duplicate scene id {0}")]
    DuplicateSceneId(String),

    /// Two branches on one scene share an id.
    #[error("duplicate branch id {branch_id} on scene {scene_id}")]
    DuplicateBranchId {
        /// The scene carrying the duplicates.
        scene_id: String,
        /// The repeated branch id.
        branch_id: String,
    },

    /// Two branches on one scene share choice text, which would make
    /// text-based lookup ambiguous.
    #[error("duplicate choice text {choice_text:?} on scene {scene_id}")]
    DuplicateChoiceText {
        /// The scene carrying the duplicates.
        scene_id: String,
        /// The repeated label.
        choice_text: String,
    },

    /// A branch points at a scene id that is neither in the graph nor a
    /// terminal sentinel.
    #[error("branch {branch_id} on scene {scene_id} targets unknown scene {target}")]
    UnknownBranchTarget {
        /// The scene carrying the branch.
        scene_id: String,
        /// The offending branch.
        branch_id: String,
        /// The unresolved target.
        target: String,
    },

    /// A branch carries an echo on a scene that is not a choice point.
    #[error("echo-producing branch {branch_id} on non-choice scene {scene_id}")]
    EchoOnNonChoiceScene {
        /// The offending scene.
        scene_id: String,
        /// The offending branch.
        branch_id: String,
    },

    /// An echo's strength is outside [0.1, 1.0].
    #[error("echo strength {strength} out of range on branch {branch_id} of scene {scene_id}")]
    StrengthOutOfRange {
        /// The scene carrying the branch.
        scene_id: String,
        /// The offending branch.
        branch_id: String,
        /// The out-of-range value.
        strength: f64,
    },

    /// A compass delta is outside [-1.0, 1.0].
    #[error("compass delta {delta} out of range on branch {branch_id} of scene {scene_id}")]
    DeltaOutOfRange {
        /// The scene carrying the branch.
        scene_id: String,
        /// The offending branch.
        branch_id: String,
        /// The out-of-range value.
        delta: f64,
    },

    /// A compass change references an axis the scenario does not declare.
    #[error("branch {branch_id} on scene {scene_id} adjusts undeclared axis {axis}")]
    UndeclaredAxis {
        /// The scene carrying the branch.
        scene_id: String,
        /// The offending branch.
        branch_id: String,
        /// The unknown axis.
        axis: String,
    },
}

impl Scenario {
    /// Checks the structural invariants an authored scenario must satisfy
    /// before publication. Returns the first defect found.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioValidationError`] describing the defect.
    pub fn validate(&self) -> Result<(), ScenarioValidationError> {
        if self.scenes.is_empty() {
            return Err(ScenarioValidationError::Empty(self.id.clone()));
        }

        let mut scene_ids = std::collections::HashSet::new();
        for scene in &self.scenes {
            if !scene_ids.insert(scene.id.as_str()) {
                return Err(ScenarioValidationError::DuplicateSceneId(scene.id.clone()));
            }
        }

        for scene in &self.scenes {
            let mut branch_ids = std::collections::HashSet::new();
            let mut labels = std::collections::HashSet::new();
            for branch in &scene.branches {
                if !branch_ids.insert(branch.id.as_str()) {
                    return Err(ScenarioValidationError::DuplicateBranchId {
                        scene_id: scene.id.clone(),
                        branch_id: branch.id.clone(),
                    });
                }
                if !labels.insert(branch.choice_text.as_str()) {
                    return Err(ScenarioValidationError::DuplicateChoiceText {
                        scene_id: scene.id.clone(),
                        choice_text: branch.choice_text.clone(),
                    });
                }
                if !branch.is_terminal() && self.scene_by_id(&branch.next_scene_id).is_none() {
                    return Err(ScenarioValidationError::UnknownBranchTarget {
                        scene_id: scene.id.clone(),
                        branch_id: branch.id.clone(),
                        target: branch.next_scene_id.clone(),
                    });
                }
                if let Some(echo) = &branch.echo {
                    if scene.kind != SceneKind::Choice {
                        return Err(ScenarioValidationError::EchoOnNonChoiceScene {
                            scene_id: scene.id.clone(),
                            branch_id: branch.id.clone(),
                        });
                    }
                    if !(STRENGTH_MIN..=STRENGTH_MAX).contains(&echo.strength) {
                        return Err(ScenarioValidationError::StrengthOutOfRange {
                            scene_id: scene.id.clone(),
                            branch_id: branch.id.clone(),
                            strength: echo.strength,
                        });
                    }
                }
                if let Some(change) = &branch.compass_change {
                    if !(-DELTA_MAX..=DELTA_MAX).contains(&change.delta) {
                        return Err(ScenarioValidationError::DeltaOutOfRange {
                            scene_id: scene.id.clone(),
                            branch_id: branch.id.clone(),
                            delta: change.delta,
                        });
                    }
                    if !self.declares_axis(&change.axis) {
                        return Err(ScenarioValidationError::UndeclaredAxis {
                            scene_id: scene.id.clone(),
                            branch_id: branch.id.clone(),
                            axis: change.axis.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

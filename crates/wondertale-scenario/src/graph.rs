//! Scenario graph value types.
//!
//! Everything here is immutable once loaded. Authored identifiers
//! (scenario, scene, branch, axis, character) are strings chosen by the
//! authoring pipeline; the engine never generates them.

use serde::{Deserialize, Serialize};
use wondertale_core::age::AgeGroup;

/// Sentinel target meaning "this branch ends the story".
///
/// An empty target string carries the same meaning; authored content uses
/// both forms.
pub const END_SENTINEL: &str = "END";

/// What kind of node a scene is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKind {
    /// Linear storytelling; advanced via `ProgressToScene`.
    Narrative,
    /// A decision point; advanced via `MakeChoice`.
    Choice,
    /// An authored ending.
    End,
}

/// The flavor of a narrative callback recorded when a branch is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EchoKind {
    /// A remembered moment the story can refer back to.
    Memory,
    /// A promise the player made to a character.
    Promise,
    /// A consequence seeded for a later scene.
    Consequence,
    /// A bond formed with a character.
    Friendship,
    /// Something the player uncovered.
    Discovery,
}

/// A narrative callback attached to a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EchoLog {
    /// The callback flavor.
    pub kind: EchoKind,
    /// Human-readable description shown when the echo resurfaces.
    pub description: String,
    /// How strongly the echo resurfaces, in [0.1, 1.0].
    pub strength: f64,
}

/// A compass-axis adjustment attached to a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompassChange {
    /// The axis to adjust; must be declared by the scenario.
    pub axis: String,
    /// The adjustment, in [-1.0, 1.0].
    pub delta: f64,
}

/// One outgoing choice edge from a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Stable authored identifier. Branch identity at the public boundary
    /// is the choice text; this id exists so re-ordering or re-wording a
    /// branch does not change what a recorded choice points at.
    pub id: String,
    /// The choice label shown to the player; the lookup key for `MakeChoice`.
    pub choice_text: String,
    /// Target scene id, or [`END_SENTINEL`] / empty for a terminal branch.
    pub next_scene_id: String,
    /// Optional narrative callback recorded when this branch is taken.
    pub echo: Option<EchoLog>,
    /// Optional compass adjustment applied when this branch is taken.
    pub compass_change: Option<CompassChange>,
}

impl Branch {
    /// Returns true if this branch's target is a terminal sentinel rather
    /// than a scene id.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.next_scene_id.is_empty() || self.next_scene_id == END_SENTINEL
    }
}

/// One node in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Authored scene identifier, unique within the scenario.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Node kind.
    pub kind: SceneKind,
    /// Outgoing edges, in authored order. Empty means the scene is a
    /// dead end and completes the session when reached.
    pub branches: Vec<Branch>,
}

impl Scene {
    /// Finds a branch by exact match on its choice text.
    ///
    /// Branch identity at the public boundary is the label, not the
    /// position; authored content relies on this.
    #[must_use]
    pub fn branch_by_text(&self, choice_text: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.choice_text == choice_text)
    }
}

/// The authored branching story graph a session is played against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Authored scenario identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Youngest audience band this scenario is written for.
    pub minimum_age: AgeGroup,
    /// Compass axes this scenario tracks, in authored order.
    pub compass_axes: Vec<String>,
    /// Scenes in authored order. The first scene is where sessions start.
    pub scenes: Vec<Scene>,
}

impl Scenario {
    /// Returns the scene a new session starts at.
    #[must_use]
    pub fn first_scene(&self) -> Option<&Scene> {
        self.scenes.first()
    }

    /// Finds a scene by id.
    #[must_use]
    pub fn scene_by_id(&self, scene_id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == scene_id)
    }

    /// Returns true if the scenario declares the given compass axis.
    #[must_use]
    pub fn declares_axis(&self, axis: &str) -> bool {
        self.compass_axes.iter().any(|a| a == axis)
    }
}

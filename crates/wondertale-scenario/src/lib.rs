//! Wondertale — Scenario bounded context.
//!
//! The authored, immutable branching story graph a session is played
//! against. Scenarios are produced and validated by the authoring pipeline;
//! the session engine consumes them read-only through [`ScenarioProvider`].

pub mod graph;
pub mod provider;
pub mod validate;

pub use graph::{Branch, CompassChange, EchoKind, EchoLog, Scenario, Scene, SceneKind};
pub use provider::ScenarioProvider;
pub use validate::ScenarioValidationError;

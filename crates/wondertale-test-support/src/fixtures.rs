//! Scenario fixtures shared across engine tests.

use wondertale_core::age::AgeGroup;
use wondertale_scenario::{
    Branch, CompassChange, EchoKind, EchoLog, Scenario, Scene, SceneKind,
};

/// A two-scene scenario with one honesty choice: scene `a` offers
/// "tell the truth" leading to the branch-less scene `b`, so the first
/// choice also completes the session.
#[must_use]
pub fn single_choice_scenario() -> Scenario {
    Scenario {
        id: "s1".to_owned(),
        title: "The Broken Vase".to_owned(),
        minimum_age: AgeGroup::Ages7To9,
        compass_axes: vec!["honesty".to_owned()],
        scenes: vec![
            Scene {
                id: "a".to_owned(),
                title: "The Living Room".to_owned(),
                kind: SceneKind::Choice,
                branches: vec![Branch {
                    id: "truth".to_owned(),
                    choice_text: "tell the truth".to_owned(),
                    next_scene_id: "b".to_owned(),
                    echo: Some(EchoLog {
                        kind: EchoKind::Memory,
                        description: "You owned up about the vase.".to_owned(),
                        strength: 0.8,
                    }),
                    compass_change: Some(CompassChange {
                        axis: "honesty".to_owned(),
                        delta: 1.0,
                    }),
                }],
            },
            Scene {
                id: "b".to_owned(),
                title: "A Lighter Heart".to_owned(),
                kind: SceneKind::End,
                branches: vec![],
            },
        ],
    }
}

/// A single-scene scenario whose "walk on" branch loops back to itself,
/// adjusting honesty by +1.0 each time. Useful for clamp and concurrency
/// tests; "sit and rest" ends the story via the terminal sentinel.
#[must_use]
pub fn looping_scenario() -> Scenario {
    Scenario {
        id: "long-road".to_owned(),
        title: "The Long Road".to_owned(),
        minimum_age: AgeGroup::Ages4To6,
        compass_axes: vec!["honesty".to_owned()],
        scenes: vec![Scene {
            id: "fork".to_owned(),
            title: "The Fork".to_owned(),
            kind: SceneKind::Choice,
            branches: vec![
                Branch {
                    id: "again".to_owned(),
                    choice_text: "walk on".to_owned(),
                    next_scene_id: "fork".to_owned(),
                    echo: Some(EchoLog {
                        kind: EchoKind::Discovery,
                        description: "Another bend in the road.".to_owned(),
                        strength: 0.3,
                    }),
                    compass_change: Some(CompassChange {
                        axis: "honesty".to_owned(),
                        delta: 1.0,
                    }),
                },
                Branch {
                    id: "rest".to_owned(),
                    choice_text: "sit and rest".to_owned(),
                    next_scene_id: "END".to_owned(),
                    echo: None,
                    compass_change: None,
                },
            ],
        }],
    }
}

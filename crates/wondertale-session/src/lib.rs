//! Wondertale — Session & Progress bounded context.
//!
//! Responsible for the lifecycle of interactive story sessions: starting a
//! scenario, resolving player choices against the story graph, tracking
//! compass axes and echoes, and deriving achievements.

pub mod application;
pub mod domain;

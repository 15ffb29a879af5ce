//! Wondertale Core — shared domain abstractions.
//!
//! This crate defines the fundamental types that the scenario and session
//! contexts depend on. It contains no infrastructure code.

pub mod age;
pub mod clock;
pub mod error;

//! Bounded compass-axis accumulators.
//!
//! Each tracked axis keeps a clamped current value and an append-only
//! history of the deltas that were applied to it. History records the
//! pre-clamp delta, so the raw sequence of adjustments stays recoverable
//! even after the clamp engages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lower bound of a tracked compass value.
pub const COMPASS_MIN: f64 = -2.0;
/// Upper bound of a tracked compass value.
pub const COMPASS_MAX: f64 = 2.0;

/// One applied adjustment in a tracker's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompassDelta {
    /// The authored delta, before clamping.
    pub delta: f64,
    /// When the adjustment was applied.
    pub applied_at: DateTime<Utc>,
}

/// The accumulator for one compass axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompassTracking {
    /// The axis this tracker accumulates.
    pub axis: String,
    /// Current value, always within [`COMPASS_MIN`, `COMPASS_MAX`].
    pub value: f64,
    /// Adjustments applied so far, in order.
    pub history: Vec<CompassDelta>,
    /// When the tracker last changed.
    pub updated_at: DateTime<Utc>,
}

impl CompassTracking {
    /// Creates a tracker for `axis` starting at 0.0.
    #[must_use]
    pub fn new(axis: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            axis: axis.into(),
            value: 0.0,
            history: Vec::new(),
            updated_at: now,
        }
    }

    /// Applies a delta, clamping the resulting value to the tracked range,
    /// and returns the new value.
    pub fn apply(&mut self, delta: f64, now: DateTime<Utc>) -> f64 {
        self.value = (self.value + delta).clamp(COMPASS_MIN, COMPASS_MAX);
        self.history.push(CompassDelta {
            delta,
            applied_at: now,
        });
        self.updated_at = now;
        self.value
    }
}

/// What happened to a [`CompassChange`](wondertale_scenario::CompassChange)
/// when it reached the tracker.
///
/// A change naming an axis the session does not track is dropped without
/// error; the tagged outcome lets callers and tests observe which path was
/// taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompassOutcome {
    /// The delta was applied to a tracked axis.
    Applied {
        /// The adjusted axis.
        axis: String,
        /// The post-clamp value.
        value: f64,
    },
    /// The change was dropped.
    Ignored {
        /// The axis named by the change.
        axis: String,
        /// Why the change was dropped.
        reason: CompassIgnoreReason,
    },
}

/// Why a compass change was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassIgnoreReason {
    /// The session does not track the named axis.
    UnknownAxis,
}

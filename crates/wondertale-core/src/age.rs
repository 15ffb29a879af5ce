//! Age-group ordering table.
//!
//! Scenarios declare a minimum age group; a session may only be started
//! against a scenario whose minimum does not exceed the target group. The
//! bands themselves are authored content — the engine only needs their
//! ordering.

use serde::{Deserialize, Serialize};

/// Audience age bands, ordered from youngest to oldest.
///
/// The derived `Ord` follows declaration order, which is the whole contract:
/// `minimum_age <= target_age_group` gates session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeGroup {
    /// Ages 4–6.
    Ages4To6,
    /// Ages 7–9.
    Ages7To9,
    /// Ages 10–12.
    Ages10To12,
    /// Ages 13 and up.
    Ages13Plus,
}

impl AgeGroup {
    /// Returns true if content with this minimum age is suitable for the
    /// given target audience.
    #[must_use]
    pub fn admits(self, target: AgeGroup) -> bool {
        self <= target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_groups_order_youngest_to_oldest() {
        assert!(AgeGroup::Ages4To6 < AgeGroup::Ages7To9);
        assert!(AgeGroup::Ages7To9 < AgeGroup::Ages10To12);
        assert!(AgeGroup::Ages10To12 < AgeGroup::Ages13Plus);
    }

    #[test]
    fn test_admits_allows_equal_and_older_audiences() {
        assert!(AgeGroup::Ages7To9.admits(AgeGroup::Ages7To9));
        assert!(AgeGroup::Ages7To9.admits(AgeGroup::Ages13Plus));
        assert!(!AgeGroup::Ages10To12.admits(AgeGroup::Ages4To6));
    }

    #[test]
    fn test_age_group_round_trips_through_serde() {
        let json = serde_json::to_string(&AgeGroup::Ages10To12).unwrap();
        let back: AgeGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AgeGroup::Ages10To12);
    }
}

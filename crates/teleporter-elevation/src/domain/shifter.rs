//! Elevation shifting policies.
//!
//! `bottom <= top` is assumed, not checked. With inverted bounds the
//! policies still return a defined value; they just stop meaning much.

use serde::{Deserialize, Serialize};

/// How an elevation responds to a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevationPolicy {
    /// Toggle between `top` and `bottom` when standing on either.
    Ladder,
    /// Raise to `top` from anywhere below it.
    Roof,
    /// Drop to `bottom` from anywhere above it.
    Pit,
}

/// Returns the elevation after applying `policy`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn shift(current: f64, top: f64, bottom: f64, policy: ElevationPolicy) -> f64 {
    match policy {
        ElevationPolicy::Ladder if current == top => bottom,
        ElevationPolicy::Ladder if current == bottom => top,
        ElevationPolicy::Roof if current < top => top,
        ElevationPolicy::Pit if current > bottom => bottom,
        _ => current,
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_toggles_between_reference_heights() {
        assert_eq!(shift(5.0, 5.0, 0.0, ElevationPolicy::Ladder), 0.0);
        assert_eq!(shift(0.0, 5.0, 0.0, ElevationPolicy::Ladder), 5.0);
    }

    #[test]
    fn test_ladder_leaves_other_heights_alone() {
        assert_eq!(shift(3.0, 5.0, 0.0, ElevationPolicy::Ladder), 3.0);
    }

    #[test]
    fn test_ladder_with_equal_bounds_stays_put() {
        assert_eq!(shift(4.0, 4.0, 4.0, ElevationPolicy::Ladder), 4.0);
    }

    #[test]
    fn test_roof_raises_to_top_only_from_below() {
        assert_eq!(shift(2.0, 10.0, 0.0, ElevationPolicy::Roof), 10.0);
        assert_eq!(shift(10.0, 10.0, 0.0, ElevationPolicy::Roof), 10.0);
        assert_eq!(shift(15.0, 10.0, 0.0, ElevationPolicy::Roof), 15.0);
    }

    #[test]
    fn test_pit_drops_to_bottom_only_from_above() {
        assert_eq!(shift(2.0, 10.0, 0.0, ElevationPolicy::Pit), 0.0);
        assert_eq!(shift(-3.0, 10.0, 0.0, ElevationPolicy::Pit), -3.0);
        assert_eq!(shift(0.0, 10.0, 0.0, ElevationPolicy::Pit), 0.0);
    }

    #[test]
    fn test_policy_names_are_snake_case() {
        let policy: ElevationPolicy = serde_json::from_str("\"pit\"").unwrap();
        assert_eq!(policy, ElevationPolicy::Pit);
    }
}

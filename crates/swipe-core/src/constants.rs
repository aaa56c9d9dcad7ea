//! # Swipe Constants
//!
//! Default tuning values for the swipe engine and the fixed thresholds used
//! by the analyzer and the price delta formula:
//! - Bucket geometry (duration, retained count, recent window)
//! - Price delta ranges (base percent, random multiplier)
//! - Streak and pickiness parameters

// ============================================================================
// Bucket Geometry
// ============================================================================

/// Seconds covered by a single bucket
pub const DEFAULT_BUCKET_DURATION_SECS: i64 = 20;

/// Maximum number of buckets kept in a token (~10 minutes at 20s buckets)
pub const DEFAULT_BUCKET_COUNT: usize = 30;

/// Number of leading buckets that make up the "recent" counters
pub const RECENT_BUCKETS: usize = 3;

// ============================================================================
// Price Delta Ranges
// ============================================================================

/// Minimum base change as a fraction of the current price (1%)
pub const DEFAULT_BASE_PERCENT_MIN: f64 = 0.01;

/// Maximum base change as a fraction of the current price (3%)
pub const DEFAULT_BASE_PERCENT_MAX: f64 = 0.03;

/// Lower bound of the random multiplier
pub const DEFAULT_RANDOM_MULTIPLIER_MIN: f64 = 0.5;

/// Upper bound of the random multiplier
pub const DEFAULT_RANDOM_MULTIPLIER_MAX: f64 = 2.0;

// ============================================================================
// Streak & Pickiness
// ============================================================================

/// Consecutive single-direction buckets needed before a streak is reported
pub const DEFAULT_STREAK_THRESHOLD: usize = 5;

/// Multiplier applied to a swipe that continues the user's streak
pub const DEFAULT_STREAK_PENALTY: f64 = 0.7;

/// Pickiness reported when there is no history
pub const NEUTRAL_PICKINESS: f64 = 0.5;

/// Above this ratio a user counts as picky, so their right swipes weigh more
pub const PICKY_THRESHOLD: f64 = 0.6;

/// Below this ratio a user counts as approving, so their left swipes weigh more
pub const APPROVING_THRESHOLD: f64 = 0.4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickiness_thresholds_surround_neutral() {
        assert!(APPROVING_THRESHOLD < NEUTRAL_PICKINESS);
        assert!(NEUTRAL_PICKINESS < PICKY_THRESHOLD);
    }

    #[test]
    fn test_default_ranges_are_ordered() {
        assert!(DEFAULT_BASE_PERCENT_MIN <= DEFAULT_BASE_PERCENT_MAX);
        assert!(DEFAULT_RANDOM_MULTIPLIER_MIN <= DEFAULT_RANDOM_MULTIPLIER_MAX);
        assert!(RECENT_BUCKETS <= DEFAULT_BUCKET_COUNT);
    }
}

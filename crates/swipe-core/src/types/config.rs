//! # Swipe Configuration
//!
//! Tuning knobs for bucket geometry and the price delta formula.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::{CoreResult, SwipeCoreError};

/// Swipe engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Seconds covered by one bucket
    pub bucket_duration_secs: i64,

    /// Maximum number of buckets retained in a token
    pub bucket_count: usize,

    /// Lower bound of the base change, as a fraction of the current price
    pub base_percent_min: f64,

    /// Upper bound of the base change, as a fraction of the current price
    pub base_percent_max: f64,

    /// Lower bound of the random multiplier
    pub random_multiplier_min: f64,

    /// Upper bound of the random multiplier
    pub random_multiplier_max: f64,

    /// Consecutive same-direction buckets before a streak counts
    pub streak_threshold: usize,

    /// Multiplier applied when a swipe continues the user's streak
    pub streak_penalty: f64,
}

impl SwipeConfig {
    /// Validate configuration
    pub fn validate(&self) -> CoreResult<()> {
        if self.bucket_duration_secs <= 0 {
            return Err(SwipeCoreError::invalid_parameter(
                "bucket_duration_secs",
                &self.bucket_duration_secs.to_string(),
                "greater than 0",
            ));
        }

        if self.bucket_count == 0 {
            return Err(SwipeCoreError::invalid_parameter("bucket_count", "0", "greater than 0"));
        }

        validate_range(
            "base_percent_min",
            "base_percent_max",
            self.base_percent_min,
            self.base_percent_max,
        )?;

        validate_range(
            "random_multiplier_min",
            "random_multiplier_max",
            self.random_multiplier_min,
            self.random_multiplier_max,
        )?;

        if self.streak_threshold == 0 {
            return Err(SwipeCoreError::invalid_parameter("streak_threshold", "0", "at least 1"));
        }

        if !self.streak_penalty.is_finite() || self.streak_penalty < 0.0 {
            return Err(SwipeCoreError::invalid_parameter(
                "streak_penalty",
                &self.streak_penalty.to_string(),
                "a finite value >= 0",
            ));
        }

        Ok(())
    }

    /// Seconds covered by the "recent" counters of [`SwipeStats`](crate::SwipeStats)
    pub fn recent_window_secs(&self) -> i64 {
        RECENT_BUCKETS.min(self.bucket_count) as i64 * self.bucket_duration_secs
    }

    /// Seconds of inactivity after which a token carries no history at all
    pub fn session_span_secs(&self) -> i64 {
        self.bucket_count as i64 * self.bucket_duration_secs
    }
}

fn validate_range(min_name: &str, max_name: &str, min: f64, max: f64) -> CoreResult<()> {
    if !min.is_finite() || min < 0.0 {
        return Err(SwipeCoreError::invalid_parameter(
            min_name,
            &min.to_string(),
            "a finite value >= 0",
        ));
    }

    if !max.is_finite() || max < min {
        return Err(SwipeCoreError::invalid_parameter(
            max_name,
            &max.to_string(),
            &format!("a finite value >= {} ({})", min_name, min),
        ));
    }

    Ok(())
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            bucket_duration_secs: DEFAULT_BUCKET_DURATION_SECS,
            bucket_count: DEFAULT_BUCKET_COUNT,
            base_percent_min: DEFAULT_BASE_PERCENT_MIN,
            base_percent_max: DEFAULT_BASE_PERCENT_MAX,
            random_multiplier_min: DEFAULT_RANDOM_MULTIPLIER_MIN,
            random_multiplier_max: DEFAULT_RANDOM_MULTIPLIER_MAX,
            streak_threshold: DEFAULT_STREAK_THRESHOLD,
            streak_penalty: DEFAULT_STREAK_PENALTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = SwipeConfig::default();
        assert!(config.validate().is_ok());

        // Test invalid bucket duration
        config.bucket_duration_secs = 0;
        assert!(config.validate().is_err());

        config = SwipeConfig::default();
        config.base_percent_max = 0.001;
        assert!(config.validate().is_err());

        config = SwipeConfig::default();
        config.random_multiplier_min = f64::NAN;
        assert!(config.validate().is_err());

        config = SwipeConfig::default();
        config.streak_threshold = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_ranges_are_allowed() {
        let config = SwipeConfig {
            base_percent_min: 0.02,
            base_percent_max: 0.02,
            random_multiplier_min: 1.0,
            random_multiplier_max: 1.0,
            ..SwipeConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_window_spans() {
        let config = SwipeConfig::default();
        assert_eq!(config.recent_window_secs(), 60);
        assert_eq!(config.session_span_secs(), 600);

        let tiny = SwipeConfig {
            bucket_count: 2,
            bucket_duration_secs: 5,
            ..SwipeConfig::default()
        };
        assert_eq!(tiny.recent_window_secs(), 10);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SwipeConfig = serde_json::from_str(r#"{"bucket_count": 12}"#).unwrap();
        assert_eq!(config.bucket_count, 12);
        assert_eq!(config.bucket_duration_secs, DEFAULT_BUCKET_DURATION_SECS);
        assert_eq!(config.streak_penalty, DEFAULT_STREAK_PENALTY);
    }
}

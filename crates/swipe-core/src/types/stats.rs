//! # Swipe Statistics
//!
//! Behavioural summary derived from a token on every request.

use serde::{Deserialize, Serialize};

use crate::constants::NEUTRAL_PICKINESS;
use crate::types::direction::SwipeDirection;

/// Statistics extracted from a token's buckets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwipeStats {
    /// Left swipes across all retained buckets
    pub total_left: u64,
    /// Right swipes across all retained buckets
    pub total_right: u64,
    /// Left swipes in the recent buckets
    pub recent_left: u64,
    /// Right swipes in the recent buckets
    pub recent_right: u64,
    /// Direction of the current streak, if it reached the threshold
    pub streak_direction: Option<SwipeDirection>,
    /// Length of the reported streak in buckets (0 when none)
    pub streak_length: usize,
    /// Share of left swipes: 0 = all right, 1 = all left
    pub pickiness_ratio: f64,
}

impl SwipeStats {
    pub fn total(&self) -> u64 {
        self.total_left + self.total_right
    }

    /// Whether a swipe in `direction` continues the reported streak
    pub fn continues_streak(&self, direction: SwipeDirection) -> bool {
        self.streak_direction == Some(direction)
    }
}

impl Default for SwipeStats {
    fn default() -> Self {
        Self {
            total_left: 0,
            total_right: 0,
            recent_left: 0,
            recent_right: 0,
            streak_direction: None,
            streak_length: 0,
            pickiness_ratio: NEUTRAL_PICKINESS,
        }
    }
}

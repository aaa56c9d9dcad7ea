//! # Token Analysis
//!
//! Derives [`SwipeStats`] from a token's buckets: totals, recent activity,
//! pickiness and the leading single-direction streak.

use super::SwipeToken;
use crate::constants::{NEUTRAL_PICKINESS, RECENT_BUCKETS};
use crate::types::config::SwipeConfig;
use crate::types::direction::SwipeDirection;
use crate::types::stats::SwipeStats;

impl SwipeToken {
    /// Summarize the swipe history held by this token
    pub fn analyze(&self, config: &SwipeConfig) -> SwipeStats {
        let mut stats = SwipeStats::default();

        if self.buckets().is_empty() {
            return stats;
        }

        for bucket in self.buckets().iter() {
            stats.total_left += u64::from(bucket.left);
            stats.total_right += u64::from(bucket.right);
        }

        for bucket in self.buckets().iter().take(RECENT_BUCKETS) {
            stats.recent_left += u64::from(bucket.left);
            stats.recent_right += u64::from(bucket.right);
        }

        stats.pickiness_ratio = pickiness_ratio(stats.total_left, stats.total_right);

        if let Some((direction, length)) = self.leading_streak() {
            if length >= config.streak_threshold {
                stats.streak_direction = Some(direction);
                stats.streak_length = length;
            }
        }

        stats
    }

    /// Run of single-direction buckets starting at bucket 0, regardless of
    /// the reporting threshold. Stops at the first empty bucket, mixed
    /// bucket or change of direction.
    pub fn leading_streak(&self) -> Option<(SwipeDirection, usize)> {
        let mut streak: Option<(SwipeDirection, usize)> = None;

        for bucket in self.buckets().iter() {
            let Some(direction) = bucket.sole_direction() else {
                break;
            };

            match streak {
                None => streak = Some((direction, 1)),
                Some((current, length)) if current == direction => {
                    streak = Some((current, length + 1));
                }
                Some(_) => break,
            }
        }

        streak
    }
}

/// Share of left swipes, neutral when there is no history
pub fn pickiness_ratio(left: u64, right: u64) -> f64 {
    let total = left + right;
    if total == 0 {
        return NEUTRAL_PICKINESS;
    }

    left as f64 / total as f64
}

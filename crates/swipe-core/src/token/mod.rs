//! # Swipe Token
//!
//! Client-held, server-verifiable swipe history. The server never stores a
//! token: it decodes whatever the client sends back, records the new swipe,
//! analyzes the result and hands a freshly encoded token back out.
//!
//! The history is a [`BucketWindow`] of fixed-duration buckets anchored at
//! `last_update`. Bucket 0 is always the window that contains `last_update`.

pub mod analyze;
pub mod codec;
pub mod window;

pub use codec::*;
pub use window::*;

use crate::errors::CoreResult;
use crate::types::config::SwipeConfig;
use crate::types::direction::SwipeDirection;

/// Bucketed swipe history of one anonymous client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeToken {
    /// Unix timestamp (seconds) bucket 0 is anchored to
    pub last_update: i64,
    buckets: BucketWindow,
}

impl SwipeToken {
    /// Create an empty token anchored at `now`
    pub fn fresh(now: i64, config: &SwipeConfig) -> Self {
        Self {
            last_update: now,
            buckets: BucketWindow::new(config.bucket_count),
        }
    }

    /// Build a token from most-recent-first buckets
    pub fn from_parts(
        last_update: i64,
        buckets: Vec<Bucket>,
        config: &SwipeConfig,
    ) -> CoreResult<Self> {
        Ok(Self {
            last_update,
            buckets: BucketWindow::from_buckets(buckets, config.bucket_count)?,
        })
    }

    pub fn buckets(&self) -> &BucketWindow {
        &self.buckets
    }

    /// Record a swipe made at `now`, ageing the buckets first.
    ///
    /// Every whole bucket duration elapsed since `last_update` pushes one empty
    /// bucket to the front. A token idle for the full window span loses all of
    /// its history and restarts with a single bucket.
    pub fn update(&mut self, direction: SwipeDirection, now: i64, config: &SwipeConfig) {
        let elapsed = now.saturating_sub(self.last_update);

        if elapsed < 0 {
            // Future-dated token: nothing to age, re-anchor on the server clock
            self.last_update = now;
        } else {
            let buckets_to_shift = elapsed / config.bucket_duration_secs.max(1);
            if buckets_to_shift > 0 {
                self.buckets
                    .shift(usize::try_from(buckets_to_shift).unwrap_or(usize::MAX));
                self.last_update = now;
            }
        }

        if self.buckets.is_empty() {
            self.last_update = now;
        }

        self.buckets.record(direction);
    }
}

//! # Bucket Window
//!
//! Bounded, most-recent-first sequence of swipe buckets. The window is the
//! only owner of the bucket list and its mutators keep
//! `len() <= capacity()` at all times.

use std::collections::VecDeque;

use crate::errors::{CoreResult, SwipeCoreError};
use crate::types::direction::SwipeDirection;

/// Left/right swipe counts for one time slice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bucket {
    pub left: u32,
    pub right: u32,
}

impl Bucket {
    pub fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    pub fn is_empty(&self) -> bool {
        self.left == 0 && self.right == 0
    }

    /// Direction of the bucket when every swipe in it went the same way
    pub fn sole_direction(&self) -> Option<SwipeDirection> {
        match (self.left, self.right) {
            (l, 0) if l > 0 => Some(SwipeDirection::Left),
            (0, r) if r > 0 => Some(SwipeDirection::Right),
            _ => None,
        }
    }

    /// Count one swipe; counters saturate
    pub fn record(&mut self, direction: SwipeDirection) {
        match direction {
            SwipeDirection::Left => self.left = self.left.saturating_add(1),
            SwipeDirection::Right => self.right = self.right.saturating_add(1),
        }
    }
}

/// Most-recent-first bucket history with a fixed maximum length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketWindow {
    buckets: VecDeque<Bucket>,
    capacity: usize,
}

impl BucketWindow {
    /// Create an empty window; a capacity of 0 is raised to 1
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buckets: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a window from most-recent-first buckets, rejecting oversized input
    pub fn from_buckets(buckets: Vec<Bucket>, capacity: usize) -> CoreResult<Self> {
        let mut window = Self::new(capacity);
        if buckets.len() > window.capacity {
            return Err(SwipeCoreError::malformed_token(format!(
                "{} buckets exceeds the maximum of {}",
                buckets.len(),
                window.capacity
            )));
        }

        window.buckets.extend(buckets);
        Ok(window)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&Bucket> {
        self.buckets.get(index)
    }

    /// Iterate from the current bucket towards the oldest one
    pub fn iter(&self) -> impl Iterator<Item = &Bucket> + '_ {
        self.buckets.iter()
    }

    /// Age the window by `count` buckets: prepend empties and drop whatever
    /// falls off the end. Shifting by the capacity or more clears the window.
    pub fn shift(&mut self, count: usize) {
        if count == 0 {
            return;
        }

        if count >= self.capacity {
            self.buckets.clear();
            return;
        }

        for _ in 0..count {
            self.buckets.push_front(Bucket::default());
        }
        self.buckets.truncate(self.capacity);
    }

    /// Record a swipe in the current bucket, opening one if the window is empty
    pub fn record(&mut self, direction: SwipeDirection) {
        if self.buckets.is_empty() {
            self.buckets.push_front(Bucket::default());
        }

        if let Some(current) = self.buckets.front_mut() {
            current.record(direction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sole_direction() {
        assert_eq!(Bucket::new(3, 0).sole_direction(), Some(SwipeDirection::Left));
        assert_eq!(Bucket::new(0, 1).sole_direction(), Some(SwipeDirection::Right));
        assert_eq!(Bucket::new(1, 1).sole_direction(), None);
        assert_eq!(Bucket::new(0, 0).sole_direction(), None);
    }

    #[test]
    fn test_record_saturates() {
        let mut bucket = Bucket::new(u32::MAX, 0);
        bucket.record(SwipeDirection::Left);
        assert_eq!(bucket.left, u32::MAX);
    }

    #[test]
    fn test_shift_prepends_and_truncates() {
        let mut window = BucketWindow::from_buckets(
            vec![Bucket::new(1, 0), Bucket::new(0, 2), Bucket::new(5, 5)],
            4,
        )
        .unwrap();

        window.shift(2);
        let buckets: Vec<Bucket> = window.iter().copied().collect();
        assert_eq!(
            buckets,
            vec![Bucket::default(), Bucket::default(), Bucket::new(1, 0), Bucket::new(0, 2)]
        );
    }

    #[test]
    fn test_shift_past_capacity_clears() {
        let mut window = BucketWindow::from_buckets(vec![Bucket::new(4, 4)], 3).unwrap();
        window.shift(3);
        assert!(window.is_empty());

        window.record(SwipeDirection::Right);
        assert_eq!(window.len(), 1);
        assert_eq!(window.get(0), Some(&Bucket::new(0, 1)));
    }

    #[test]
    fn test_from_buckets_rejects_oversized_input() {
        let buckets = vec![Bucket::default(); 5];
        assert!(BucketWindow::from_buckets(buckets, 4).is_err());
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let window = BucketWindow::new(0);
        assert_eq!(window.capacity(), 1);
    }
}

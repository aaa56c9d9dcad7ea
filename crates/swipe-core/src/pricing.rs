//! # Swipe Price Delta
//!
//! Maps a swipe and the swiper's history onto a signed price change:
//!
//! ```text
//! delta = price * base_percent * random_multiplier * streak_multiplier * pickiness_multiplier
//! ```
//!
//! negated for left swipes. `base_percent` and `random_multiplier` are drawn
//! uniformly from their configured ranges using the caller's RNG.

use rand::Rng;

use crate::constants::{APPROVING_THRESHOLD, NEUTRAL_PICKINESS, PICKY_THRESHOLD};
use crate::types::config::SwipeConfig;
use crate::types::direction::SwipeDirection;
use crate::types::stats::SwipeStats;

/// Signed price change for one swipe. The result is not clamped; see
/// [`apply_price_delta`].
pub fn calculate_price_delta<R: Rng + ?Sized>(
    current_price: f64,
    direction: SwipeDirection,
    stats: &SwipeStats,
    config: &SwipeConfig,
    rng: &mut R,
) -> f64 {
    let base_percent = uniform(rng, config.base_percent_min, config.base_percent_max);
    let base_delta = current_price * base_percent;

    let random_multiplier = uniform(
        rng,
        config.random_multiplier_min,
        config.random_multiplier_max,
    );

    let streak_multiplier = streak_multiplier(direction, stats, config);
    let pickiness_multiplier = pickiness_multiplier(direction, stats.pickiness_ratio);

    let magnitude = base_delta * random_multiplier * streak_multiplier * pickiness_multiplier;
    magnitude * direction.sign()
}

/// New price after applying `delta`, floored at zero
pub fn apply_price_delta(current_price: f64, delta: f64) -> f64 {
    (current_price + delta).max(0.0)
}

/// Dampen users who keep swiping the way their streak already goes
pub fn streak_multiplier(
    direction: SwipeDirection,
    stats: &SwipeStats,
    config: &SwipeConfig,
) -> f64 {
    if stats.continues_streak(direction) {
        config.streak_penalty
    } else {
        1.0
    }
}

/// Boost contrarian swipes: a picky user's approval and an approving
/// user's rejection both count for more.
pub fn pickiness_multiplier(direction: SwipeDirection, pickiness_ratio: f64) -> f64 {
    match direction {
        SwipeDirection::Right if pickiness_ratio > PICKY_THRESHOLD => {
            1.0 + (pickiness_ratio - NEUTRAL_PICKINESS)
        }
        SwipeDirection::Left if pickiness_ratio < APPROVING_THRESHOLD => {
            1.0 + (NEUTRAL_PICKINESS - pickiness_ratio)
        }
        _ => 1.0,
    }
}

// Inclusive draw; `gen_range` panics on an empty range, so a degenerate one is returned as-is
fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min < max {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed_config() -> SwipeConfig {
        SwipeConfig {
            base_percent_min: 0.02,
            base_percent_max: 0.02,
            random_multiplier_min: 1.0,
            random_multiplier_max: 1.0,
            ..SwipeConfig::default()
        }
    }

    #[test]
    fn test_fixed_multipliers() {
        let config = fixed_config();
        let mut rng = StdRng::seed_from_u64(1);
        let stats = SwipeStats::default();

        let up = calculate_price_delta(100.0, SwipeDirection::Right, &stats, &config, &mut rng);
        assert_relative_eq!(up, 2.0);

        let down = calculate_price_delta(100.0, SwipeDirection::Left, &stats, &config, &mut rng);
        assert_relative_eq!(down, -2.0);
    }

    #[test]
    fn test_delta_within_default_bounds() {
        let config = SwipeConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let stats = SwipeStats::default();

        for _ in 0..1000 {
            let delta =
                calculate_price_delta(100.0, SwipeDirection::Right, &stats, &config, &mut rng);
            // 1% * 0.5 .. 3% * 2.0 of the price
            assert!((0.5..=6.0).contains(&delta), "delta {} out of bounds", delta);
        }
    }

    #[test]
    fn test_streak_dampening_with_same_seed() {
        let config = SwipeConfig::default();
        let streaking = SwipeStats {
            streak_direction: Some(SwipeDirection::Right),
            streak_length: 5,
            ..SwipeStats::default()
        };
        let plain = SwipeStats::default();

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let right = SwipeDirection::Right;
        let damped = calculate_price_delta(250.0, right, &streaking, &config, &mut rng_a);
        let full = calculate_price_delta(250.0, right, &plain, &config, &mut rng_b);

        assert_relative_eq!(damped.abs(), config.streak_penalty * full.abs(), epsilon = 1e-12);
    }

    #[test]
    fn test_streak_in_other_direction_is_not_dampened() {
        let config = fixed_config();
        let stats = SwipeStats {
            streak_direction: Some(SwipeDirection::Left),
            streak_length: 8,
            ..SwipeStats::default()
        };
        let mut rng = StdRng::seed_from_u64(3);

        let delta = calculate_price_delta(100.0, SwipeDirection::Right, &stats, &config, &mut rng);
        assert_relative_eq!(delta, 2.0);
    }

    #[test]
    fn test_pickiness_multiplier() {
        // Picky user approving
        assert_relative_eq!(pickiness_multiplier(SwipeDirection::Right, 0.9), 1.4);
        // Approving user rejecting
        assert_relative_eq!(pickiness_multiplier(SwipeDirection::Left, 0.1), 1.4);
        // Thresholds are exclusive
        assert_eq!(pickiness_multiplier(SwipeDirection::Right, 0.6), 1.0);
        assert_eq!(pickiness_multiplier(SwipeDirection::Left, 0.4), 1.0);
        // Swipes that agree with the user's habit get no bonus
        assert_eq!(pickiness_multiplier(SwipeDirection::Left, 0.9), 1.0);
        assert_eq!(pickiness_multiplier(SwipeDirection::Right, 0.1), 1.0);
    }

    #[test]
    fn test_apply_price_delta_clamps_at_zero() {
        assert_eq!(apply_price_delta(1.0, -5.0), 0.0);
        assert_relative_eq!(apply_price_delta(100.0, -2.5), 97.5);
        assert_relative_eq!(apply_price_delta(100.0, 2.5), 102.5);
    }
}

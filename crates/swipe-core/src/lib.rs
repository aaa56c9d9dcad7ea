//! # Swipe Core - Shared Swipe Logic
//!
//! This crate contains the pure logic behind the swipe engine of the party
//! stock exchange. It provides:
//!
//! - Swipe direction and price change types
//! - The client-held swipe token (bucketed history, codec, analysis)
//! - The price delta calculation fed by the analyzed statistics
//! - Configuration values and their validation
//!
//! Nothing in here touches storage, networking or clocks: every operation
//! that depends on time takes the current unix timestamp as an argument, and
//! every random draw comes from a caller supplied [`rand::Rng`].

pub mod constants;
pub mod errors;
pub mod pricing;
pub mod token;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use errors::{CoreResult, SwipeCoreError};
pub use pricing::{apply_price_delta, calculate_price_delta};
pub use token::{max_encoded_len, Bucket, BucketWindow, SwipeToken, TOKEN_ENGINE};
pub use types::*;

//! # Core Type Definitions
//!
//! Shared type definitions for the swipe engine and its callers.

pub mod config;
pub mod direction;
pub mod stats;

// Re-export all types
pub use config::*;
pub use direction::*;
pub use stats::*;

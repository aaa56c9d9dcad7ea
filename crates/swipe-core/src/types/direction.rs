//! # Direction Types
//!
//! Swipe directions and the price change kinds they produce.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SwipeCoreError;

/// Direction of a single swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    /// Disapprove, pushes the price down
    Left,
    /// Approve, pushes the price up
    Right,
}

impl SwipeDirection {
    /// Sign applied to a price delta for this direction
    pub fn sign(&self) -> f64 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }

    /// Kind of price event a swipe in this direction records
    pub fn change_type(&self) -> ChangeType {
        match self {
            SwipeDirection::Left => ChangeType::SwipeDown,
            SwipeDirection::Right => ChangeType::SwipeUp,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwipeDirection {
    type Err = SwipeCoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(SwipeDirection::Left),
            "right" => Ok(SwipeDirection::Right),
            other => Err(SwipeCoreError::invalid_parameter(
                "direction",
                other,
                "\"left\" or \"right\"",
            )),
        }
    }
}

/// Why a price event was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// Listing price of a new stock
    Initial,
    /// Right swipe
    SwipeUp,
    /// Left swipe
    SwipeDown,
    /// Market noise not caused by a swipe
    Random,
    /// Manual correction by an operator
    Admin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!("left".parse::<SwipeDirection>().unwrap(), SwipeDirection::Left);
        assert_eq!(" RIGHT ".parse::<SwipeDirection>().unwrap(), SwipeDirection::Right);
        assert!("up".parse::<SwipeDirection>().is_err());
    }

    #[test]
    fn test_direction_serde_matches_wire_names() {
        let json = serde_json::to_string(&SwipeDirection::Right).unwrap();
        assert_eq!(json, "\"right\"");

        let parsed: SwipeDirection = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(parsed, SwipeDirection::Left);

        let change = serde_json::to_string(&ChangeType::SwipeDown).unwrap();
        assert_eq!(change, "\"swipe_down\"");
    }

    #[test]
    fn test_change_type_wire_names() {
        let names: Vec<String> = [
            ChangeType::Initial,
            ChangeType::SwipeUp,
            ChangeType::SwipeDown,
            ChangeType::Random,
            ChangeType::Admin,
        ]
        .iter()
        .map(|change| serde_json::to_string(change).unwrap())
        .collect();
        assert_eq!(
            names,
            vec!["\"initial\"", "\"swipe_up\"", "\"swipe_down\"", "\"random\"", "\"admin\""]
        );

        let parsed: ChangeType = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, ChangeType::Admin);
    }

    #[test]
    fn test_change_type_follows_direction() {
        assert_eq!(SwipeDirection::Left.change_type(), ChangeType::SwipeDown);
        assert_eq!(SwipeDirection::Right.change_type(), ChangeType::SwipeUp);
        assert_eq!(SwipeDirection::Left.sign(), -1.0);
    }
}

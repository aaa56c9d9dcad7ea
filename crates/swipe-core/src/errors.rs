//! # Core Error Types
//!
//! Errors raised by the pure swipe logic. Token decoding failures never reach
//! end users (the engine falls back to a fresh token), but they are still
//! typed so callers can log why a token was discarded.

use thiserror::Error;

/// Core swipe errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwipeCoreError {
    // ========================================================================
    // Token Errors
    // ========================================================================

    #[error("Malformed swipe token: {0}")]
    MalformedToken(String),

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid parameter '{name}': got {value}, expected {expected}")]
    InvalidParameter {
        name: String,
        value: String,
        expected: String,
    },
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, SwipeCoreError>;

// Helper functions for creating specific errors
impl SwipeCoreError {
    /// Create a malformed token error with reason
    pub fn malformed_token(reason: impl ToString) -> Self {
        Self::MalformedToken(reason.to_string())
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &str, value: &str, expected: &str) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SwipeCoreError::malformed_token("invalid base64");
        assert_eq!(format!("{}", err), "Malformed swipe token: invalid base64");

        let err = SwipeCoreError::invalid_parameter("bucket_count", "0", "greater than 0");
        assert_eq!(
            format!("{}", err),
            "Invalid parameter 'bucket_count': got 0, expected greater than 0"
        );
    }
}

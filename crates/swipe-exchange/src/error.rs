//! Error types for the swipe service

use swipe_core::SwipeCoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Stock not found: {0}")]
    TickerNotFound(String),

    #[error("Stock already listed: {0}")]
    TickerExists(String),

    #[error("Timed out after {waited_ms}ms waiting for the {ticker} price gate")]
    GateTimeout { ticker: String, waited_ms: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Result type using exchange errors
pub type ExchangeResult<T> = Result<T, ExchangeError>;

impl ExchangeError {
    /// Whether the request named a ticker that is not listed
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExchangeError::TickerNotFound(_))
    }
}

impl From<SwipeCoreError> for ExchangeError {
    fn from(err: SwipeCoreError) -> Self {
        ExchangeError::InvalidConfig(err.to_string())
    }
}

impl From<std::io::Error> for ExchangeError {
    fn from(err: std::io::Error) -> Self {
        ExchangeError::Io(err.to_string())
    }
}

impl From<toml::ser::Error> for ExchangeError {
    fn from(err: toml::ser::Error) -> Self {
        ExchangeError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ExchangeError {
    fn from(err: config::ConfigError) -> Self {
        ExchangeError::InvalidConfig(err.to_string())
    }
}

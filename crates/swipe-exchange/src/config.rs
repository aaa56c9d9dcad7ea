use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use swipe_core::{SwipeConfig, SwipeCoreError};
use tracing::info;

use crate::error::{ExchangeError, ExchangeResult};

/// Prefix of environment overrides, e.g. `SWIPE_EXCHANGE__SWIPE__BUCKET_COUNT=12`
pub const ENV_PREFIX: &str = "SWIPE_EXCHANGE";

/// Separator between prefix, section and key in environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Exchange configuration, loaded from an optional TOML file plus environment overrides
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// Swipe engine tuning
    pub swipe: SwipeConfig,

    /// Market defaults
    pub market: MarketConfig,

    /// Per-ticker price gate
    pub gate: GateConfig,

    /// Log output
    pub logging: LoggingConfig,
}

/// Market defaults
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Price reported for a listed stock without any price events
    pub stock_base_price: f64,
}

/// Price gate configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GateConfig {
    /// Maximum wait for a ticker's gate in milliseconds (0 waits forever)
    pub acquire_timeout_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is not set
    pub level: String,

    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl ExchangeConfig {
    /// Load configuration from an optional TOML file layered under
    /// `SWIPE_EXCHANGE__*` environment variables
    pub fn load(path: Option<&str>) -> ExchangeResult<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`ExchangeConfig::load`], reading overrides from `env` instead
    /// of the process environment when given
    pub fn load_with_env(
        path: Option<&str>,
        env: Option<HashMap<String, String>>,
    ) -> ExchangeResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            info!("Loading configuration from {}", path);
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let config: ExchangeConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &str) -> ExchangeResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| {
            ExchangeError::Io(format!("Failed to write config file {}: {}", path, e))
        })?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ExchangeResult<()> {
        self.swipe.validate()?;
        self.market.validate()?;

        if self.logging.level.parse::<tracing::Level>().is_err() {
            return Err(ExchangeError::InvalidConfig(format!(
                "logging.level '{}' is not one of trace, debug, info, warn, error",
                self.logging.level
            )));
        }

        Ok(())
    }
}

impl MarketConfig {
    fn validate(&self) -> Result<(), SwipeCoreError> {
        if !self.stock_base_price.is_finite() || self.stock_base_price < 0.0 {
            return Err(SwipeCoreError::invalid_parameter(
                "stock_base_price",
                &self.stock_base_price.to_string(),
                "a finite value >= 0",
            ));
        }
        Ok(())
    }
}

impl GateConfig {
    /// Acquire timeout, `None` when waits are unbounded
    pub fn acquire_timeout(&self) -> Option<Duration> {
        (self.acquire_timeout_ms > 0).then(|| Duration::from_millis(self.acquire_timeout_ms))
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            stock_base_price: 1000.0,
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            acquire_timeout_ms: 5_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Create example configuration file
pub fn create_example_config(path: &str) -> ExchangeResult<()> {
    let example_config = ExchangeConfig {
        swipe: SwipeConfig::default(),
        market: MarketConfig {
            stock_base_price: 100.0,
        },
        gate: GateConfig {
            acquire_timeout_ms: 2_000,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            json: false,
        },
    };

    example_config.save(path)?;
    Ok(())
}

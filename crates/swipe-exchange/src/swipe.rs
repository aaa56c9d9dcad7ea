//! # Swipe Service
//!
//! The one operation the transport layer calls: record a swipe on a ticker,
//! move its price, and hand back an updated swipe token.
//!
//! ```text
//! ticker listed? ─no─> TickerNotFound
//!   │
//! decode token ─> update buckets ─> analyze            (no lock, no I/O)
//!   │
//! acquire ticker gate
//!   read price ─> delta ─> clamp ─> record price event
//! release gate
//!   │
//! encode token ─> SwipeResponse
//! ```

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use swipe_core::{apply_price_delta, calculate_price_delta, SwipeConfig, SwipeDirection, SwipeToken};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::ExchangeConfig;
use crate::error::{ExchangeError, ExchangeResult};
use crate::gate::TickerGate;
use crate::store::{PriceEvent, PriceStore};

/// A swipe as received from a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeRequest {
    pub ticker: String,
    pub direction: SwipeDirection,
    /// Token returned by the previous swipe, if any
    #[serde(default)]
    pub swipe_token: Option<String>,
}

/// Outcome of a swipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeResponse {
    pub ticker: String,
    pub new_price: f64,
    pub delta: f64,
    pub swipe_token: String,
}

impl SwipeRequest {
    pub fn new(ticker: &str, direction: SwipeDirection, swipe_token: Option<String>) -> Self {
        Self {
            ticker: ticker.to_string(),
            direction,
            swipe_token,
        }
    }
}

/// Applies swipes to stock prices
pub struct SwipeService {
    store: Arc<dyn PriceStore>,
    gate: TickerGate,
    config: SwipeConfig,
    clock: Arc<dyn Clock>,
    rng: Mutex<StdRng>,
}

impl SwipeService {
    /// Create a service using the wall clock and an entropy-seeded RNG
    pub fn new(store: Arc<dyn PriceStore>, config: &ExchangeConfig) -> Self {
        Self {
            store,
            gate: TickerGate::from_config(&config.gate),
            config: config.swipe.clone(),
            clock: Arc::new(SystemClock),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replace the time source used for token bucketing
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Make price deltas reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn gate(&self) -> &TickerGate {
        &self.gate
    }

    pub fn store(&self) -> &Arc<dyn PriceStore> {
        &self.store
    }

    /// Record a swipe and move the ticker's price
    pub async fn swipe(&self, request: SwipeRequest) -> ExchangeResult<SwipeResponse> {
        let ticker = request.ticker.as_str();
        let direction = request.direction;

        if !self.store.stock_exists(ticker).await? {
            warn!("Swipe on unknown ticker: {}", ticker);
            return Err(ExchangeError::TickerNotFound(ticker.to_string()));
        }

        // Token work is pure and stays outside the gate
        let now = self.clock.now();
        let mut token = SwipeToken::decode(request.swipe_token.as_deref(), &self.config, now);
        token.update(direction, now, &self.config);
        let stats = token.analyze(&self.config);

        let permit = self.gate.acquire(ticker).await?;

        let current_price = self
            .store
            .current_price(ticker)
            .await?
            .ok_or_else(|| ExchangeError::TickerNotFound(ticker.to_string()))?;

        let delta = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| ExchangeError::Storage("price RNG poisoned".to_string()))?;
            calculate_price_delta(current_price, direction, &stats, &self.config, &mut *rng)
        };
        let new_price = apply_price_delta(current_price, delta);

        self.store
            .record_price(PriceEvent::new(ticker, new_price, direction.change_type()))
            .await?;

        permit.release();

        debug!(
            "{} {} -> {:.2} (delta: {:.2}, streak: {}, pickiness: {:.2})",
            ticker, direction, new_price, delta, stats.streak_length, stats.pickiness_ratio
        );

        Ok(SwipeResponse {
            ticker: ticker.to_string(),
            new_price,
            delta,
            swipe_token: token.encode(),
        })
    }
}

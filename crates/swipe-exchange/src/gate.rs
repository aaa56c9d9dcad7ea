//! # Per-Ticker Price Gate
//!
//! Serializes price read-modify-write cycles per ticker. Each ticker gets its
//! own async mutex, created on first use and kept for the life of the
//! process; the ticker universe is small and bounded. Tasks working on
//! different tickers never contend.
//!
//! Waiters on one ticker are served in the order they started waiting
//! (tokio's mutex is FIFO), so price events for a ticker are recorded in
//! gate-acquisition order.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use crate::config::GateConfig;
use crate::error::{ExchangeError, ExchangeResult};

/// Lazily populated map of ticker → mutex
#[derive(Debug, Default)]
pub struct TickerGate {
    locks: DashMap<String, Arc<Mutex<()>>>,
    acquire_timeout: Option<Duration>,
}

/// Exclusive hold on one ticker's gate, released on drop
#[derive(Debug)]
pub struct TickerPermit {
    ticker: String,
    acquired_at: Instant,
    _guard: OwnedMutexGuard<()>,
}

impl TickerGate {
    /// Create a gate; `acquire_timeout` of `None` waits indefinitely
    pub fn new(acquire_timeout: Option<Duration>) -> Self {
        Self {
            locks: DashMap::new(),
            acquire_timeout,
        }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.acquire_timeout())
    }

    /// Wait for exclusive access to `ticker`
    pub async fn acquire(&self, ticker: &str) -> ExchangeResult<TickerPermit> {
        let lock = self.lock_for(ticker);

        let guard = match lock.clone().try_lock_owned() {
            Ok(guard) => guard,
            Err(_) => {
                debug!("Price gate for {} is busy, waiting", ticker);
                self.wait_for(ticker, lock).await?
            }
        };

        Ok(TickerPermit {
            ticker: ticker.to_string(),
            acquired_at: Instant::now(),
            _guard: guard,
        })
    }

    /// Number of tickers that have a gate
    pub fn tracked_tickers(&self) -> usize {
        self.locks.len()
    }

    /// Whether some task currently holds the gate for `ticker`
    pub fn is_held(&self, ticker: &str) -> bool {
        self.locks
            .get(ticker)
            .map(|lock| lock.try_lock().is_err())
            .unwrap_or(false)
    }

    async fn wait_for(
        &self,
        ticker: &str,
        lock: Arc<Mutex<()>>,
    ) -> ExchangeResult<OwnedMutexGuard<()>> {
        match self.acquire_timeout {
            None => Ok(lock.lock_owned().await),
            Some(limit) => tokio::time::timeout(limit, lock.lock_owned())
                .await
                .map_err(|_| {
                    warn!("Gave up on the {} price gate after {:?}", ticker, limit);
                    ExchangeError::GateTimeout {
                        ticker: ticker.to_string(),
                        waited_ms: whole_millis(limit),
                    }
                }),
        }
    }

    fn lock_for(&self, ticker: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.get(ticker) {
            return lock.clone();
        }

        self.locks
            .entry(ticker.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

// Saturates instead of truncating
fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl TickerPermit {
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Hand the gate to the next waiter
    pub fn release(self) {}
}

impl Drop for TickerPermit {
    fn drop(&mut self) {
        trace!(
            "Released {} price gate after {:?}",
            self.ticker,
            self.acquired_at.elapsed()
        );
    }
}

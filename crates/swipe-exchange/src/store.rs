//! # Price Store
//!
//! Storage port for stock prices. A stock's current price is its most recent
//! price event; events are append-only. The swipe service reads and writes
//! prices only through [`PriceStore`], so persistence stays swappable.
//!
//! [`InMemoryPriceStore`] backs tests and the simulator. It can inject a
//! fixed latency into every read and write to mimic a real database round
//! trip, which is what makes unsynchronized read-modify-write cycles lose
//! updates.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use swipe_core::ChangeType;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{ExchangeError, ExchangeResult};

/// One entry of a stock's price log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEvent {
    pub ticker: String,
    pub price: f64,
    pub change_type: ChangeType,
    pub created_at: DateTime<Utc>,
}

impl PriceEvent {
    pub fn new(ticker: &str, price: f64, change_type: ChangeType) -> Self {
        Self {
            ticker: ticker.to_string(),
            price,
            change_type,
            created_at: Utc::now(),
        }
    }
}

/// Storage port for stock prices
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Whether `ticker` is listed
    async fn stock_exists(&self, ticker: &str) -> ExchangeResult<bool>;

    /// Latest price of `ticker`, `None` when it is not listed
    async fn current_price(&self, ticker: &str) -> ExchangeResult<Option<f64>>;

    /// Append a price event to its ticker's log
    async fn record_price(&self, event: PriceEvent) -> ExchangeResult<()>;

    /// Price log of `ticker`, oldest first
    async fn price_history(&self, ticker: &str) -> ExchangeResult<Vec<PriceEvent>>;

    /// All listed tickers, sorted
    async fn list_tickers(&self) -> ExchangeResult<Vec<String>>;
}

/// In-process price store
#[derive(Debug)]
pub struct InMemoryPriceStore {
    stocks: RwLock<HashMap<String, Vec<PriceEvent>>>,
    base_price: f64,
    latency: Option<Duration>,
}

impl InMemoryPriceStore {
    /// Create an empty store; `base_price` is reported for stocks with no events
    pub fn new(base_price: f64) -> Self {
        Self {
            stocks: RwLock::new(HashMap::new()),
            base_price,
            latency: None,
        }
    }

    /// Delay every read and write by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// List a new stock, recording `initial_price` as its first event
    pub async fn list_stock(&self, ticker: &str, initial_price: Option<f64>) -> ExchangeResult<()> {
        let mut stocks = self.stocks.write().await;
        if stocks.contains_key(ticker) {
            return Err(ExchangeError::TickerExists(ticker.to_string()));
        }

        let events = match initial_price {
            Some(price) => vec![PriceEvent::new(ticker, price.max(0.0), ChangeType::Initial)],
            None => Vec::new(),
        };
        stocks.insert(ticker.to_string(), events);

        debug!("Listed {} at {:?}", ticker, initial_price);
        Ok(())
    }

    async fn simulate_io(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl PriceStore for InMemoryPriceStore {
    async fn stock_exists(&self, ticker: &str) -> ExchangeResult<bool> {
        Ok(self.stocks.read().await.contains_key(ticker))
    }

    async fn current_price(&self, ticker: &str) -> ExchangeResult<Option<f64>> {
        self.simulate_io().await;

        let stocks = self.stocks.read().await;
        Ok(stocks.get(ticker).map(|events| {
            events
                .last()
                .map(|event| event.price)
                .unwrap_or(self.base_price)
        }))
    }

    async fn record_price(&self, event: PriceEvent) -> ExchangeResult<()> {
        self.simulate_io().await;

        let mut stocks = self.stocks.write().await;
        let events = stocks
            .get_mut(&event.ticker)
            .ok_or_else(|| ExchangeError::TickerNotFound(event.ticker.clone()))?;
        events.push(event);
        Ok(())
    }

    async fn price_history(&self, ticker: &str) -> ExchangeResult<Vec<PriceEvent>> {
        self.stocks
            .read()
            .await
            .get(ticker)
            .cloned()
            .ok_or_else(|| ExchangeError::TickerNotFound(ticker.to_string()))
    }

    async fn list_tickers(&self) -> ExchangeResult<Vec<String>> {
        let mut tickers: Vec<String> = self.stocks.read().await.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }
}

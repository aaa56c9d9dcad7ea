//! Swipe service for the party stock exchange.
//!
//! Applies swipes to stock prices: each swipe reads the ticker's current
//! price, moves it by a randomized delta shaped by the swiper's token, and
//! records the result. Read-modify-write cycles are serialized per ticker by
//! [`TickerGate`]; everything else runs concurrently.

pub mod clock;
pub mod config;
pub mod error;
pub mod gate;
pub mod store;
pub mod swipe;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{create_example_config, ExchangeConfig, GateConfig, LoggingConfig, MarketConfig};
pub use error::{ExchangeError, ExchangeResult};
pub use gate::{TickerGate, TickerPermit};
pub use store::{InMemoryPriceStore, PriceEvent, PriceStore};
pub use swipe::{SwipeRequest, SwipeResponse, SwipeService};

//! Swipe Exchange Simulator
//!
//! Lists a set of tickers and lets a crowd of simulated swipers loose on
//! them, each keeping its own swipe token and leaning left or right by
//! temperament. Logs the final board.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use swipe_core::SwipeDirection;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swipe_exchange::{
    create_example_config, ExchangeConfig, ExchangeError, InMemoryPriceStore, LoggingConfig,
    PriceStore, SwipeRequest, SwipeService,
};

#[derive(Parser, Debug)]
#[command(name = "swipe-exchange")]
#[command(about = "Party stock exchange swipe simulator")]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Comma separated tickers to list
    #[arg(short, long, value_delimiter = ',', default_value = "ABCD,MEME,YOLO,HODL")]
    tickers: Vec<String>,

    /// Number of concurrent simulated swipers
    #[arg(short, long, default_value = "8")]
    swipers: usize,

    /// Swipes per swiper
    #[arg(short, long, default_value = "25")]
    rounds: usize,

    /// Seed for swiper behavior and price deltas
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between a swiper's swipes in milliseconds
    #[arg(long, default_value = "10")]
    pace_ms: u64,

    /// Simulated price store latency in milliseconds
    #[arg(long, default_value = "2")]
    store_latency_ms: u64,

    /// Write an example configuration file to this path and exit
    #[arg(long)]
    write_example_config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.write_example_config {
        create_example_config(path)?;
        println!("Wrote example configuration to {}", path);
        return Ok(());
    }

    let mut config = ExchangeConfig::load(args.config.as_deref())?;
    if args.verbose {
        config.logging.level = "debug".to_string();
    }

    init_logging(&config.logging);

    info!("Starting swipe exchange simulator");
    info!(
        "{} swipers x {} rounds over {} tickers",
        args.swipers,
        args.rounds,
        args.tickers.len()
    );

    let mut store = InMemoryPriceStore::new(config.market.stock_base_price);
    if args.store_latency_ms > 0 {
        store = store.with_latency(Duration::from_millis(args.store_latency_ms));
    }
    for ticker in listing_tickers(&args.tickers) {
        store
            .list_stock(&ticker, Some(config.market.stock_base_price))
            .await?;
    }

    let store = Arc::new(store);
    let mut service = SwipeService::new(store.clone(), &config);
    if let Some(seed) = args.seed {
        service = service.with_seed(seed);
    }
    let service = Arc::new(service);

    let tickers = store.list_tickers().await?;
    if tickers.is_empty() {
        warn!("No tickers listed, nothing to simulate");
        return Ok(());
    }
    let tickers = Arc::new(tickers);

    let mut handles = Vec::with_capacity(args.swipers);
    for swiper in 0..args.swipers {
        let service = service.clone();
        let tickers = tickers.clone();
        let seed = args
            .seed
            .map(|seed| seed.wrapping_add(swiper as u64 + 1));
        let rounds = args.rounds;
        let pace = Duration::from_millis(args.pace_ms);

        handles.push(tokio::spawn(async move {
            run_swiper(swiper, service, tickers, seed, rounds, pace).await
        }));
    }

    let mut total_swipes = 0;
    for handle in handles {
        total_swipes += handle.await??;
    }

    info!("Simulation complete: {} swipes", total_swipes);
    for ticker in tickers.iter() {
        let history = store.price_history(ticker).await?;
        let price = store.current_price(ticker).await?.unwrap_or_default();
        info!(
            "{:<6} {:>10.2} ({} price events)",
            ticker,
            price,
            history.len()
        );
    }

    Ok(())
}

/// One simulated client: keeps its own token and swipes with a personal bias
async fn run_swiper(
    id: usize,
    service: Arc<SwipeService>,
    tickers: Arc<Vec<String>>,
    seed: Option<u64>,
    rounds: usize,
    pace: Duration,
) -> Result<usize, ExchangeError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    // Probability of swiping right
    let bias: f64 = rng.gen_range(0.2..0.8);
    let mut token = None;
    let mut swipes = 0;

    debug!("Swiper {} starting with right bias {:.2}", id, bias);

    for _ in 0..rounds {
        let ticker = &tickers[rng.gen_range(0..tickers.len())];
        let direction = if rng.gen_bool(bias) {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        };

        match service
            .swipe(SwipeRequest::new(ticker, direction, token.take()))
            .await
        {
            Ok(response) => {
                token = Some(response.swipe_token);
                swipes += 1;
            }
            Err(ExchangeError::GateTimeout { ticker, waited_ms }) => {
                warn!("Swiper {} skipped {} after {}ms", id, ticker, waited_ms);
            }
            Err(e) => return Err(e),
        }

        if !pace.is_zero() {
            tokio::time::sleep(pace).await;
        }
    }

    Ok(swipes)
}

/// Trimmed, sorted tickers with blanks and repeats removed
fn listing_tickers(raw: &[String]) -> Vec<String> {
    let mut tickers: Vec<String> = raw
        .iter()
        .map(|ticker| ticker.trim().to_string())
        .filter(|ticker| !ticker.is_empty())
        .collect();
    tickers.sort();
    tickers.dedup();
    tickers
}

fn init_logging(config: &LoggingConfig) {
    let level = config.level.parse().unwrap_or(tracing::Level::INFO);
    let default_filter = format!("swipe_exchange={},swipe_core={}", level, level);

    if config.json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

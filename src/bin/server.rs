//! Help Trade Server - market structure analysis API
//!
//! Serves single-symbol analysis and market-wide scans of Bybit USDT
//! perpetuals over HTTP.
//!
//! # Usage
//! ```sh
//! PORT=10000 cargo run --bin server
//! MODE=mock cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `MODE` - `bybit` (default) or `mock` for offline demo data
//! - `PORT` / `BIND_ADDRESS` - listen address (default 0.0.0.0:10000)
//! - `METRICS_ENABLED` - expose `/metrics` (default: true)

use anyhow::{Context, Result};
use helptrade::application::scanner::MarketScanner;
use helptrade::config::Config;
use helptrade::infrastructure::ServiceFactory;
use helptrade::infrastructure::observability::Metrics;
use helptrade::interfaces::http::{self, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Help Trade Server {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Mode={:?}, Timeframe={}, Limit={}, Radius={}",
        config.mode,
        config.analysis.default_timeframe,
        config.analysis.candle_limit,
        config.analysis.extrema_radius
    );

    let market_data = ServiceFactory::create_market_data_service(&config);
    let mut scanner = MarketScanner::new(market_data, config.analyzer(), config.scan_settings());

    let metrics = if config.server.metrics_enabled {
        let metrics = Metrics::new().context("Failed to register metrics")?;
        scanner = scanner.with_metrics(metrics.clone());
        Some(metrics)
    } else {
        info!("Metrics disabled.");
        None
    };

    let state = AppState {
        scanner: Arc::new(scanner),
        metrics,
        scan_max_symbols: config.server.scan_max_symbols,
    };

    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.bind_address, config.server.port
            )
        })?;

    http::serve(state, addr, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutdown signal received. Exiting...");
    })
    .await
}

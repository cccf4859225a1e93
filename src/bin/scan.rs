//! One-off analysis from the command line.
//!
//! ```sh
//! cargo run --bin scan -- --symbol BTCUSDT --interval 4h
//! cargo run --bin scan -- --max-symbols 20
//! cargo run --bin scan -- --mock
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use helptrade::application::scanner::{MarketScanner, ScanSettings};
use helptrade::config::{Config, Mode};
use helptrade::domain::market::Timeframe;
use helptrade::infrastructure::ServiceFactory;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Market structure analysis for Bybit USDT perpetuals")]
struct Args {
    /// Analyze a single symbol instead of scanning the market
    #[arg(short, long)]
    symbol: Option<String>,

    /// Candle interval (1m, 5m, 15m, 30m, 1h, 4h, 1d)
    #[arg(short, long)]
    interval: Option<Timeframe>,

    /// Candles to fetch per symbol
    #[arg(short, long)]
    limit: Option<usize>,

    /// Swing detection radius in bars
    #[arg(short, long)]
    radius: Option<usize>,

    /// Symbols to scan when no --symbol is given
    #[arg(long)]
    max_symbols: Option<usize>,

    /// Use the built-in demo data instead of Bybit
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if args.mock {
        config.mode = Mode::Mock;
    }

    let defaults = config.scan_settings();
    let settings = ScanSettings {
        timeframe: args.interval.unwrap_or(defaults.timeframe),
        limit: args.limit.unwrap_or(defaults.limit),
        extrema_radius: args.radius.unwrap_or(defaults.extrema_radius),
        ..defaults
    };

    let market_data = ServiceFactory::create_market_data_service(&config);
    let scanner = MarketScanner::new(market_data, config.analyzer(), settings);

    let output = match args.symbol {
        Some(symbol) => {
            let symbol = symbol.to_uppercase();
            info!("Analyzing {} on {}", symbol, settings.timeframe);
            let analysis = scanner
                .analyze_symbol(&symbol, settings.timeframe, settings.limit, settings.extrema_radius)
                .await
                .with_context(|| format!("Analysis of {} failed", symbol))?;
            serde_json::to_string_pretty(&analysis)?
        }
        None => {
            let max_symbols = args.max_symbols.unwrap_or(config.server.scan_max_symbols);
            let market = scanner.scan_market(max_symbols).await?;
            info!(
                "Scanned {} of {} pairs",
                market.report.total_symbols,
                market.total_pairs()
            );
            serde_json::to_string_pretty(&market.report)?
        }
    };

    println!("{}", output);
    Ok(())
}

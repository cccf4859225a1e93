use crate::domain::errors::MarketDataError;
use crate::domain::market::{Candle, Timeframe};
use crate::domain::ports::MarketDataService;
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

const BASE_TIMESTAMP_MS: i64 = 1_704_067_200_000; // 2024-01-01 00:00:00 UTC
const HOUR_MS: i64 = 3_600_000;

/// In-memory market data source for tests and `MODE=mock`
#[derive(Debug, Clone, Default)]
pub struct MockMarketDataService {
    candles: BTreeMap<String, Vec<Candle>>,
    failing: BTreeSet<String>,
}

impl MockMarketDataService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small universe of synthetic symbols for running the server offline
    pub fn with_demo_universe() -> Self {
        Self::new()
            .with_candles("BTCUSDT", Self::zigzag_candles(400))
            .with_candles("ETHUSDT", Self::trending_candles(400, 2_000.0, 1.5))
            .with_candles("SOLUSDT", Self::trending_candles(400, 150.0, -0.1))
            .with_candles("NEWUSDT", Self::trending_candles(60, 1.0, 0.01))
    }

    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.candles.insert(symbol.to_string(), candles);
        self
    }

    /// `symbol` is listed but every fetch fails as if the API were down
    pub fn with_failure(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }

    /// Straight-line closes `start + i * step` with a 0.5 band and flat volume
    pub fn trending_candles(bars: usize, start: f64, step: f64) -> Vec<Candle> {
        (0..bars)
            .map(|i| candle_at(i, start + i as f64 * step, 0.5, 1_000))
            .collect()
    }

    /// Rising zig-zag (legs of 10 bars) ending on a volume spike
    pub fn zigzag_candles(bars: usize) -> Vec<Candle> {
        (0..bars)
            .map(|i| {
                let phase = (i % 20) as f64;
                let wave = if phase < 10.0 { phase } else { 20.0 - phase };
                let volume = if i + 1 == bars { 5_000 } else { 1_000 };
                candle_at(i, 100.0 + i as f64 * 0.5 + wave * 2.0, 1.0, volume)
            })
            .collect()
    }
}

fn candle_at(i: usize, mid: f64, half_range: f64, volume: i64) -> Candle {
    let price = |v: f64| Decimal::from_f64(v).unwrap_or_default();
    Candle {
        timestamp: BASE_TIMESTAMP_MS + i as i64 * HOUR_MS,
        open: price(mid),
        high: price(mid + half_range),
        low: price(mid - half_range),
        close: price(mid),
        volume: Decimal::from(volume),
    }
}

#[async_trait]
impl MarketDataService for MockMarketDataService {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        if self.failing.contains(symbol) {
            return Err(MarketDataError::DataSourceUnavailable {
                reason: format!("mock outage for {}", symbol),
            });
        }

        let candles = self
            .candles
            .get(symbol)
            .ok_or_else(|| MarketDataError::UnknownSymbol {
                symbol: symbol.to_string(),
            })?;

        info!(
            "MockMarketDataService: Serving {} {} candles for {}",
            candles.len().min(limit),
            timeframe,
            symbol
        );

        let skip = candles.len().saturating_sub(limit);
        Ok(candles[skip..].to_vec())
    }

    async fn list_usdt_perpetuals(&self) -> Result<Vec<String>, MarketDataError> {
        let symbols: BTreeSet<String> = self
            .candles
            .keys()
            .chain(self.failing.iter())
            .filter(|s| s.ends_with("USDT"))
            .cloned()
            .collect();
        Ok(symbols.into_iter().collect())
    }
}

use crate::domain::errors::{AnalysisError, MarketDataError};
use crate::domain::market::{Candle, CandleSeries, IndicatorFrame, IndicatorPeriods, Timeframe};
use async_trait::async_trait;

/// Turns a candle series into aligned indicator series.
///
/// Implementations must return `InsufficientData` instead of a frame with
/// fabricated values.
pub trait IndicatorAdapter: Send + Sync {
    fn name(&self) -> &str;

    fn compute(
        &self,
        candles: &CandleSeries,
        periods: &IndicatorPeriods,
    ) -> Result<IndicatorFrame, AnalysisError>;
}

// Need async_trait for async functions in traits
#[async_trait]
pub trait MarketDataService: Send + Sync {
    /// Latest `limit` candles for `symbol`, in whatever order the source returns them.
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;

    async fn list_usdt_perpetuals(&self) -> Result<Vec<String>, MarketDataError>;
}

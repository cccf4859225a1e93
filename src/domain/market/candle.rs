use crate::domain::errors::AnalysisError;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    /// Bar open time, Unix milliseconds
    pub timestamp: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// An oldest-to-newest run of candles with strictly increasing timestamps.
///
/// Gaps between bars are tolerated and left as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Result<Self, AnalysisError> {
        for (i, candle) in candles.iter().enumerate() {
            if candle.low > candle.high {
                return Err(AnalysisError::malformed(format!(
                    "bar {} has low {} above high {}",
                    i, candle.low, candle.high
                )));
            }
            if candle.volume < Decimal::ZERO {
                return Err(AnalysisError::malformed(format!(
                    "bar {} has negative volume {}",
                    i, candle.volume
                )));
            }
        }

        if let Some(pos) = candles
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
        {
            return Err(AnalysisError::malformed(format!(
                "timestamps not strictly increasing at bar {} ({} -> {})",
                pos + 1,
                candles[pos].timestamp,
                candles[pos + 1].timestamp
            )));
        }

        Ok(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn highs(&self) -> Result<Vec<f64>, AnalysisError> {
        self.column("high", |c| c.high)
    }

    pub fn lows(&self) -> Result<Vec<f64>, AnalysisError> {
        self.column("low", |c| c.low)
    }

    pub fn closes(&self) -> Result<Vec<f64>, AnalysisError> {
        self.column("close", |c| c.close)
    }

    pub fn volumes(&self) -> Result<Vec<f64>, AnalysisError> {
        self.column("volume", |c| c.volume)
    }

    fn column(
        &self,
        field: &str,
        get: impl Fn(&Candle) -> Decimal,
    ) -> Result<Vec<f64>, AnalysisError> {
        self.candles
            .iter()
            .enumerate()
            .map(|(i, c)| {
                get(c).to_f64().ok_or_else(|| {
                    AnalysisError::malformed(format!("bar {} {} is not representable", i, field))
                })
            })
            .collect()
    }
}

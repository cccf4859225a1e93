//! Analysis configuration parsing from environment variables.
//!
//! Indicator periods, swing radius and the default candle window.

use super::parse_or;
use crate::application::analysis::{DEFAULT_EXTREMA_RADIUS, MIN_ANALYSIS_BARS};
use crate::domain::market::{IndicatorPeriods, Timeframe};
use anyhow::{Context, Result, ensure};

/// Analysis environment configuration
#[derive(Debug, Clone)]
pub struct AnalysisEnvConfig {
    pub periods: IndicatorPeriods,
    pub extrema_radius: usize,
    pub default_timeframe: Timeframe,
    pub candle_limit: usize,
}

impl AnalysisEnvConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = IndicatorPeriods::default();
        let periods = IndicatorPeriods {
            rsi: parse_or(lookup, "RSI_PERIOD", defaults.rsi)?,
            macd_fast: parse_or(lookup, "MACD_FAST_PERIOD", defaults.macd_fast)?,
            macd_slow: parse_or(lookup, "MACD_SLOW_PERIOD", defaults.macd_slow)?,
            macd_signal: parse_or(lookup, "MACD_SIGNAL_PERIOD", defaults.macd_signal)?,
            ma_fast: parse_or(lookup, "MA_FAST_PERIOD", defaults.ma_fast)?,
            ma_slow: parse_or(lookup, "MA_SLOW_PERIOD", defaults.ma_slow)?,
            volume_avg: parse_or(lookup, "VOLUME_AVG_PERIOD", defaults.volume_avg)?,
        };

        let default_timeframe = lookup("DEFAULT_TIMEFRAME")
            .unwrap_or_else(|| "1h".to_string())
            .parse::<Timeframe>()
            .context("Failed to parse DEFAULT_TIMEFRAME")?;

        let config = Self {
            periods,
            extrema_radius: parse_or(lookup, "EXTREMA_RADIUS", DEFAULT_EXTREMA_RADIUS)?,
            default_timeframe,
            candle_limit: parse_or(lookup, "CANDLE_LIMIT", 300)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let p = &self.periods;
        ensure!(
            [p.rsi, p.macd_fast, p.macd_slow, p.macd_signal, p.ma_fast, p.ma_slow, p.volume_avg]
                .iter()
                .all(|&v| v > 0),
            "Indicator periods must be > 0"
        );
        ensure!(
            p.macd_fast < p.macd_slow,
            "MACD_FAST_PERIOD ({}) must be below MACD_SLOW_PERIOD ({})",
            p.macd_fast,
            p.macd_slow
        );
        ensure!(self.extrema_radius > 0, "EXTREMA_RADIUS must be >= 1");
        let required = p.required_bars().max(MIN_ANALYSIS_BARS);
        ensure!(
            self.candle_limit >= required,
            "CANDLE_LIMIT ({}) is below the {} bars an analysis needs",
            self.candle_limit,
            required
        );
        Ok(())
    }
}

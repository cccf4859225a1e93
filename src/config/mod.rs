//! Configuration module for Help Trade.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Analysis, Market Data, and Server.

mod analysis_config;
mod market_data_config;
mod server_config;

pub use analysis_config::AnalysisEnvConfig;
pub use market_data_config::MarketDataEnvConfig;
pub use server_config::ServerEnvConfig;

use crate::application::analysis::MarketStructureAnalyzer;
use crate::application::scanner::ScanSettings;
use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Where candles come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Bybit,
    Mock,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bybit" => Ok(Mode::Bybit),
            "mock" => Ok(Mode::Mock),
            _ => anyhow::bail!("Invalid MODE: {}. Must be 'bybit' or 'mock'", s),
        }
    }
}

/// Main application configuration.
///
/// Owned by the caller and passed down explicitly; nothing here is global.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub analysis: AnalysisEnvConfig,
    pub market_data: MarketDataEnvConfig,
    pub server: ServerEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mode = lookup("MODE")
            .unwrap_or_else(|| "bybit".to_string())
            .parse::<Mode>()?;

        Ok(Self {
            mode,
            analysis: AnalysisEnvConfig::from_lookup(&lookup)
                .context("Failed to load analysis config")?,
            market_data: MarketDataEnvConfig::from_lookup(&lookup)
                .context("Failed to load market data config")?,
            server: ServerEnvConfig::from_lookup(&lookup)
                .context("Failed to load server config")?,
        })
    }

    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings {
            timeframe: self.analysis.default_timeframe,
            limit: self.analysis.candle_limit,
            extrema_radius: self.analysis.extrema_radius,
            concurrency: self.server.scan_concurrency,
        }
    }

    /// Analyzer with the configured periods and swing radius
    pub fn analyzer(&self) -> MarketStructureAnalyzer {
        MarketStructureAnalyzer::default()
            .with_periods(self.analysis.periods)
            .with_extrema_radius(self.analysis.extrema_radius)
    }
}

/// Parse `key` if present, else fall back to `default`
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}='{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

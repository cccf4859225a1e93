//! Market data source configuration parsing from environment variables.

use super::parse_or;
use anyhow::Result;
use std::time::Duration;

/// Market data environment configuration
#[derive(Debug, Clone)]
pub struct MarketDataEnvConfig {
    pub bybit_base_url: String,
    pub request_timeout: Duration,
    pub max_retries: u32,
}

impl MarketDataEnvConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            bybit_base_url: lookup("BYBIT_BASE_URL")
                .unwrap_or_else(|| "https://api.bybit.com".to_string()),
            request_timeout: Duration::from_secs(parse_or(lookup, "HTTP_TIMEOUT_SECS", 10)?),
            max_retries: parse_or(lookup, "HTTP_MAX_RETRIES", 3)?,
        })
    }
}

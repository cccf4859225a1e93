//! HTTP server and market scan configuration parsing from environment variables.

use super::parse_or;
use anyhow::{Result, ensure};

/// Server environment configuration
#[derive(Debug, Clone)]
pub struct ServerEnvConfig {
    pub bind_address: String,
    pub port: u16,
    pub scan_concurrency: usize,
    pub scan_max_symbols: usize,
    pub metrics_enabled: bool,
}

impl ServerEnvConfig {
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(lookup, "PORT", 10000)?,
            scan_concurrency: parse_or(lookup, "SCAN_CONCURRENCY", 8)?,
            scan_max_symbols: parse_or(lookup, "SCAN_MAX_SYMBOLS", 50)?,
            metrics_enabled: parse_or(lookup, "METRICS_ENABLED", true)?,
        };
        ensure!(config.scan_concurrency > 0, "SCAN_CONCURRENCY must be >= 1");
        Ok(config)
    }
}

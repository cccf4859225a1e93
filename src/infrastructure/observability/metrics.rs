//! Prometheus metrics definitions for Help Trade
//!
//! All metrics use the `helptrade_` prefix and are read-only.

use prometheus::{
    CounterVec, Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge},
};
use std::sync::Arc;

/// Prometheus metrics for the analysis service
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Symbol analyses by outcome (`ok` or an error kind)
    pub analyses_total: CounterVec,
    /// Wall-clock duration of market-wide scans
    pub scan_duration_seconds: Histogram,
    /// Symbols that failed in the most recent scan
    pub last_scan_failures: GenericGauge<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let analyses_total = CounterVec::new(
            Opts::new("helptrade_analyses_total", "Symbol analyses by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(analyses_total.clone()))?;

        let scan_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "helptrade_scan_duration_seconds",
                "Market scan duration in seconds",
            )
            .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        )?;
        registry.register(Box::new(scan_duration_seconds.clone()))?;

        let last_scan_failures = Gauge::with_opts(Opts::new(
            "helptrade_last_scan_failures",
            "Symbols that failed in the most recent scan",
        ))?;
        registry.register(Box::new(last_scan_failures.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            analyses_total,
            scan_duration_seconds,
            last_scan_failures,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn record_analysis(&self, outcome: &str) {
        self.analyses_total.with_label_values(&[outcome]).inc();
    }

    pub fn observe_scan(&self, duration_secs: f64, failures: usize) {
        self.scan_duration_seconds.observe(duration_secs);
        self.last_scan_failures.set(failures as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_counter() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.record_analysis("ok");
        metrics.record_analysis("ok");
        metrics.record_analysis("insufficient_data");
        let output = metrics.render();
        assert!(output.contains("helptrade_analyses_total{outcome=\"ok\"} 2"));
        assert!(output.contains("insufficient_data"));
    }

    #[test]
    fn test_scan_observation() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.observe_scan(1.2, 3);
        let output = metrics.render();
        assert!(output.contains("helptrade_scan_duration_seconds_count 1"));
        assert!(output.contains("helptrade_last_scan_failures 3"));
    }
}

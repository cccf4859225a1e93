use crate::application::analysis::{AnalysisReport, MarketStructureAnalyzer};
use crate::domain::errors::{AnalysisError, ScanError};
use crate::domain::market::{CandleSeries, Timeframe};
use crate::domain::ports::MarketDataService;
use crate::infrastructure::observability::Metrics;
use futures::stream::{self, StreamExt};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    pub timeframe: Timeframe,
    pub limit: usize,
    pub extrema_radius: usize,
    /// Upper bound on symbols fetched and analyzed at the same time
    pub concurrency: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::OneHour,
            limit: 300,
            extrema_radius: crate::application::analysis::DEFAULT_EXTREMA_RADIUS,
            concurrency: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub bars: usize,
    pub last_timestamp: i64,
    pub last_close: Decimal,
    pub report: AnalysisReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolFailure {
    pub symbol: String,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub total_symbols: usize,
    /// Successful analyses, best score first
    pub analyzed: Vec<SymbolAnalysis>,
    pub failures: Vec<SymbolFailure>,
    pub failure_count: usize,
}

/// A scan over the exchange's listed universe
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarketScan {
    /// Every listed USDT perpetual, in exchange order
    pub listed_symbols: Vec<String>,
    /// Analysis of the first `max_symbols` of them
    pub report: ScanReport,
}

impl MarketScan {
    pub fn total_pairs(&self) -> usize {
        self.listed_symbols.len()
    }
}

/// Runs the per-symbol analysis across many symbols with bounded concurrency.
///
/// A failing symbol is logged and counted; it never aborts the batch.
pub struct MarketScanner {
    market_data: Arc<dyn MarketDataService>,
    analyzer: MarketStructureAnalyzer,
    settings: ScanSettings,
    metrics: Option<Metrics>,
}

impl MarketScanner {
    pub fn new(
        market_data: Arc<dyn MarketDataService>,
        analyzer: MarketStructureAnalyzer,
        settings: ScanSettings,
    ) -> Self {
        Self {
            market_data,
            analyzer,
            settings,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Fetch, validate and analyze one symbol.
    pub async fn analyze_symbol(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
        extrema_radius: usize,
    ) -> Result<SymbolAnalysis, ScanError> {
        let result = self
            .fetch_and_analyze(symbol, timeframe, limit, extrema_radius)
            .await;

        if let Some(metrics) = &self.metrics {
            let outcome = match &result {
                Ok(_) => "ok",
                Err(e) => e.kind(),
            };
            metrics.record_analysis(outcome);
        }

        result
    }

    async fn fetch_and_analyze(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
        extrema_radius: usize,
    ) -> Result<SymbolAnalysis, ScanError> {
        let mut candles = self
            .market_data
            .fetch_candles(symbol, timeframe, limit)
            .await?;

        // Sources differ in ordering; the core wants oldest first
        candles.sort_by_key(|c| c.timestamp);
        let series = CandleSeries::new(candles)?;

        let report = self.analyzer.analyze_with_radius(&series, extrema_radius)?;
        let last = series.last().ok_or(AnalysisError::InsufficientData {
            required: 1,
            available: 0,
        })?;

        Ok(SymbolAnalysis {
            symbol: symbol.to_string(),
            timeframe,
            bars: series.len(),
            last_timestamp: last.timestamp,
            last_close: last.close,
            report,
        })
    }

    /// Analyze every symbol, at most `settings.concurrency` at a time.
    pub async fn scan(&self, symbols: Vec<String>) -> ScanReport {
        let started = Instant::now();
        let total_symbols = symbols.len();
        let settings = self.settings;

        info!(
            "MarketScanner: Scanning {} symbols on {} (concurrency {})",
            total_symbols, settings.timeframe, settings.concurrency
        );

        let results: Vec<(String, Result<SymbolAnalysis, ScanError>)> = stream::iter(symbols)
            .map(|symbol| async move {
                let result = self
                    .analyze_symbol(
                        &symbol,
                        settings.timeframe,
                        settings.limit,
                        settings.extrema_radius,
                    )
                    .await;
                (symbol, result)
            })
            .buffer_unordered(settings.concurrency.max(1))
            .collect()
            .await;

        let mut report = ScanReport {
            total_symbols,
            ..Default::default()
        };

        for (symbol, result) in results {
            match result {
                Ok(analysis) => report.analyzed.push(analysis),
                Err(e) => {
                    warn!("MarketScanner: Skipping {}: {}", symbol, e);
                    report.failures.push(SymbolFailure {
                        symbol,
                        kind: e.kind(),
                        message: e.to_string(),
                    });
                }
            }
        }

        report.analyzed.sort_by(|a, b| {
            b.report
                .confluence
                .score
                .cmp(&a.report.confluence.score)
                .then_with(|| a.symbol.cmp(&b.symbol))
        });
        report.failures.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        report.failure_count = report.failures.len();

        let elapsed = started.elapsed();
        if let Some(metrics) = &self.metrics {
            metrics.observe_scan(elapsed.as_secs_f64(), report.failure_count);
        }

        info!(
            "MarketScanner: Scan complete in {:.2}s: {} analyzed, {} failed",
            elapsed.as_secs_f64(),
            report.analyzed.len(),
            report.failure_count
        );

        report
    }

    /// List the exchange's USDT perpetuals and scan up to `max_symbols` of them.
    pub async fn scan_market(&self, max_symbols: usize) -> Result<MarketScan, ScanError> {
        let listed_symbols = self.market_data.list_usdt_perpetuals().await?;
        let selected = listed_symbols.iter().take(max_symbols).cloned().collect();
        let report = self.scan(selected).await;
        Ok(MarketScan {
            listed_symbols,
            report,
        })
    }
}

//! Response shapes for the HTTP API.
//!
//! Numbers are rounded here and only here; the analysis core works unrounded.

use crate::application::analysis::AnalysisReport;
use crate::application::scanner::{MarketScan, SymbolAnalysis, SymbolFailure};
use crate::domain::market::{Decision, IndicatorSnapshot, StructureLabel, SwingPoint};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

const PREVIEW_LEN: usize = 20;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round2_opt(value: Option<f64>) -> Option<f64> {
    value.map(round2)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub message: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "online",
            service: "Help Trade IA",
            message: "API funcionando corretamente",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Static advisory text carried on every analysis
#[derive(Debug, Serialize)]
pub struct RiskManagement {
    pub max_risk_per_trade: &'static str,
    pub rr_minimum: &'static str,
}

impl Default for RiskManagement {
    fn default() -> Self {
        Self {
            max_risk_per_trade: "3% a 5%",
            rr_minimum: "1:3",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndicatorsDto {
    pub rsi: Option<f64>,
    pub macd_line: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub ma_fast: Option<f64>,
    pub ma_slow: Option<f64>,
    pub volume: f64,
    pub volume_avg: Option<f64>,
}

impl From<&IndicatorSnapshot> for IndicatorsDto {
    fn from(s: &IndicatorSnapshot) -> Self {
        Self {
            rsi: round2_opt(s.rsi),
            macd_line: round2_opt(s.macd_line),
            macd_signal: round2_opt(s.macd_signal),
            macd_histogram: round2_opt(s.macd_histogram),
            ma_fast: round2_opt(s.ma_fast),
            ma_slow: round2_opt(s.ma_slow),
            volume: round2(s.volume),
            volume_avg: round2_opt(s.volume_avg),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SwingDto {
    pub index: usize,
    pub price: f64,
}

impl From<&SwingPoint> for SwingDto {
    fn from(p: &SwingPoint) -> Self {
        Self {
            index: p.index,
            price: round2(p.value),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SwingsDto {
    pub highs: Vec<SwingDto>,
    pub lows: Vec<SwingDto>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub status: &'static str,
    pub symbol: String,
    pub interval: &'static str,
    pub bars: usize,
    pub last_candle_time: Option<DateTime<Utc>>,
    pub last_close: Decimal,
    pub structure: StructureLabel,
    pub swings: SwingsDto,
    pub indicators: IndicatorsDto,
    pub score: u8,
    pub reasons: Vec<&'static str>,
    pub decision: Decision,
    pub risk_management: RiskManagement,
}

impl From<&SymbolAnalysis> for AnalysisResponse {
    fn from(a: &SymbolAnalysis) -> Self {
        let report: &AnalysisReport = &a.report;
        Self {
            status: "ok",
            symbol: a.symbol.clone(),
            interval: a.timeframe.as_str(),
            bars: a.bars,
            last_candle_time: DateTime::from_timestamp_millis(a.last_timestamp),
            last_close: a.last_close.round_dp(2),
            structure: report.structure,
            swings: SwingsDto {
                highs: report.swings.highs.iter().map(SwingDto::from).collect(),
                lows: report.swings.lows.iter().map(SwingDto::from).collect(),
            },
            indicators: IndicatorsDto::from(&report.snapshot),
            score: report.confluence.score,
            reasons: report.confluence.reasons.iter().map(|r| r.as_str()).collect(),
            decision: report.decision,
            risk_management: RiskManagement::default(),
        }
    }
}

/// One row of the market scan ranking
#[derive(Debug, Serialize)]
pub struct ScanEntryDto {
    pub symbol: String,
    pub last_close: Decimal,
    pub structure: StructureLabel,
    pub score: u8,
    pub reasons: Vec<&'static str>,
    pub decision: Decision,
    pub rsi: Option<f64>,
}

impl From<&SymbolAnalysis> for ScanEntryDto {
    fn from(a: &SymbolAnalysis) -> Self {
        Self {
            symbol: a.symbol.clone(),
            last_close: a.last_close.round_dp(2),
            structure: a.report.structure,
            score: a.report.confluence.score,
            reasons: a
                .report
                .confluence
                .reasons
                .iter()
                .map(|r| r.as_str())
                .collect(),
            decision: a.report.decision,
            rsi: round2_opt(a.report.snapshot.rsi),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MarketScanResponse {
    pub status: &'static str,
    pub interval: &'static str,
    pub total_pairs: usize,
    pub pairs_preview: Vec<String>,
    pub scanned: usize,
    pub analyzed: usize,
    pub failure_count: usize,
    pub results: Vec<ScanEntryDto>,
    pub failures: Vec<SymbolFailure>,
}

impl MarketScanResponse {
    /// `pairs_preview` lists the first listed pairs, scanned or not
    pub fn new(interval: &'static str, market: &MarketScan) -> Self {
        let report = &market.report;
        Self {
            status: "ok",
            interval,
            total_pairs: market.total_pairs(),
            pairs_preview: market
                .listed_symbols
                .iter()
                .take(PREVIEW_LEN)
                .cloned()
                .collect(),
            scanned: report.total_symbols,
            analyzed: report.analyzed.len(),
            failure_count: report.failure_count,
            results: report.analyzed.iter().map(ScanEntryDto::from).collect(),
            failures: report.failures.clone(),
        }
    }
}

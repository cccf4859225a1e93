use super::confluence::score_confluence;
use super::extrema::{DEFAULT_EXTREMA_RADIUS, detect_swings};
use super::indicator_adapter::TaIndicatorAdapter;
use super::structure::classify_structure;
use crate::domain::errors::AnalysisError;
use crate::domain::market::{
    CandleSeries, ConfluenceResult, Decision, IndicatorPeriods, IndicatorSnapshot, StructureLabel,
    Swings,
};
use crate::domain::ports::IndicatorAdapter;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Fewest bars any analysis accepts, whatever the indicator periods
pub const MIN_ANALYSIS_BARS: usize = 200;

/// Outcome of one analysis run over a candle window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub structure: StructureLabel,
    pub swings: Swings,
    pub confluence: ConfluenceResult,
    pub decision: Decision,
    /// Indicator values at the newest bar, unrounded
    pub snapshot: IndicatorSnapshot,
}

/// Swing-structure and confluence pipeline.
///
/// Holds no per-run state, so a single instance can be shared across tasks.
#[derive(Clone)]
pub struct MarketStructureAnalyzer {
    adapter: Arc<dyn IndicatorAdapter>,
    periods: IndicatorPeriods,
    extrema_radius: usize,
}

impl Default for MarketStructureAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(TaIndicatorAdapter::new()))
    }
}

impl MarketStructureAnalyzer {
    pub fn new(adapter: Arc<dyn IndicatorAdapter>) -> Self {
        Self {
            adapter,
            periods: IndicatorPeriods::default(),
            extrema_radius: DEFAULT_EXTREMA_RADIUS,
        }
    }

    pub fn with_periods(mut self, periods: IndicatorPeriods) -> Self {
        self.periods = periods;
        self
    }

    pub fn with_extrema_radius(mut self, radius: usize) -> Self {
        self.extrema_radius = radius;
        self
    }

    pub fn extrema_radius(&self) -> usize {
        self.extrema_radius
    }

    pub fn periods(&self) -> &IndicatorPeriods {
        &self.periods
    }

    /// Indicator warm-up, never below `MIN_ANALYSIS_BARS`
    pub fn required_bars(&self) -> usize {
        self.periods.required_bars().max(MIN_ANALYSIS_BARS)
    }

    pub fn analyze(&self, candles: &CandleSeries) -> Result<AnalysisReport, AnalysisError> {
        self.analyze_with_radius(candles, self.extrema_radius)
    }

    pub fn analyze_with_radius(
        &self,
        candles: &CandleSeries,
        extrema_radius: usize,
    ) -> Result<AnalysisReport, AnalysisError> {
        let required = self.required_bars();
        if candles.len() < required {
            return Err(AnalysisError::InsufficientData {
                required,
                available: candles.len(),
            });
        }

        let frame = self.adapter.compute(candles, &self.periods)?;
        if frame.len() != candles.len() || !frame.is_aligned() {
            return Err(AnalysisError::malformed(format!(
                "indicator adapter '{}' returned a misaligned frame",
                self.adapter.name()
            )));
        }
        let snapshot = frame.latest().ok_or(AnalysisError::InsufficientData {
            required,
            available: 0,
        })?;

        let swings = detect_swings(&candles.highs()?, &candles.lows()?, extrema_radius)?;
        let structure = classify_structure(&swings);
        let confluence = score_confluence(structure, &snapshot);
        let decision = Decision::from_score(confluence.score);

        debug!(
            "Analyzer: {} bars, {} swing highs, {} swing lows -> {} score={} {}",
            candles.len(),
            swings.highs.len(),
            swings.lows.len(),
            structure,
            confluence.score,
            decision
        );

        Ok(AnalysisReport {
            structure,
            swings,
            confluence,
            decision,
            snapshot,
        })
    }
}

/// Analyze `candles` with the default indicator adapter and periods.
pub fn analyze(
    candles: &CandleSeries,
    extrema_radius: usize,
) -> Result<AnalysisReport, AnalysisError> {
    MarketStructureAnalyzer::default().analyze_with_radius(candles, extrema_radius)
}

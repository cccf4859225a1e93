//! Swing-point market structure detection and confluence scoring.
//!
//! Pipeline: candles -> indicator adapter -> {extrema -> structure} ->
//! confluence score -> decision. Every stage is a pure function of one
//! candle window.

pub mod analyzer;
pub mod confluence;
pub mod decision;
pub mod extrema;
pub mod indicator_adapter;
pub mod structure;

pub use analyzer::{AnalysisReport, MIN_ANALYSIS_BARS, MarketStructureAnalyzer, analyze};
pub use confluence::score_confluence;
pub use extrema::{DEFAULT_EXTREMA_RADIUS, detect_swings};
pub use indicator_adapter::{TaIndicatorAdapter, WilderRsi};
pub use structure::classify_structure;

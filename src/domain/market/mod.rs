pub mod candle;
pub mod confluence;
pub mod indicators;
pub mod structure;
pub mod timeframe;

pub use candle::{Candle, CandleSeries};
pub use confluence::{ConfluenceReason, ConfluenceResult, Decision};
pub use indicators::{IndicatorFrame, IndicatorPeriods, IndicatorSnapshot};
pub use structure::{StructureLabel, SwingKind, SwingPoint, Swings};
pub use timeframe::Timeframe;

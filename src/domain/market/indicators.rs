use serde::Serialize;

/// Look-back windows used by the indicator adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorPeriods {
    pub rsi: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub ma_fast: usize,
    pub ma_slow: usize,
    pub volume_avg: usize,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            rsi: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            ma_fast: 50,
            ma_slow: 200,
            volume_avg: 20,
        }
    }
}

impl IndicatorPeriods {
    /// Minimum number of bars for every series to have a defined latest value
    pub fn required_bars(&self) -> usize {
        [
            self.rsi + 1,
            (self.macd_slow + self.macd_signal).saturating_sub(1),
            self.ma_fast,
            self.ma_slow,
            self.volume_avg,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Per-bar indicator series aligned index-for-index with a `CandleSeries`.
///
/// `None` marks bars where the rolling window is not yet full.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorFrame {
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
    pub rsi: Vec<Option<f64>>,
    pub macd_line: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
    pub ma_fast: Vec<Option<f64>>,
    pub ma_slow: Vec<Option<f64>>,
    pub volume_avg: Vec<Option<f64>>,
}

impl IndicatorFrame {
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// True when every derived series has the same length as the price series
    pub fn is_aligned(&self) -> bool {
        let n = self.close.len();
        self.volume.len() == n
            && self.rsi.len() == n
            && self.macd_line.len() == n
            && self.macd_signal.len() == n
            && self.macd_histogram.len() == n
            && self.ma_fast.len() == n
            && self.ma_slow.len() == n
            && self.volume_avg.len() == n
    }

    /// Values at the newest bar, or `None` for an empty frame
    pub fn latest(&self) -> Option<IndicatorSnapshot> {
        let i = self.close.len().checked_sub(1)?;
        Some(IndicatorSnapshot {
            close: self.close[i],
            volume: self.volume[i],
            rsi: self.rsi[i],
            macd_line: self.macd_line[i],
            macd_signal: self.macd_signal[i],
            macd_histogram: self.macd_histogram[i],
            ma_fast: self.ma_fast[i],
            ma_slow: self.ma_slow[i],
            volume_avg: self.volume_avg[i],
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub volume: f64,
    pub rsi: Option<f64>,
    pub macd_line: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub ma_fast: Option<f64>,
    pub ma_slow: Option<f64>,
    pub volume_avg: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_bars_is_slow_ma() {
        assert_eq!(IndicatorPeriods::default().required_bars(), 200);
    }

    #[test]
    fn test_required_bars_short_periods() {
        let periods = IndicatorPeriods {
            ma_fast: 5,
            ma_slow: 10,
            ..Default::default()
        };
        // MACD signal needs 26 + 9 - 1 bars
        assert_eq!(periods.required_bars(), 34);
    }

    #[test]
    fn test_latest_on_empty_frame() {
        assert!(IndicatorFrame::default().latest().is_none());
    }
}

use crate::domain::errors::AnalysisError;
use crate::domain::market::{CandleSeries, IndicatorFrame, IndicatorPeriods};
use crate::domain::ports::IndicatorAdapter;
use ta::Next;
use ta::indicators::{MovingAverageConvergenceDivergence, SimpleMovingAverage};

/// RSI with Wilder's smoothing
///
/// Seeds the averages with the simple mean of the first `period` changes, then
/// applies `avg = (avg * (n - 1) + x) / n`. Returns `None` until `period`
/// changes have been seen.
pub struct WilderRsi {
    period: usize,
    prev_close: Option<f64>,
    count: usize,
    gain_sum: f64,
    loss_sum: f64,
    avg_gain: f64,
    avg_loss: f64,
}

impl WilderRsi {
    pub fn new(period: usize) -> Result<Self, AnalysisError> {
        if period == 0 {
            return Err(AnalysisError::malformed("RSI period must be > 0"));
        }
        Ok(Self {
            period,
            prev_close: None,
            count: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg_gain: 0.0,
            avg_loss: 0.0,
        })
    }

    pub fn next(&mut self, close: f64) -> Option<f64> {
        let prev = self.prev_close.replace(close)?;

        let change = close - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        let n = self.period as f64;

        self.count += 1;

        if self.count < self.period {
            self.gain_sum += gain;
            self.loss_sum += loss;
            return None;
        }

        if self.count == self.period {
            self.avg_gain = (self.gain_sum + gain) / n;
            self.avg_loss = (self.loss_sum + loss) / n;
        } else {
            self.avg_gain = (self.avg_gain * (n - 1.0) + gain) / n;
            self.avg_loss = (self.avg_loss * (n - 1.0) + loss) / n;
        }

        Some(rsi_from_averages(self.avg_gain, self.avg_loss))
    }
}

/// `RSI = 100 - 100 / (1 + avg_gain / avg_loss)`, pinned to 100 when there are no losses
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Indicator adapter backed by the `ta` crate for moving averages and MACD.
///
/// Exposes MACD line, signal and histogram separately; none of them feed the
/// confluence score.
#[derive(Debug, Clone, Default)]
pub struct TaIndicatorAdapter;

impl TaIndicatorAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn sma(period: usize, name: &str) -> Result<SimpleMovingAverage, AnalysisError> {
    SimpleMovingAverage::new(period).map_err(|e| {
        AnalysisError::malformed(format!("invalid {} period {}: {:?}", name, period, e))
    })
}

/// Feeds every value through a `ta` SMA, masking bars before the window fills
fn rolling_mean(
    values: &[f64],
    period: usize,
    name: &str,
) -> Result<Vec<Option<f64>>, AnalysisError> {
    let mut indicator = sma(period, name)?;
    Ok(values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let out = indicator.next(v);
            (i + 1 >= period).then_some(out)
        })
        .collect())
}

impl IndicatorAdapter for TaIndicatorAdapter {
    fn name(&self) -> &str {
        "ta-wilder"
    }

    fn compute(
        &self,
        candles: &CandleSeries,
        periods: &IndicatorPeriods,
    ) -> Result<IndicatorFrame, AnalysisError> {
        let required = periods.required_bars();
        if candles.len() < required {
            return Err(AnalysisError::InsufficientData {
                required,
                available: candles.len(),
            });
        }

        let close = candles.closes()?;
        let volume = candles.volumes()?;

        let mut rsi = WilderRsi::new(periods.rsi)?;
        let mut macd = MovingAverageConvergenceDivergence::new(
            periods.macd_fast,
            periods.macd_slow,
            periods.macd_signal,
        )
        .map_err(|e| AnalysisError::malformed(format!("invalid MACD periods: {:?}", e)))?;

        let n = close.len();
        let mut rsi_series = Vec::with_capacity(n);
        let mut macd_line = Vec::with_capacity(n);
        let mut macd_signal = Vec::with_capacity(n);
        let mut macd_histogram = Vec::with_capacity(n);

        let signal_ready = (periods.macd_slow + periods.macd_signal).saturating_sub(1);

        for (i, &price) in close.iter().enumerate() {
            rsi_series.push(rsi.next(price));

            let out = macd.next(price);
            let line_defined = i + 1 >= periods.macd_slow;
            let signal_defined = i + 1 >= signal_ready;
            macd_line.push(line_defined.then_some(out.macd));
            macd_signal.push(signal_defined.then_some(out.signal));
            macd_histogram.push(signal_defined.then_some(out.histogram));
        }

        let frame = IndicatorFrame {
            ma_fast: rolling_mean(&close, periods.ma_fast, "fast MA")?,
            ma_slow: rolling_mean(&close, periods.ma_slow, "slow MA")?,
            volume_avg: rolling_mean(&volume, periods.volume_avg, "volume average")?,
            close,
            volume,
            rsi: rsi_series,
            macd_line,
            macd_signal,
            macd_histogram,
        };
        debug_assert!(frame.is_aligned());

        Ok(frame)
    }
}

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Candle intervals accepted by the analysis endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    OneMin,
    FiveMin,
    FifteenMin,
    ThirtyMin,
    OneHour,
    FourHour,
    OneDay,
}

impl Timeframe {
    /// Converts to Bybit v5 kline interval string
    pub fn to_bybit_interval(&self) -> &'static str {
        match self {
            Timeframe::OneMin => "1",
            Timeframe::FiveMin => "5",
            Timeframe::FifteenMin => "15",
            Timeframe::ThirtyMin => "30",
            Timeframe::OneHour => "60",
            Timeframe::FourHour => "240",
            Timeframe::OneDay => "D",
        }
    }

    /// Short label used in responses and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneMin => "1m",
            Timeframe::FiveMin => "5m",
            Timeframe::FifteenMin => "15m",
            Timeframe::ThirtyMin => "30m",
            Timeframe::OneHour => "1h",
            Timeframe::FourHour => "4h",
            Timeframe::OneDay => "1d",
        }
    }

    /// Returns all available timeframes in ascending order
    pub fn all() -> Vec<Timeframe> {
        vec![
            Timeframe::OneMin,
            Timeframe::FiveMin,
            Timeframe::FifteenMin,
            Timeframe::ThirtyMin,
            Timeframe::OneHour,
            Timeframe::FourHour,
            Timeframe::OneDay,
        ]
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" | "1" => Ok(Timeframe::OneMin),
            "5m" | "5min" | "5" => Ok(Timeframe::FiveMin),
            "15m" | "15min" | "15" => Ok(Timeframe::FifteenMin),
            "30m" | "30min" | "30" => Ok(Timeframe::ThirtyMin),
            "1h" | "1hour" | "60" => Ok(Timeframe::OneHour),
            "4h" | "4hour" | "240" => Ok(Timeframe::FourHour),
            "1d" | "1day" | "d" => Ok(Timeframe::OneDay),
            _ => {
                let valid: Vec<&str> = Timeframe::all().iter().map(|tf| tf.as_str()).collect();
                Err(anyhow!(
                    "Invalid timeframe: '{}'. Valid options: {}",
                    s,
                    valid.join(", ")
                ))
            }
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_timeframe_lists_options() {
        let err = Timeframe::from_str("2h").unwrap_err().to_string();
        assert!(err.contains("1m, 5m, 15m, 30m, 1h, 4h, 1d"));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Timeframe::from_str("1m").unwrap(), Timeframe::OneMin);
        assert_eq!(Timeframe::from_str("1H").unwrap(), Timeframe::OneHour);
        assert_eq!(Timeframe::from_str("240").unwrap(), Timeframe::FourHour);
        assert_eq!(Timeframe::from_str("D").unwrap(), Timeframe::OneDay);
        assert!(Timeframe::from_str("2w").is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for tf in Timeframe::all() {
            assert_eq!(Timeframe::from_str(&tf.to_string()).unwrap(), tf);
        }
    }

    #[test]
    fn test_bybit_intervals() {
        assert_eq!(Timeframe::OneMin.to_bybit_interval(), "1");
        assert_eq!(Timeframe::OneHour.to_bybit_interval(), "60");
        assert_eq!(Timeframe::OneDay.to_bybit_interval(), "D");
    }
}

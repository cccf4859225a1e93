use thiserror::Error;

/// Errors raised by the analysis core. A failed analysis never returns a
/// partially populated result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Insufficient data: need {required} bars, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },
}

impl AnalysisError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        AnalysisError::MalformedInput {
            reason: reason.into(),
        }
    }
}

/// Errors related to market data retrieval
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("Data source unavailable: {reason}")]
    DataSourceUnavailable { reason: String },

    #[error("Invalid market data for {symbol}: {reason}")]
    InvalidPayload { symbol: String, reason: String },

    #[error("Unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },
}

/// Per-symbol failure inside a batch scan
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl ScanError {
    /// Short machine-readable tag used in scan reports and metrics labels
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::MarketData(MarketDataError::DataSourceUnavailable { .. }) => {
                "data_source_unavailable"
            }
            ScanError::MarketData(MarketDataError::InvalidPayload { .. }) => "invalid_payload",
            ScanError::MarketData(MarketDataError::UnknownSymbol { .. }) => "unknown_symbol",
            ScanError::Analysis(AnalysisError::InsufficientData { .. }) => "insufficient_data",
            ScanError::Analysis(AnalysisError::MalformedInput { .. }) => "malformed_input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_formatting() {
        let error = AnalysisError::InsufficientData {
            required: 200,
            available: 150,
        };

        let msg = error.to_string();
        assert!(msg.contains("200"));
        assert!(msg.contains("150"));
    }

    #[test]
    fn test_scan_error_kind() {
        let err: ScanError = AnalysisError::malformed("timestamps out of order").into();
        assert_eq!(err.kind(), "malformed_input");
        assert!(err.to_string().contains("timestamps out of order"));

        let err: ScanError = MarketDataError::DataSourceUnavailable {
            reason: "timeout".to_string(),
        }
        .into();
        assert_eq!(err.kind(), "data_source_unavailable");
    }
}

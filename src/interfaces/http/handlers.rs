use super::AppState;
use super::dto::{AnalysisResponse, ErrorResponse, HealthResponse, MarketScanResponse};
use crate::domain::errors::{MarketDataError, ScanError};
use crate::domain::market::Timeframe;
use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

/// Query parameters for `/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    pub symbol: Option<String>,
    /// 1m, 5m, 15m, 30m, 1h, 4h or 1d
    pub interval: Option<String>,
    pub limit: Option<usize>,
    pub radius: Option<usize>,
}

/// Query parameters for `/analyze/market`
#[derive(Debug, Deserialize)]
pub struct MarketScanQuery {
    pub max_symbols: Option<usize>,
}

/// Error type rendered as a JSON body with a matching status code
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    message: String,
}

impl ApiError {
    fn bad_request(error: &str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.to_string(),
            message: message.into(),
        }
    }
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        let status = match &err {
            ScanError::Analysis(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ScanError::MarketData(MarketDataError::UnknownSymbol { .. }) => StatusCode::NOT_FOUND,
            ScanError::MarketData(_) => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            error: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.error,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// GET / - health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// GET /analyze?symbol=BTCUSDT&interval=1h&limit=300&radius=5
pub async fn analyze_handler(
    State(state): State<AppState>,
    Query(params): Query<AnalyzeQuery>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let symbol = params
        .symbol
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("invalid_symbol", "Use /analyze?symbol=BTCUSDT"))?;

    let settings = *state.scanner.settings();
    let timeframe = match params.interval.as_deref() {
        Some(raw) => raw
            .parse::<Timeframe>()
            .map_err(|e| ApiError::bad_request("invalid_interval", e.to_string()))?,
        None => settings.timeframe,
    };
    let limit = params.limit.unwrap_or(settings.limit);
    let radius = params.radius.unwrap_or(settings.extrema_radius);

    info!(
        "GET /analyze symbol={} interval={} limit={} radius={}",
        symbol, timeframe, limit, radius
    );

    let analysis = state
        .scanner
        .analyze_symbol(&symbol, timeframe, limit, radius)
        .await
        .map_err(|e| {
            warn!("Analysis of {} failed: {}", symbol, e);
            ApiError::from(e)
        })?;

    Ok(Json(AnalysisResponse::from(&analysis)))
}

/// GET /analyze/market?max_symbols=50
pub async fn market_scan_handler(
    State(state): State<AppState>,
    Query(params): Query<MarketScanQuery>,
) -> Result<Json<MarketScanResponse>, ApiError> {
    let max_symbols = params.max_symbols.unwrap_or(state.scan_max_symbols);
    info!("GET /analyze/market max_symbols={}", max_symbols);

    let market = state.scanner.scan_market(max_symbols).await?;
    let interval = state.scanner.settings().timeframe.as_str();

    Ok(Json(MarketScanResponse::new(interval, &market)))
}

/// GET /metrics - Prometheus text exposition
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(metrics) => (
            [(CONTENT_TYPE, "text/plain; version=0.0.4")],
            metrics.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

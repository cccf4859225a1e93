//! HTTP API over the analysis and scan services.
//!
//! Routes:
//! - `GET /` health check
//! - `GET /analyze?symbol=BTCUSDT` single-symbol analysis
//! - `GET /analyze/market` market-wide scan
//! - `GET /metrics` Prometheus metrics

pub mod dto;
pub mod handlers;

use crate::application::scanner::MarketScanner;
use crate::infrastructure::observability::Metrics;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub scanner: Arc<MarketScanner>,
    pub metrics: Option<Metrics>,
    pub scan_max_symbols: usize,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health_handler))
        .route("/analyze", get(handlers::analyze_handler))
        .route("/analyze/market", get(handlers::market_scan_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until `shutdown` resolves
pub async fn serve(
    state: AppState,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    info!("Registering routes:");
    info!("  GET /");
    info!("  GET /analyze?symbol=BTCUSDT&interval=1h&limit=300&radius=5");
    info!("  GET /analyze/market?max_symbols=50");
    info!("  GET /metrics");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::analysis::MarketStructureAnalyzer;
    use crate::application::scanner::ScanSettings;
    use crate::infrastructure::mock::MockMarketDataService;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let mock = MockMarketDataService::new()
            .with_candles("BTCUSDT", MockMarketDataService::zigzag_candles(300))
            .with_candles("NEWUSDT", MockMarketDataService::trending_candles(50, 1.0, 0.01))
            .with_failure("DOWNUSDT");
        let metrics = Metrics::new().unwrap();
        let scanner = MarketScanner::new(
            Arc::new(mock),
            MarketStructureAnalyzer::default(),
            ScanSettings::default(),
        )
        .with_metrics(metrics.clone());

        router(AppState {
            scanner: Arc::new(scanner),
            metrics: Some(metrics),
            scan_max_symbols: 10,
        })
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "online");
        assert_eq!(body["service"], "Help Trade IA");
    }

    #[tokio::test]
    async fn test_analyze_requires_symbol() {
        let (status, body) = get_json(app(), "/analyze").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Use /analyze?symbol=BTCUSDT");
    }

    #[tokio::test]
    async fn test_analyze_symbol() {
        let (status, body) = get_json(app(), "/analyze?symbol=btcusdt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "BTCUSDT");
        assert_eq!(body["interval"], "1h");
        assert_eq!(body["structure"], "UPTREND");
        assert_eq!(body["decision"], "PROMISING");
        assert_eq!(body["risk_management"]["rr_minimum"], "1:3");
        assert!(body["score"].as_u64().unwrap() >= 3);
    }

    #[tokio::test]
    async fn test_analyze_error_statuses() {
        let (status, body) = get_json(app(), "/analyze?symbol=NEWUSDT").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "insufficient_data");

        let (status, _) = get_json(app(), "/analyze?symbol=NOPEUSDT").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_json(app(), "/analyze?symbol=DOWNUSDT").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, body) = get_json(app(), "/analyze?symbol=BTCUSDT&interval=2h").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_interval");

        let (status, body) = get_json(app(), "/analyze?symbol=BTCUSDT&radius=0").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "malformed_input");
    }

    #[tokio::test]
    async fn test_analyze_with_huge_radius_finds_no_swings() {
        let (status, body) =
            get_json(app(), "/analyze?symbol=BTCUSDT&radius=9223372036854775808").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["structure"], "RANGE");
        assert_eq!(body["swings"]["highs"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_market_scan() {
        let (status, body) = get_json(app(), "/analyze/market").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_pairs"], 3);
        assert_eq!(body["scanned"], 3);
        assert_eq!(body["analyzed"], 1);
        assert_eq!(body["failure_count"], 2);
        assert_eq!(body["results"][0]["symbol"], "BTCUSDT");
    }

    #[tokio::test]
    async fn test_market_preview_covers_whole_universe() {
        let (status, body) = get_json(app(), "/analyze/market?max_symbols=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_pairs"], 3);
        assert_eq!(body["scanned"], 1);
        assert_eq!(
            body["pairs_preview"],
            serde_json::json!(["BTCUSDT", "DOWNUSDT", "NEWUSDT"])
        );
        assert_eq!(body["results"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_metrics_count_analyses() {
        let app = app();
        let _ = get_json(app.clone(), "/analyze?symbol=BTCUSDT").await;

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("helptrade_analyses_total{outcome=\"ok\"} 1"));
    }
}

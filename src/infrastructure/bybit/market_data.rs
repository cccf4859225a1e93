//! Bybit Market Data Service
//!
//! Public (unauthenticated) v5 REST endpoints:
//! - Historical candle data (klines) for linear perpetuals
//! - USDT perpetual instrument discovery

use crate::domain::errors::MarketDataError;
use crate::domain::market::{Candle, Timeframe};
use crate::domain::ports::MarketDataService;
use crate::infrastructure::core::http_client_factory::{HttpClientFactory, build_url_with_query};
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

const CATEGORY: &str = "linear";
const MAX_KLINE_LIMIT: usize = 1000;
const INSTRUMENTS_PAGE_LIMIT: &str = "1000";
/// Bybit's "params error" code, returned for unsupported symbols
const RET_CODE_PARAMS_ERROR: i64 = 10001;

/// Error replies carry `"result": {}`, so the payload stays untyped until
/// `retCode` says it is a success
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    ret_code: i64,
    #[serde(default)]
    ret_msg: String,
    result: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct KlineResult {
    /// `[startTime, open, high, low, close, volume, turnover]`, newest first
    list: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentsResult {
    list: Vec<InstrumentInfo>,
    #[serde(default)]
    next_page_cursor: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstrumentInfo {
    symbol: String,
    status: String,
    quote_coin: String,
}

pub struct BybitMarketDataService {
    client: ClientWithMiddleware,
    base_url: String,
}

impl BybitMarketDataService {
    pub fn builder() -> BybitMarketDataServiceBuilder {
        BybitMarketDataServiceBuilder::default()
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        symbol: &str,
    ) -> Result<T, MarketDataError> {
        let url = build_url_with_query(&format!("{}{}", self.base_url, path), params);
        debug!("BybitMarketDataService: GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            MarketDataError::DataSourceUnavailable {
                reason: format!("request to {} failed: {}", path, e),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::DataSourceUnavailable {
                reason: format!("{} returned HTTP {}: {}", path, status, body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::DataSourceUnavailable {
                reason: format!("failed to read {} response: {}", path, e),
            })?;

        parse_envelope(&body, symbol)
    }
}

fn parse_envelope<T: DeserializeOwned>(body: &str, symbol: &str) -> Result<T, MarketDataError> {
    let invalid = |reason: String| MarketDataError::InvalidPayload {
        symbol: symbol.to_string(),
        reason,
    };

    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| invalid(format!("unexpected response format: {}", e)))?;

    match envelope.ret_code {
        0 => {
            let result = envelope
                .result
                .ok_or_else(|| invalid("response has no result".to_string()))?;
            serde_json::from_value(result)
                .map_err(|e| invalid(format!("unexpected result format: {}", e)))
        }
        RET_CODE_PARAMS_ERROR => Err(MarketDataError::UnknownSymbol {
            symbol: symbol.to_string(),
        }),
        code => Err(MarketDataError::DataSourceUnavailable {
            reason: format!("Bybit retCode {}: {}", code, envelope.ret_msg),
        }),
    }
}

/// Convert raw kline rows into candles, keeping the source order.
fn parse_kline_rows(symbol: &str, rows: &[Vec<String>]) -> Result<Vec<Candle>, MarketDataError> {
    let invalid = |reason: String| MarketDataError::InvalidPayload {
        symbol: symbol.to_string(),
        reason,
    };

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() < 6 {
                return Err(invalid(format!("kline row {} has {} fields", i, row.len())));
            }
            let timestamp = row[0]
                .parse::<i64>()
                .map_err(|e| invalid(format!("kline row {} start time '{}': {}", i, row[0], e)))?;
            let field = |idx: usize| {
                Decimal::from_str_exact(&row[idx]).map_err(|e| {
                    invalid(format!("kline row {} field {} '{}': {}", i, idx, row[idx], e))
                })
            };
            Ok(Candle {
                timestamp,
                open: field(1)?,
                high: field(2)?,
                low: field(3)?,
                close: field(4)?,
                volume: field(5)?,
            })
        })
        .collect()
}

#[derive(Default)]
pub struct BybitMarketDataServiceBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
}

impl BybitMarketDataServiceBuilder {
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn build(self) -> BybitMarketDataService {
        let base_url = self
            .base_url
            .unwrap_or_else(|| "https://api.bybit.com".to_string())
            .trim_end_matches('/')
            .to_string();
        let client = HttpClientFactory::create_client(
            self.timeout.unwrap_or(Duration::from_secs(10)),
            self.max_retries.unwrap_or(3),
        );

        BybitMarketDataService { client, base_url }
    }
}

#[async_trait]
impl MarketDataService for BybitMarketDataService {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let limit = limit.clamp(1, MAX_KLINE_LIMIT).to_string();
        let result: KlineResult = self
            .get(
                "/v5/market/kline",
                &[
                    ("category", CATEGORY),
                    ("symbol", symbol),
                    ("interval", timeframe.to_bybit_interval()),
                    ("limit", limit.as_str()),
                ],
                symbol,
            )
            .await?;

        let candles = parse_kline_rows(symbol, &result.list)?;
        debug!(
            "BybitMarketDataService: {} {} candles for {}",
            candles.len(),
            timeframe,
            symbol
        );
        Ok(candles)
    }

    async fn list_usdt_perpetuals(&self) -> Result<Vec<String>, MarketDataError> {
        let mut symbols = Vec::new();
        let mut cursor = String::new();

        loop {
            let mut params = vec![("category", CATEGORY), ("limit", INSTRUMENTS_PAGE_LIMIT)];
            if !cursor.is_empty() {
                params.push(("cursor", cursor.as_str()));
            }

            let page: InstrumentsResult = self
                .get("/v5/market/instruments-info", &params, "*")
                .await?;

            symbols.extend(
                page.list
                    .into_iter()
                    .filter(|i| i.quote_coin == "USDT" && i.status == "Trading")
                    .map(|i| i.symbol),
            );

            if page.next_page_cursor.is_empty() {
                break;
            }
            cursor = page.next_page_cursor;
        }

        info!(
            "BybitMarketDataService: Found {} tradable USDT perpetuals",
            symbols.len()
        );
        Ok(symbols)
    }
}

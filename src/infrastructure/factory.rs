use crate::config::{Config, Mode};
use crate::domain::ports::MarketDataService;
use crate::infrastructure::bybit::BybitMarketDataService;
use crate::infrastructure::mock::MockMarketDataService;
use std::sync::Arc;
use tracing::info;

pub struct ServiceFactory;

impl ServiceFactory {
    pub fn create_market_data_service(config: &Config) -> Arc<dyn MarketDataService> {
        match config.mode {
            Mode::Mock => {
                info!("ServiceFactory: Using mock market data (demo universe)");
                Arc::new(MockMarketDataService::with_demo_universe())
            }
            Mode::Bybit => {
                info!(
                    "ServiceFactory: Using Bybit market data at {}",
                    config.market_data.bybit_base_url
                );
                Arc::new(
                    BybitMarketDataService::builder()
                        .base_url(config.market_data.bybit_base_url.clone())
                        .timeout(config.market_data.request_timeout)
                        .max_retries(config.market_data.max_retries)
                        .build(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::Timeframe;

    #[tokio::test]
    async fn test_mock_mode_serves_demo_universe() {
        let config = Config::from_lookup(|key| (key == "MODE").then(|| "mock".to_string())).unwrap();
        let service = ServiceFactory::create_market_data_service(&config);

        let symbols = service.list_usdt_perpetuals().await.unwrap();
        assert!(symbols.contains(&"BTCUSDT".to_string()));

        let candles = service
            .fetch_candles("BTCUSDT", Timeframe::OneHour, 300)
            .await
            .unwrap();
        assert_eq!(candles.len(), 300);
    }
}

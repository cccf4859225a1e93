pub mod bybit;
pub mod core;
pub mod factory;
pub mod mock;
pub mod observability;

pub use bybit::BybitMarketDataService;
pub use factory::ServiceFactory;
pub use mock::MockMarketDataService;

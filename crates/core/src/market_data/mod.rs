//! Market data module - the gateway over the upstream providers.
//!
//! Wraps the provider clients from `papertrade-market-data` with the
//! application's policy: quote+history bundling with a TTL cache, the
//! synthetic history fallback, the news source chain, search ranking, and
//! the fixed top-gainers universe.

mod market_data_model;
mod market_data_service;
mod market_data_traits;
mod quote_cache;

#[cfg(test)]
mod market_data_service_tests;

pub use market_data_model::{StockBundle, TopGainer};
pub use market_data_service::MarketDataService;
pub use market_data_traits::MarketDataServiceTrait;
pub use quote_cache::QuoteCache;

// Re-export the wire models callers usually need alongside the gateway
pub use papertrade_market_data::{HistoricalClose, NewsArticle, Quote, SearchResult};

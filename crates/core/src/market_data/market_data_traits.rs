//! Market data gateway trait.

use async_trait::async_trait;

use super::market_data_model::{StockBundle, TopGainer};
use crate::errors::Result;
use papertrade_market_data::{NewsArticle, Quote, SearchResult};

/// Trait defining the contract for the market data gateway.
///
/// Everything here is read-only against external providers; failures
/// surface as `Error::MarketData` unless a documented fallback applies.
#[async_trait]
pub trait MarketDataServiceTrait: Send + Sync {
    /// Fetch the current quote for a symbol, uncached.
    async fn get_quote(&self, symbol: &str) -> Result<Quote>;

    /// Fetch the quote + recent-history bundle, served from the TTL cache
    /// when fresh. History falls back to synthetic data when the
    /// historical provider has nothing.
    async fn get_stock_bundle(&self, symbol: &str) -> Result<StockBundle>;

    /// Fetch recent news for a symbol, chaining to the fallback source
    /// when the primary comes up empty.
    async fn get_news(&self, symbol: &str) -> Result<Vec<NewsArticle>>;

    /// Search for symbols, exact matches ranked first.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Quotes for the fixed symbol universe, sorted by percent change
    /// descending.
    async fn top_gainers(&self) -> Result<Vec<TopGainer>>;
}

//! Papertrade Market Data Crate
//!
//! Thin clients for the upstream market data providers used by the
//! application, plus the wire models they share:
//!
//! - Finnhub: real-time quotes, company news, symbol search, profiles
//! - Alpha Vantage: daily historical closes
//! - NewsAPI: fallback news search
//!
//! Fallback policy (synthetic history, news source chaining, caching) is
//! application logic and lives in `papertrade-core`; this crate only knows
//! how to talk to one provider at a time and how to fail.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{CompanyProfile, HistoricalClose, NewsArticle, Quote, SearchResult};
pub use provider::{AlphaVantageProvider, FinnhubProvider, NewsApiProvider};

//! Upstream provider clients.

pub mod alpha_vantage;
pub mod finnhub;
pub mod news_api;

pub use alpha_vantage::AlphaVantageProvider;
pub use finnhub::FinnhubProvider;
pub use news_api::NewsApiProvider;

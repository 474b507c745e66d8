use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::{debug, error, info, warn};
use rand::Rng;

use super::market_data_model::{StockBundle, TopGainer};
use super::market_data_traits::MarketDataServiceTrait;
use super::quote_cache::QuoteCache;
use crate::constants::{HISTORY_DAYS, NEWS_RESULT_LIMIT, SEARCH_RESULT_LIMIT, TOP_GAINER_SYMBOLS};
use crate::errors::Result;
use papertrade_market_data::{
    AlphaVantageProvider, FinnhubProvider, HistoricalClose, NewsApiProvider, NewsArticle, Quote,
    SearchResult,
};

/// Gateway over the upstream market data providers.
///
/// Holds one client per provider plus the bundle cache. All methods are
/// read-only; the cache is the only mutable state and tolerates races.
pub struct MarketDataService {
    finnhub: FinnhubProvider,
    alpha_vantage: AlphaVantageProvider,
    news_api: NewsApiProvider,
    cache: QuoteCache,
}

impl MarketDataService {
    /// Creates a gateway with the default cache TTL.
    pub fn new(finnhub_key: String, alpha_vantage_key: String, news_api_key: String) -> Self {
        Self::with_cache(
            finnhub_key,
            alpha_vantage_key,
            news_api_key,
            QuoteCache::new(),
        )
    }

    /// Creates a gateway around a caller-provided cache instance.
    pub fn with_cache(
        finnhub_key: String,
        alpha_vantage_key: String,
        news_api_key: String,
        cache: QuoteCache,
    ) -> Self {
        Self {
            finnhub: FinnhubProvider::new(finnhub_key),
            alpha_vantage: AlphaVantageProvider::new(alpha_vantage_key),
            news_api: NewsApiProvider::new(news_api_key),
            cache,
        }
    }

    /// Direct symbol lookup: a live quote with a positive price plus a
    /// company profile make a single synthesized search result. Returns
    /// `None` when either half is missing.
    async fn direct_lookup(&self, query: &str) -> Result<Option<SearchResult>> {
        let quote = self.finnhub.quote(query).await?;
        if quote.current_price <= 0.0 {
            return Ok(None);
        }
        let Some(profile) = self.finnhub.company_profile(query).await? else {
            return Ok(None);
        };
        Ok(Some(SearchResult {
            symbol: query.to_string(),
            description: profile.name.unwrap_or_else(|| query.to_string()),
            display_symbol: query.to_string(),
            security_type: "Common Stock".to_string(),
            exchange: None,
        }))
    }
}

#[async_trait]
impl MarketDataServiceTrait for MarketDataService {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        Ok(self.finnhub.quote(symbol).await?)
    }

    async fn get_stock_bundle(&self, symbol: &str) -> Result<StockBundle> {
        debug!("Fetching stock data for {}", symbol);
        self.cache
            .get_or_fetch(symbol, || async {
                let quote = self.finnhub.quote(symbol).await?;

                let historical = match self.alpha_vantage.daily_closes(symbol, HISTORY_DAYS).await
                {
                    Ok(closes) if !closes.is_empty() => closes,
                    Ok(_) => {
                        info!("Using fallback historical data for {}", symbol);
                        synthetic_history(quote.current_price)
                    }
                    Err(e) => {
                        error!("Error fetching historical data for {}: {}", symbol, e);
                        synthetic_history(quote.current_price)
                    }
                };

                Ok(StockBundle { quote, historical })
            })
            .await
    }

    async fn get_news(&self, symbol: &str) -> Result<Vec<NewsArticle>> {
        let to = Utc::now().date_naive();
        let from = to - Duration::days(30);

        let mut news = match self.finnhub.company_news(symbol, from, to).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Primary news source failed for {}: {}", symbol, e);
                Vec::new()
            }
        };

        if news.is_empty() {
            info!("No primary news found for {}, using fallback source", symbol);
            news = self.news_api.everything(symbol).await?;
        }

        news.truncate(NEWS_RESULT_LIMIT);
        Ok(news)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query = query.trim().to_uppercase();
        info!("Searching stocks with query: {}", query);

        let mut results = Vec::new();

        match self.direct_lookup(&query).await {
            Ok(Some(result)) => results.push(result),
            Ok(None) => {}
            Err(e) => warn!("Failed to get direct quote for {}: {}", query, e),
        }

        if results.is_empty() {
            results = self
                .finnhub
                .symbol_search(&query)
                .await?
                .into_iter()
                .filter(|item| {
                    item.security_type == "Common Stock"
                        && item
                            .exchange
                            .as_deref()
                            .map(|ex| ex.contains("NYSE") || ex.contains("NASDAQ"))
                            .unwrap_or(false)
                })
                .collect();
        }

        rank_search_results(&mut results, &query);
        results.truncate(SEARCH_RESULT_LIMIT);
        Ok(results)
    }

    async fn top_gainers(&self) -> Result<Vec<TopGainer>> {
        let mut gainers = Vec::new();

        for symbol in TOP_GAINER_SYMBOLS {
            match self.finnhub.quote(symbol).await {
                Ok(quote) => {
                    // Both a current price and a percent change are required
                    // for the board; the typed quote guarantees the former.
                    if let Some(change) = quote.percent_change {
                        gainers.push(TopGainer {
                            symbol: symbol.to_string(),
                            price: quote.current_price,
                            change,
                        });
                    }
                }
                Err(e) => warn!("Skipping {} in top gainers: {}", symbol, e),
            }
        }

        gainers.sort_by(|a, b| b.change.partial_cmp(&a.change).unwrap_or(Ordering::Equal));
        Ok(gainers)
    }
}

/// Generates a plausible-looking recent history from the current price:
/// one point per day ending today, each within ±1% of the quote.
pub(crate) fn synthetic_history(current_price: f64) -> Vec<HistoricalClose> {
    let mut rng = rand::thread_rng();
    let today = Utc::now().date_naive();

    (0..HISTORY_DAYS as i64)
        .map(|i| {
            let variation = 1.0 + (rng.gen::<f64>() - 0.5) * 0.02;
            HistoricalClose {
                date: today - Duration::days(i),
                close: current_price * variation,
            }
        })
        .collect()
}

/// Orders search results: exact symbol match first, then prefix matches,
/// then everything else. The sort is stable, so provider order survives
/// within each tier.
pub(crate) fn rank_search_results(results: &mut [SearchResult], query: &str) {
    results.sort_by_key(|r| {
        if r.symbol == query {
            0
        } else if r.symbol.starts_with(query) {
            1
        } else {
            2
        }
    });
}

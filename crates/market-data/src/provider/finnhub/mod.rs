//! Finnhub market data client.
//!
//! Endpoints used:
//! - `/quote` for real-time quotes
//! - `/company-news` for symbol news
//! - `/search` for symbol search
//! - `/stock/profile2` for company profiles
//!
//! Finnhub free tier is limited to 60 API calls per minute.
//! API documentation: https://finnhub.io/docs/api

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{CompanyProfile, NewsArticle, Quote, SearchResult};

const BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER_ID: &str = "FINNHUB";

/// Response from /quote
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price
    c: Option<f64>,
    /// Change
    d: Option<f64>,
    /// Percent change
    dp: Option<f64>,
    /// High price of the day
    h: Option<f64>,
    /// Low price of the day
    l: Option<f64>,
    /// Open price of the day
    o: Option<f64>,
    /// Previous close
    pc: Option<f64>,
    /// Timestamp (Unix)
    t: Option<i64>,
}

/// One item from /company-news
#[derive(Debug, Deserialize)]
struct NewsItem {
    headline: Option<String>,
    summary: Option<String>,
    source: Option<String>,
    url: Option<String>,
    image: Option<String>,
    datetime: Option<i64>,
}

/// Response from /search
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    description: String,
    display_symbol: String,
    symbol: String,
    #[serde(rename = "type")]
    security_type: String,
    #[serde(default)]
    exchange: Option<String>,
}

/// Response from /stock/profile2
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    name: Option<String>,
    ticker: Option<String>,
    exchange: Option<String>,
}

/// Error response body from Finnhub
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
}

/// Finnhub market data client.
pub struct FinnhubProvider {
    client: Client,
    api_key: String,
}

impl FinnhubProvider {
    /// Create a new Finnhub client with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a GET request to the Finnhub API.
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<String, MarketDataError> {
        let url = format!("{}{}", BASE_URL, endpoint);

        let mut request = self.client.get(&url).header("X-Finnhub-Token", &self.api_key);
        for (key, value) in params {
            request = request.query(&[(key, value)]);
        }

        debug!("Finnhub request: {} with {} params", endpoint, params.len());

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: "Invalid or missing API key".to_string(),
            });
        }

        // Finnhub reports quota exhaustion as 403
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(error_msg) = error_resp.error {
                    return Err(MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: error_msg,
                    });
                }
            }

            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }

    /// Fetch the real-time quote for a symbol.
    pub async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let params = [("symbol", symbol)];
        let text = self.fetch("/quote", &params).await?;

        let response: QuoteResponse =
            serde_json::from_str(&text).map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse quote response: {}", e),
            })?;

        let current_price = response.c.ok_or_else(|| {
            MarketDataError::MissingData(format!("No current price for symbol: {}", symbol))
        })?;

        // Finnhub returns all-zero payloads for unknown symbols instead of an error
        if current_price == 0.0 && response.o.unwrap_or(0.0) == 0.0 {
            return Err(MarketDataError::SymbolNotFound(format!(
                "Symbol not found or no trading data: {}",
                symbol
            )));
        }

        Ok(Quote {
            current_price,
            change: response.d,
            percent_change: response.dp,
            high: response.h,
            low: response.l,
            open: response.o,
            previous_close: response.pc,
            timestamp: response.t,
        })
    }

    /// Fetch company news for a symbol over a date range.
    pub async fn company_news(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NewsArticle>, MarketDataError> {
        let from_str = from.format("%Y-%m-%d").to_string();
        let to_str = to.format("%Y-%m-%d").to_string();
        let params = [("symbol", symbol), ("from", from_str.as_str()), ("to", to_str.as_str())];
        let text = self.fetch("/company-news", &params).await?;

        let items: Vec<NewsItem> =
            serde_json::from_str(&text).map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse news response: {}", e),
            })?;

        let articles = items
            .into_iter()
            .filter_map(|item| {
                item.headline.map(|headline| NewsArticle {
                    headline,
                    summary: item.summary,
                    source: item.source,
                    url: item.url,
                    image: item.image,
                    datetime: item.datetime,
                })
            })
            .collect();

        Ok(articles)
    }

    /// Search for symbols matching the query.
    pub async fn symbol_search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let params = [("q", query)];
        let text = self.fetch("/search", &params).await?;

        let response: SearchResponse =
            serde_json::from_str(&text).map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse search response: {}", e),
            })?;

        Ok(response
            .result
            .into_iter()
            .map(|item| SearchResult {
                symbol: item.symbol,
                description: item.description,
                display_symbol: item.display_symbol,
                security_type: item.security_type,
                exchange: item.exchange,
            })
            .collect())
    }

    /// Fetch the company profile for a symbol.
    ///
    /// Returns `None` when Finnhub has no profile (it answers with `{}`).
    pub async fn company_profile(
        &self,
        symbol: &str,
    ) -> Result<Option<CompanyProfile>, MarketDataError> {
        let params = [("symbol", symbol)];
        let text = self.fetch("/stock/profile2", &params).await?;

        let response: ProfileResponse =
            serde_json::from_str(&text).map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse profile response: {}", e),
            })?;

        let profile = CompanyProfile {
            name: response.name,
            ticker: response.ticker,
            exchange: response.exchange,
        };

        if profile.is_empty() {
            return Ok(None);
        }
        Ok(Some(profile))
    }
}

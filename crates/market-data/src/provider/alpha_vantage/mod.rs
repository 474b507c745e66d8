//! Alpha Vantage market data client.
//!
//! Only the TIME_SERIES_DAILY endpoint is used, for recent daily closes.
//! Alpha Vantage free tier is limited to 5 API calls per minute; rate
//! limiting shows up as a "Note"/"Information" body, not an HTTP error.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::HistoricalClose;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// TIME_SERIES_DAILY response
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyQuote>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyQuote {
    #[serde(rename = "4. close")]
    close: String,
}

/// Alpha Vantage market data client.
pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
}

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage client with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Fetch up to `limit` most recent daily closes for a symbol, newest first.
    pub async fn daily_closes(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<HistoricalClose>, MarketDataError> {
        let params = [
            ("function", "TIME_SERIES_DAILY"),
            ("symbol", symbol),
            ("outputsize", "compact"),
            ("apikey", self.api_key.as_str()),
        ];

        debug!("Alpha Vantage daily series request for {}", symbol);

        let response = self
            .client
            .get(BASE_URL)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
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
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body: TimeSeriesResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to parse time series response: {}", e),
                })?;

        if let Some(message) = body.error_message {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message,
            });
        }

        // Rate limit notices arrive as a 200 with a "Note" or "Information" body
        if let Some(note) = body.note.or(body.information) {
            warn!("Alpha Vantage throttle notice for {}: {}", symbol, note);
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let series = body.time_series.ok_or_else(|| {
            MarketDataError::MissingData(format!("No daily time series for symbol: {}", symbol))
        })?;

        let mut closes: Vec<HistoricalClose> = series
            .into_iter()
            .filter_map(|(date_str, quote)| {
                let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").ok()?;
                let close = quote.close.parse::<f64>().ok()?;
                Some(HistoricalClose { date, close })
            })
            .collect();

        closes.sort_by(|a, b| b.date.cmp(&a.date));
        closes.truncate(limit);

        Ok(closes)
    }
}

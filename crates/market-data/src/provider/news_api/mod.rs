//! NewsAPI client, used as the fallback news source.
//!
//! Queries `/v2/everything` by symbol, English only, newest first.
//! API documentation: https://newsapi.org/docs/endpoints/everything

use std::time::Duration;

use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::NewsArticle;

const BASE_URL: &str = "https://newsapi.org/v2/everything";
const PROVIDER_ID: &str = "NEWS_API";

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    articles: Vec<Article>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

/// NewsAPI client.
pub struct NewsApiProvider {
    client: Client,
    api_key: String,
}

impl NewsApiProvider {
    /// Create a new NewsAPI client with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Search recent articles mentioning the query, newest first.
    pub async fn everything(&self, query: &str) -> Result<Vec<NewsArticle>, MarketDataError> {
        let params = [
            ("q", query),
            ("language", "en"),
            ("sortBy", "publishedAt"),
            ("apiKey", self.api_key.as_str()),
        ];

        debug!("NewsAPI everything request for {}", query);

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

        let body: EverythingResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to parse news response: {}", e),
                })?;

        // NewsAPI reports errors in-band with status != "ok"
        if body.status != "ok" {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: body
                    .message
                    .unwrap_or_else(|| "Failed to fetch news".to_string()),
            });
        }

        let articles = body
            .articles
            .into_iter()
            .filter_map(|article| {
                let datetime = article
                    .published_at
                    .as_deref()
                    .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                    .map(|dt| dt.timestamp());
                article.title.map(|headline| NewsArticle {
                    headline,
                    summary: article.description,
                    source: article.source.and_then(|s| s.name),
                    url: article.url,
                    image: article.url_to_image,
                    datetime,
                })
            })
            .collect();

        Ok(articles)
    }
}

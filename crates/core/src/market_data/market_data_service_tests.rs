#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::{Duration as ChronoDuration, Utc};

    use crate::errors::{Error, Result};
    use crate::market_data::market_data_service::{rank_search_results, synthetic_history};
    use crate::market_data::{QuoteCache, StockBundle};
    use papertrade_market_data::{MarketDataError, Quote, SearchResult};

    fn bundle(price: f64) -> StockBundle {
        StockBundle {
            quote: Quote::with_price(price),
            historical: Vec::new(),
        }
    }

    fn search_result(symbol: &str) -> SearchResult {
        SearchResult {
            symbol: symbol.to_string(),
            description: format!("{} Inc", symbol),
            display_symbol: symbol.to_string(),
            security_type: "Common Stock".to_string(),
            exchange: Some("NASDAQ".to_string()),
        }
    }

    #[test]
    fn synthetic_history_has_expected_shape() {
        let price = 150.0;
        let history = synthetic_history(price);

        assert_eq!(history.len(), 30);

        let today = Utc::now().date_naive();
        for (i, point) in history.iter().enumerate() {
            assert_eq!(point.date, today - ChronoDuration::days(i as i64));
            assert!(point.close >= price * 0.99, "close {} below bound", point.close);
            assert!(point.close <= price * 1.01, "close {} above bound", point.close);
        }
    }

    #[test]
    fn rank_prefers_exact_then_prefix_matches() {
        let mut results = vec![
            search_result("AAPL.MX"),
            search_result("ZAAPL"),
            search_result("AAPL"),
            search_result("AAPLW"),
        ];

        rank_search_results(&mut results, "AAPL");

        assert_eq!(results[0].symbol, "AAPL");
        assert_eq!(results[1].symbol, "AAPL.MX");
        assert_eq!(results[2].symbol, "AAPLW");
        assert_eq!(results[3].symbol, "ZAAPL");
    }

    #[tokio::test]
    async fn cache_serves_second_read_without_fetching() {
        let cache = QuoteCache::new();
        let calls = AtomicUsize::new(0);

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(bundle(101.5))
        };

        let first = cache.get_or_fetch("AAPL", fetch).await.unwrap();
        let second = cache
            .get_or_fetch("AAPL", || async { unreachable!("must hit the cache") })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.quote.current_price, second.quote.current_price);
    }

    #[tokio::test]
    async fn cache_refetches_once_stale() {
        let cache = QuoteCache::with_ttl(Duration::ZERO);
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .get_or_fetch("MSFT", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(bundle(320.0))
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn cache_keeps_nothing_on_fetch_failure() {
        let cache = QuoteCache::new();

        let failed: Result<StockBundle> = cache
            .get_or_fetch("GOOGL", || async {
                Err(Error::MarketData(MarketDataError::MissingData(
                    "no current price".to_string(),
                )))
            })
            .await;
        assert!(failed.is_err());

        // The next read must fetch again rather than see a cached error
        let calls = AtomicUsize::new(0);
        cache
            .get_or_fetch("GOOGL", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(bundle(2800.0))
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cache_entries_are_per_symbol() {
        let cache = QuoteCache::new();
        cache.insert("AAPL", bundle(150.0));
        cache.insert("MSFT", bundle(320.0));

        assert_eq!(cache.get("AAPL").unwrap().quote.current_price, 150.0);
        assert_eq!(cache.get("MSFT").unwrap().quote.current_price, 320.0);
        assert!(cache.get("AMZN").is_none());
    }
}

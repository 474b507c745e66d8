use std::time::Duration;

/// How long a cached quote+history bundle stays fresh
pub const QUOTE_CACHE_TTL: Duration = Duration::from_secs(300);

/// Number of daily closes returned with a stock bundle
pub const HISTORY_DAYS: usize = 30;

/// Maximum news items returned per symbol
pub const NEWS_RESULT_LIMIT: usize = 10;

/// Maximum symbol search results
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// Most recent messages returned by the discussion feed
pub const MESSAGE_FEED_LIMIT: i64 = 100;

/// Fixed universe scanned for the top-gainers endpoint
pub const TOP_GAINER_SYMBOLS: [&str; 5] = ["AAPL", "GOOGL", "MSFT", "AMZN", "META"];

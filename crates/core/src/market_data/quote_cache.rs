//! Per-symbol TTL cache for quote+history bundles.

use std::collections::HashMap;
use std::future::Future;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use super::market_data_model::StockBundle;
use crate::constants::QUOTE_CACHE_TTL;
use crate::errors::Result;

struct CacheEntry {
    fetched_at: Instant,
    bundle: StockBundle,
}

/// Process-lifetime cache of the last fetched bundle per symbol.
///
/// Entries are created or overwritten lazily and expire by age only; the
/// map grows with the symbol universe and is never swept. There is no
/// per-entry locking: concurrent misses for the same symbol may both hit
/// the provider, and the last write wins. That is acceptable because the
/// fetch is idempotent and staleness, not corruption, is the only risk.
pub struct QuoteCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::with_ttl(QUOTE_CACHE_TTL)
    }

    /// Cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached bundle when present and younger than the TTL.
    pub fn get(&self, symbol: &str) -> Option<StockBundle> {
        let entries = self.entries.read().unwrap();
        let entry = entries.get(symbol)?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(entry.bundle.clone())
        } else {
            None
        }
    }

    /// Stores a bundle for the symbol, stamping it with the current time.
    pub fn insert(&self, symbol: &str, bundle: StockBundle) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            symbol.to_string(),
            CacheEntry {
                fetched_at: Instant::now(),
                bundle,
            },
        );
    }

    /// Returns the fresh cached bundle, or runs `fetch` and caches its
    /// result. A failed fetch caches nothing.
    pub async fn get_or_fetch<F, Fut>(&self, symbol: &str, fetch: F) -> Result<StockBundle>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<StockBundle>>,
    {
        if let Some(bundle) = self.get(symbol) {
            log::debug!("Returning cached data for {}", symbol);
            return Ok(bundle);
        }
        let bundle = fetch().await?;
        self.insert(symbol, bundle.clone());
        Ok(bundle)
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new()
    }
}

//! Caching layer for quotes to reduce API calls

use crate::providers::QuoteSnapshot;
use cached::{Cached, TimedCache};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Thread-safe, time-bounded cache of quote snapshots keyed by symbol
#[derive(Clone)]
pub struct QuoteCache {
    cache: Arc<RwLock<TimedCache<String, QuoteSnapshot>>>,
}

impl QuoteCache {
    /// Create a new cache with specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a snapshot from the cache
    pub async fn get(&self, symbol: &str) -> Option<QuoteSnapshot> {
        let mut cache = self.cache.write().await;
        cache.cache_get(symbol).cloned()
    }

    /// Insert a snapshot into the cache
    pub async fn insert(&self, snapshot: QuoteSnapshot) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(snapshot.symbol.clone(), snapshot);
    }

    /// Get or fetch a snapshot using the provided fetcher
    ///
    /// Only priced snapshots are cached; `None` and errors are always
    /// re-fetched on the next call.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        symbol: &str,
        fetcher: F,
    ) -> Result<Option<QuoteSnapshot>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<QuoteSnapshot>, E>>,
    {
        if let Some(snapshot) = self.get(symbol).await {
            debug!(symbol = %symbol, "Quote cache hit");
            return Ok(Some(snapshot));
        }

        debug!(symbol = %symbol, "Quote cache miss");
        let fetched = fetcher().await?;
        if let Some(snapshot) = &fetched {
            self.insert(snapshot.clone()).await;
        }
        Ok(fetched)
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(symbol: &str) -> QuoteSnapshot {
        QuoteSnapshot {
            symbol: symbol.to_string(),
            price: 100.0,
            change_percent: 0.5,
        }
    }

    #[tokio::test]
    async fn test_cache_insert_and_get() {
        let cache = QuoteCache::new(Duration::from_secs(60));
        cache.insert(snapshot("NVDA")).await;

        assert_eq!(cache.get("NVDA").await, Some(snapshot("NVDA")));
        assert_eq!(cache.get("AMD").await, None);
    }

    #[tokio::test]
    async fn test_get_or_fetch_caches_priced_only() {
        let cache = QuoteCache::new(Duration::from_secs(60));
        let mut call_count = 0;

        let result = cache
            .get_or_fetch("NVDA", || {
                call_count += 1;
                async { Ok::<_, String>(Some(snapshot("NVDA"))) }
            })
            .await
            .unwrap();
        assert_eq!(result, Some(snapshot("NVDA")));

        let result = cache
            .get_or_fetch("NVDA", || {
                call_count += 1;
                async { Ok::<_, String>(None) }
            })
            .await
            .unwrap();
        assert_eq!(result, Some(snapshot("NVDA")));
        assert_eq!(call_count, 1);

        cache
            .get_or_fetch("PRIV", || async { Ok::<_, String>(None) })
            .await
            .unwrap();
        assert_eq!(cache.len().await, 1);
    }

    #[test]
    fn test_expired_entries_refetch() {
        tokio_test::block_on(async {
            let cache = QuoteCache::new(Duration::from_millis(1));
            cache.insert(snapshot("NVDA")).await;
            std::thread::sleep(Duration::from_millis(20));
            assert_eq!(cache.get("NVDA").await, None);

            cache.insert(snapshot("AMD")).await;
            cache.clear().await;
            assert!(cache.is_empty().await);
        });
    }
}

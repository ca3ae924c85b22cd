use std::collections::HashMap;
use std::time::{Duration, Instant};

use camlist_core::FilterSet;

/// Default lifetime of a cached API response.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Fixed-TTL memo for API responses, keyed by endpoint plus normalized
/// request parameters.
///
/// Time is passed in by the caller, which keeps expiry deterministic under
/// test. An expired entry misses on [`ResponseCache::get`] but stays
/// reachable through [`ResponseCache::get_stale`], which backs the "serve
/// expired data when the API is down" fallback; [`ResponseCache::purge_expired`]
/// is the eviction path.
pub struct ResponseCache<V> {
    ttl: Duration,
    entries: HashMap<String, CacheEntry<V>>,
}

impl<V> ResponseCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// A fresh entry for `key`, or `None` on miss. An entry past its TTL
    /// counts as a miss but is kept for [`ResponseCache::get_stale`].
    pub fn get(&self, key: &str, now: Instant) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|entry| now.duration_since(entry.stored_at) < self.ttl)
            .map(|entry| &entry.value)
    }

    /// The entry for `key` regardless of age. Only for degraded-mode reads
    /// after a fetch failure.
    pub fn get_stale(&self, key: &str) -> Option<&V> {
        self.entries.get(key).map(|entry| &entry.value)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V, now: Instant) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }

    /// Drops every entry past its TTL.
    pub fn purge_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.duration_since(entry.stored_at) < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

/// Cache key for one listing request. Filter parameters are sorted inside
/// `cache_token`, so equivalent filter sets share an entry.
pub fn page_cache_key(endpoint: &str, page: u32, limit: u32, filters: &FilterSet) -> String {
    format!(
        "{endpoint}?page={page}&limit={limit}&{}",
        filters.cache_token()
    )
}

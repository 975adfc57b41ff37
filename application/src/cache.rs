//! Time-bounded memoization cache.
//!
//! Keys whole computations by a caller-supplied fingerprint string. Entries
//! live in a [`DashMap`], so lookups for unrelated fingerprints contend only
//! within their shard and concurrent rounds never serialize on one lock.
//!
//! The cache is a performance layer only: dropping it changes latency and
//! cost, never observable behavior.

use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Fingerprint-keyed cache with a fixed validity window
pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Look up a fingerprint; expired entries are dropped on access
    pub fn get(&self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    /// Store a value with a fresh timestamp, replacing any prior entry
    pub fn put(&self, key: impl Into<String>, value: V) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop one entry by fingerprint
    pub fn evict(&self, key: &str) {
        self.entries.remove(key);
    }

    /// Drop every entry past its validity window
    pub fn purge_expired(&self) {
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_hit_within_ttl() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(60));
        cache.put("fp", "value".to_string());

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get("fp"), Some("value".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_drops_entry() {
        let cache: TtlCache<String> = TtlCache::new(Duration::from_secs(60));
        cache.put("fp", "value".to_string());

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.get("fp"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_put_refreshes_timestamp() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        cache.put("fp", 1);

        tokio::time::advance(Duration::from_secs(40)).await;
        cache.put("fp", 2);

        tokio::time::advance(Duration::from_secs(40)).await;
        // 80s after first put, 40s after second: still valid
        assert_eq!(cache.get("fp"), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_evict_and_purge() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        cache.put("a", 1);
        cache.put("b", 2);
        cache.evict("a");
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.len(), 1);

        tokio::time::advance(Duration::from_secs(61)).await;
        cache.put("c", 3);
        cache.purge_expired();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("c"), Some(3));
    }

    #[tokio::test]
    async fn test_miss_on_unknown_key() {
        let cache: TtlCache<u32> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("nope"), None);
    }
}

//! Cache Store Module
//!
//! Owned key-to-entry map backing the response cache.
//!
//! The store never evicts. Stale entries stay in memory until the next miss
//! on the same key overwrites them, so the map grows with every distinct
//! key seen during the process lifetime.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheKey, CacheStats};

// == Cache Store ==
/// Hit and miss counters are atomics so lookups only need `&self`.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: HashMap<CacheKey, CacheEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Looks up an entry without touching freshness or counters.
    pub fn get(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Put ==
    /// Inserts or overwrites the entry for `key`, stamped with `now`.
    pub fn put(&mut self, key: CacheKey, value: Value, now: Instant) {
        self.entries.insert(key, CacheEntry::new(value, now));
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            total_entries: self.entries.len(),
        }
    }

    // == Memory Usage ==
    /// Approximate size of keys plus serialized values, in bytes.
    pub fn approx_memory_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, entry)| key.approx_size() + entry.value.to_string().len())
            .sum()
    }

    // == Length ==
    /// Returns the number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn key(lang: &str) -> CacheKey {
        CacheKey::new("trending").arg("lang", lang)
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = CacheStore::new();
        let now = Instant::now();

        store.put(key("en-US"), json!([{"id": 1}]), now);
        let entry = store.get(&key("en-US")).unwrap();

        assert_eq!(entry.value, json!([{"id": 1}]));
        assert_eq!(entry.inserted_at, now);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = CacheStore::new();
        assert!(store.get(&key("en-US")).is_none());
    }

    #[test]
    fn test_store_overwrite_replaces_entry() {
        let mut store = CacheStore::new();
        let start = Instant::now();
        let later = start + Duration::from_secs(30);

        store.put(key("en-US"), json!(["old"]), start);
        store.put(key("en-US"), json!(["new"]), later);

        let entry = store.get(&key("en-US")).unwrap();
        assert_eq!(entry.value, json!(["new"]));
        assert_eq!(entry.inserted_at, later);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_keeps_stale_entries() {
        let mut store = CacheStore::new();
        let start = Instant::now();
        store.put(key("en-US"), json!([]), start);

        let entry = store.get(&key("en-US")).unwrap();
        assert!(!entry.is_fresh(start + Duration::from_secs(3600), Duration::from_secs(600)));
        assert_eq!(store.len(), 1, "stale entries are not swept");
    }

    #[test]
    fn test_store_grows_without_bound() {
        let mut store = CacheStore::new();
        let now = Instant::now();

        for i in 0..5_000 {
            store.put(CacheKey::new("search").arg("q", format!("query{}", i)), json!([]), now);
        }

        assert_eq!(store.len(), 5_000);
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();
        store.put(key("en-US"), json!([]), Instant::now());
        store.record_hit();
        store.record_miss();

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_memory_usage() {
        let mut store = CacheStore::new();
        assert_eq!(store.approx_memory_bytes(), 0);

        store.put(key("en-US"), json!(["abc"]), Instant::now());
        assert!(store.approx_memory_bytes() >= "[\"abc\"]".len());
    }
}

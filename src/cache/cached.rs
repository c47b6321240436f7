//! Cached Fetcher Module
//!
//! Wraps an async fetch so repeated calls with the same key inside the TTL
//! window are answered from the store.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::{CacheKey, CacheStore};
use crate::error::UpstreamError;

// == Cached Fetcher ==
/// Cache-aware front for any fetch returning a JSON value.
///
/// Only successful results are stored. Concurrent misses on one key may
/// each run their fetch; the last one to finish wins the slot.
#[derive(Debug, Clone)]
pub struct CachedFetcher {
    store: Arc<RwLock<CacheStore>>,
}

impl CachedFetcher {
    pub fn new(store: Arc<RwLock<CacheStore>>) -> Self {
        Self { store }
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> &Arc<RwLock<CacheStore>> {
        &self.store
    }

    // == Get Or Fetch ==
    /// Returns the fresh cached value for `key`, or runs `fetch` and caches
    /// its success.
    ///
    /// Lookups share a read lock, which is released before `fetch` is
    /// awaited.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        key: CacheKey,
        ttl: Duration,
        fetch: F,
    ) -> Result<Value, UpstreamError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, UpstreamError>>,
    {
        {
            let store = self.store.read().await;
            let cached = store
                .get(&key)
                .filter(|entry| entry.is_fresh(Instant::now(), ttl))
                .map(|entry| entry.value.clone());

            if let Some(value) = cached {
                store.record_hit();
                debug!("Cache hit for {}", key);
                return Ok(value);
            }
            store.record_miss();
        }

        let value = fetch().await?;

        self.store
            .write()
            .await
            .put(key.clone(), value.clone(), Instant::now());
        info!("Cache miss for {}, storing for {}s", key, ttl.as_secs());

        Ok(value)
    }
}

//! Cache Module
//!
//! Process-lifetime TTL cache for upstream results.

mod cached;
mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use cached::CachedFetcher;
pub use entry::CacheEntry;
pub use key::CacheKey;
pub use stats::CacheStats;
pub use store::CacheStore;

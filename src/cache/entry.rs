//! Cache Entry Module
//!
//! Defines a cached upstream result together with the instant it was stored.

use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

// == Cache Entry ==
/// A single cached result.
///
/// Entries are never mutated after creation; a fresh fetch replaces the
/// whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored JSON result
    pub value: Value,
    /// When the result was stored
    pub inserted_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with `inserted_at`.
    pub fn new(value: Value, inserted_at: Instant) -> Self {
        Self { value, inserted_at }
    }

    // == Is Fresh ==
    /// Checks whether the entry is still within its TTL window.
    ///
    /// Boundary condition: an entry whose age equals `ttl` is already stale.
    /// A `now` earlier than `inserted_at` counts as age zero.
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        self.age(now) < ttl
    }

    // == Age ==
    /// Returns how long ago the entry was stored.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }
}

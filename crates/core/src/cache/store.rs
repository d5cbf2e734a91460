//! In-memory response cache with a fixed TTL.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::clock::{Clock, SystemClock};
use super::key::CacheKey;
use crate::constants::DEFAULT_CACHE_TTL_MS;

/// Cache settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum age of an entry before it reads as absent
    pub ttl: Duration,
    /// Optional capacity bound; `None` keeps one entry per key ever written
    pub max_entries: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_millis(DEFAULT_CACHE_TTL_MS),
            max_entries: None,
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

/// Key-value store with per-entry freshness tracking.
///
/// Expiry is a read-time predicate: stale entries stay in the map until they
/// are overwritten, purged, or evicted to make room under `max_entries`.
pub struct CacheStore<V> {
    entries: DashMap<CacheKey, CacheEntry<V>>,
    ttl: chrono::Duration,
    max_entries: Option<usize>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            // A TTL beyond the chrono range never expires
            ttl: chrono::Duration::from_std(config.ttl).unwrap_or(chrono::Duration::MAX),
            max_entries: config.max_entries,
            clock,
        }
    }

    /// Returns the value for `key` if it was stored less than one TTL ago.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| entry.value.clone())
    }

    /// Stores `value` under `key`, replacing any previous entry, and hands the
    /// value back.
    pub fn set(&self, key: CacheKey, value: V) -> V {
        let now = self.clock.now();
        if let Some(max) = self.max_entries {
            if !self.entries.contains_key(&key) && self.entries.len() >= max {
                self.make_room(max);
            }
        }
        self.entries.insert(
            key,
            CacheEntry {
                value: value.clone(),
                stored_at: now,
            },
        );
        value
    }

    /// Drops every stale entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| self.is_fresh(entry, now));
        before.saturating_sub(self.entries.len())
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl.to_std().unwrap_or_default()
    }

    fn is_fresh(&self, entry: &CacheEntry<V>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.stored_at) < self.ttl
    }

    fn make_room(&self, max: usize) {
        let purged = self.purge_expired();
        if purged > 0 {
            log::debug!("Purged {} expired cache entries", purged);
        }
        while self.entries.len() >= max {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().stored_at)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    log::debug!("Evicting cache entry {}", key);
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

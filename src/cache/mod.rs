//! In-memory response cache with TTL and fingerprint validation
//!
//! One instance is created by the host's composition root and handed to the
//! components that need it. Access is single-threaded and last-writer-wins.

pub mod clock;

use crate::config::EngineConfig;
use serde::Serialize;
use std::collections::HashMap;

pub use clock::{Clock, ManualClock, SystemClock};

/// Serialize query parameters into a cache fingerprint
pub fn fingerprint<S: Serialize + ?Sized>(params: &S) -> serde_json::Result<String> {
    serde_json::to_string(params)
}

struct CacheEntry<T> {
    data: T,
    timestamp: u64,
    fingerprint: String,
}

/// Snapshot of cache occupancy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    /// Cached keys in sorted order
    pub keys: Vec<String>,
}

/// Key/value cache whose entries expire after a fixed TTL and are only
/// served back for the fingerprint they were stored under.
pub struct ResponseCache<T, C: Clock = SystemClock> {
    entries: HashMap<String, CacheEntry<T>>,
    ttl_ms: u64,
    capacity: Option<usize>,
    clock: C,
}

impl<T> ResponseCache<T, SystemClock> {
    /// Unbounded cache on the wall clock
    pub fn new(ttl_ms: u64) -> Self {
        Self::with_clock(ttl_ms, SystemClock)
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.cache_ttl_ms).with_capacity(config.cache_capacity)
    }
}

impl<T, C: Clock> ResponseCache<T, C> {
    pub fn with_clock(ttl_ms: u64, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms,
            capacity: None,
            clock,
        }
    }

    /// Bound the number of entries; 0 leaves the cache unbounded
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = (capacity > 0).then_some(capacity);
        self
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Cached value for `key`, if present, fresh and stored under `fingerprint`.
    /// Expired entries are evicted here.
    pub fn get(&mut self, key: &str, fingerprint: &str) -> Option<&T> {
        let now = self.clock.now_ms();
        let expired = now.saturating_sub(self.entries.get(key)?.timestamp) > self.ttl_ms;
        if expired {
            self.entries.remove(key);
            log::debug!("Cache entry {} expired", key);
            return None;
        }

        let entry = self.entries.get(key)?;
        if entry.fingerprint != fingerprint {
            log::debug!("Cache entry {} has stale parameters", key);
            return None;
        }

        log::debug!("Cache hit for {}", key);
        Some(&entry.data)
    }

    /// Store `data` under `key`, replacing any previous entry
    pub fn set(&mut self, key: &str, data: T, fingerprint: &str) {
        if let Some(capacity) = self.capacity {
            if !self.entries.contains_key(key) && self.entries.len() >= capacity {
                self.evict_oldest();
            }
        }

        self.entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                timestamp: self.clock.now_ms(),
                fingerprint: fingerprint.to_string(),
            },
        );
    }

    /// Remove one entry, or everything when `key` is `None`
    pub fn clear(&mut self, key: Option<&str>) {
        match key {
            Some(key) => {
                self.entries.remove(key);
            }
            None => self.entries.clear(),
        }
    }

    pub fn stats(&self) -> CacheStats {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        CacheStats {
            size: self.entries.len(),
            keys,
        }
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.timestamp)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            log::debug!("Cache full, evicting {}", key);
            self.entries.remove(&key);
        }
    }
}

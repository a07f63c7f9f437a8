use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use super::options::NormalizeOptions;

/// Capacity of the process-wide normalization cache
pub const DEFAULT_CACHE_SIZE: usize = 4000;

/// A memoized normalization outcome
///
/// `Invalid` records a failed normalization so the same key is never retried;
/// it is distinct from a key that has not been seen yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedUrl {
    Valid(String),
    Invalid,
}

impl CachedUrl {
    pub fn into_option(self) -> Option<String> {
        match self {
            CachedUrl::Valid(url) => Some(url),
            CachedUrl::Invalid => None,
        }
    }
}

/// Hit/miss counters for a cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
}

/// Bounded LRU cache of normalized URLs, safe to share between threads
///
/// Every `get` and `put` takes the same lock, so concurrent misses on one key
/// cannot corrupt the recency order. Both racers compute the same value since
/// normalization is deterministic.
pub struct NormalizationCache {
    entries: Mutex<LruCache<String, CachedUrl>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl NormalizationCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        debug!("Initializing NormalizationCache with capacity {}", capacity);

        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cache key for an input and its fully-resolved options
    pub fn key_for(url: &str, options: &NormalizeOptions) -> String {
        format!("{}-{}", url, options.fingerprint())
    }

    pub fn get(&self, key: &str) -> Option<CachedUrl> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn put(&self, key: String, value: CachedUrl) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.put(key, value);
    }

    /// Looks up `key`, computing and storing the value on a miss
    pub fn get_or_insert_with<F>(&self, key: &str, compute: F) -> CachedUrl
    where
        F: FnOnce() -> CachedUrl,
    {
        if let Some(cached) = self.get(key) {
            return cached;
        }

        // Computed outside the lock; normalization can be slow on long inputs
        let value = compute();
        self.put(key.to_string(), value.clone());
        value
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let len = self.entries.lock().unwrap_or_else(PoisonError::into_inner).len();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len,
        }
    }
}

impl Default for NormalizationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

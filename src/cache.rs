//! Page title caching.
//!
//! Resolving a page title scans every route table pattern against the
//! current path, and the layout asks for the title on every render.
//! [`TitleCache`] keeps recent `pathname → title` results in an LRU cache
//! (from the [`lru`] crate, behind the `cache` feature). The layout shell
//! clears it whenever the route table is replaced.
//!
//! [`CacheStats`] tracks hits, misses, and invalidations.
//!
//! # Examples
//!
//! ```
//! use console_navigator::cache::TitleCache;
//!
//! let mut cache = TitleCache::new();
//! cache.insert("/sys/account".to_string(), "Accounts - Console".to_string());
//!
//! assert_eq!(cache.get("/sys/account").as_deref(), Some("Accounts - Console"));
//! assert_eq!(cache.stats().hits, 1);
//! ```

use crate::{debug_log, trace_log};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Counters tracking cache hit/miss rates and invalidations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of lookups answered from the cache.
    pub hits: usize,
    /// Number of lookups that had to be resolved.
    pub misses: usize,
    /// Number of full invalidations (via [`TitleCache::clear`]).
    pub invalidations: usize,
}

impl CacheStats {
    /// Return the hit rate as a value in `0.0..=1.0`.
    ///
    /// Returns `0.0` if no lookups have been performed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of resolved page titles.
#[derive(Debug)]
pub struct TitleCache {
    titles: LruCache<String, String>,
    stats: CacheStats,
}

impl TitleCache {
    /// Default number of cached paths.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache holding up to `capacity` paths. Zero falls back to the
    /// default capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity)
            .or_else(|| NonZeroUsize::new(Self::DEFAULT_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            titles: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Look up the cached title for `pathname`. Updates hit/miss stats.
    pub fn get(&mut self, pathname: &str) -> Option<String> {
        if let Some(title) = self.titles.get(pathname) {
            self.stats.hits += 1;
            trace_log!("Title cache hit for path: '{}'", pathname);
            Some(title.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("Title cache miss for path: '{}'", pathname);
            None
        }
    }

    /// Store a resolved title.
    pub fn insert(&mut self, pathname: String, title: String) {
        self.titles.push(pathname, title);
    }

    /// Drop every entry and count an invalidation.
    pub fn clear(&mut self) {
        let removed = self.titles.len();
        self.titles.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "Title cache cleared: {} entries removed ({} total invalidations, hit rate: {:.1}%)",
            removed,
            self.stats.invalidations,
            self.stats.hit_rate() * 100.0
        );
    }

    /// Return a reference to the current cache statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Return `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Maximum number of cached paths.
    pub fn capacity(&self) -> usize {
        self.titles.cap().get()
    }
}

impl Default for TitleCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_creation() {
        let cache = TitleCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), TitleCache::DEFAULT_CAPACITY);
        assert_eq!(TitleCache::with_capacity(0).capacity(), TitleCache::DEFAULT_CAPACITY);
    }

    #[test]
    fn test_miss_then_hit() {
        let mut cache = TitleCache::new();
        assert!(cache.get("/dash").is_none());
        cache.insert("/dash".to_string(), "Dashboard".to_string());
        assert_eq!(cache.get("/dash").as_deref(), Some("Dashboard"));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = TitleCache::with_capacity(2);
        cache.insert("/a".to_string(), "A".to_string());
        cache.insert("/b".to_string(), "B".to_string());
        cache.get("/a");
        cache.insert("/c".to_string(), "C".to_string());

        assert_eq!(cache.len(), 2);
        assert!(cache.get("/b").is_none());
        assert!(cache.get("/a").is_some());
    }

    #[test]
    fn test_clear_counts_invalidation() {
        let mut cache = TitleCache::new();
        cache.insert("/a".to_string(), "A".to_string());
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_hit_rate_calculation() {
        let mut cache = TitleCache::new();
        cache.get("/a");
        cache.get("/b");
        cache.get("/c");

        cache.insert("/a".to_string(), "A".to_string());
        cache.insert("/b".to_string(), "B".to_string());

        cache.get("/a");
        cache.get("/b");

        assert_eq!(cache.stats().hits, 2);
        assert_eq!(cache.stats().misses, 3);
        assert!((cache.stats().hit_rate() - 0.4).abs() < 0.001);
    }
}

//! Analysis cache (C12): memoizes a full `analyze()` pass keyed by ROM
//! content hash plus the options that affect its result, with bounded LRU
//! eviction and an age ceiling. Not part of the corpus this project is
//! grounded on — no example repo implements an LRU of its own, so this
//! uses the `lru` crate directly rather than inventing a hand-rolled one.

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use lru::LruCache;

use crate::analysis::AnalysisOptions;

const DEFAULT_CAPACITY: usize = 100;
const DEFAULT_MAX_AGE: Duration = Duration::from_secs(30 * 60);

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CacheKey(u64);

impl CacheKey {
    pub fn new(rom_bytes: &[u8], options: &AnalysisOptions) -> Self {
        let mut hasher = DefaultHasher::new();
        rom_bytes.hash(&mut hasher);
        options.entry_points.len().hash(&mut hasher);
        for point in &options.entry_points {
            point.0.hash(&mut hasher);
        }
        options.follow_nmi.hash(&mut hasher);
        options.follow_irq.hash(&mut hasher);
        options.instruction_limit.hash(&mut hasher);
        options.start_address.map(|a| a.0).hash(&mut hasher);
        options.end_address.map(|a| a.0).hash(&mut hasher);
        options.enable_cycle_calc.hash(&mut hasher);
        options.enable_validation.hash(&mut hasher);
        Self(hasher.finish())
    }
}

struct Entry<T> {
    value: T,
    inserted_at: Instant,
}

/// Bounded, age-limited memoization cache. Holds at most `capacity`
/// entries, evicting least-recently-used first; entries older than
/// `max_age` are treated as absent and recomputed on next lookup.
pub struct AnalysisCache<T> {
    inner: LruCache<CacheKey, Entry<T>>,
    max_age: Duration,
    in_flight: Vec<CacheKey>,
}

impl<T> AnalysisCache<T> {
    pub fn new(capacity: usize, max_age: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least 1");
        Self { inner: LruCache::new(capacity), max_age, in_flight: Vec::new() }
    }

    pub fn get(&mut self, key: CacheKey) -> Option<&T> {
        let expired = match self.inner.peek(&key) {
            Some(entry) => entry.inserted_at.elapsed() > self.max_age,
            None => return None,
        };
        if expired {
            self.inner.pop(&key);
            return None;
        }
        self.inner.get(&key).map(|entry| &entry.value)
    }

    pub fn insert(&mut self, key: CacheKey, value: T) {
        self.inner.put(key, Entry { value, inserted_at: Instant::now() });
    }

    /// Marks `key` as currently being computed; returns `false` if it was
    /// already in flight, signalling recursive re-entry to the caller.
    pub fn begin_compute(&mut self, key: CacheKey) -> bool {
        if self.in_flight.contains(&key) {
            return false;
        }
        self.in_flight.push(key);
        true
    }

    pub fn end_compute(&mut self, key: CacheKey) {
        self.in_flight.retain(|k| *k != key);
    }
}

impl<T> Default for AnalysisCache<T> {
    fn default() -> Self { Self::new(DEFAULT_CAPACITY, DEFAULT_MAX_AGE) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_recently_used_beyond_capacity() {
        let mut cache: AnalysisCache<u32> = AnalysisCache::new(2, DEFAULT_MAX_AGE);
        let a = CacheKey(1);
        let b = CacheKey(2);
        let c = CacheKey(3);
        cache.insert(a, 10);
        cache.insert(b, 20);
        cache.insert(c, 30);
        assert!(cache.get(a).is_none());
        assert_eq!(cache.get(b), Some(&20));
        assert_eq!(cache.get(c), Some(&30));
    }

    #[test]
    fn expires_entries_past_max_age() {
        let mut cache: AnalysisCache<u32> = AnalysisCache::new(4, Duration::from_secs(0));
        let key = CacheKey(7);
        cache.insert(key, 42);
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get(key).is_none());
    }

    #[test]
    fn detects_recursive_compute() {
        let mut cache: AnalysisCache<u32> = AnalysisCache::default();
        let key = CacheKey(1);
        assert!(cache.begin_compute(key));
        assert!(!cache.begin_compute(key));
        cache.end_compute(key);
        assert!(cache.begin_compute(key));
    }
}

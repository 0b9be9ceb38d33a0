//! Bounded in-memory cache tier.

use moka::sync::Cache;

use crate::cache::{CacheKey, CachedValue};

/// Default number of entries kept in memory.
pub const DEFAULT_MEMORY_CAPACITY: u64 = 10_000;

/// In-memory tier backed by Moka (TinyLFU admission, LRU eviction).
///
/// Entries past the capacity are evicted; the durable tier still holds
/// them, so an evicted entry costs one durable read, not a recomputation.
pub struct MemoryTier {
    inner: Cache<CacheKey, CachedValue>,
    capacity: u64,
}

impl MemoryTier {
    /// Create a new memory tier with the given capacity.
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
            capacity,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        self.inner.get(key)
    }

    pub fn insert(&self, key: CacheKey, value: CachedValue) {
        self.inner.insert(key, value);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Approximate entry count, after applying pending evictions.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

impl Default for MemoryTier {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStage, Fingerprint};

    fn key(text: &str) -> CacheKey {
        CacheKey::new(CacheStage::Normalize, Fingerprint::of(text))
    }

    #[test]
    fn test_insert_get_clear() {
        let tier = MemoryTier::new(100);
        tier.insert(key("a"), CachedValue::Text("A".to_string()));

        assert_eq!(tier.get(&key("a")), Some(CachedValue::Text("A".to_string())));
        assert_eq!(tier.get(&key("b")), None);
        assert_eq!(tier.entry_count(), 1);

        tier.clear();
        assert_eq!(tier.get(&key("a")), None);
    }

    #[test]
    fn test_capacity_is_bounded() {
        let tier = MemoryTier::new(8);
        for i in 0..64 {
            tier.insert(key(&i.to_string()), CachedValue::Text(i.to_string()));
        }
        assert!(tier.entry_count() <= 8);
        assert_eq!(tier.capacity(), 8);
    }
}

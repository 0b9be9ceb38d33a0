//! Two-tier content cache.
//!
//! [`ContentCache`] maps a content fingerprint to a previously computed
//! pipeline value (normalized text or a tagged token sequence).
//!
//! - **Memory tier**: bounded, volatile, checked first
//! - **Durable tier**: a [`DurableCacheStore`], checked on a memory miss;
//!   hits are promoted into memory
//!
//! Durable failures never escape: a failed read counts as a miss, and a
//! failed write degrades that entry to memory-only caching. `set` reports
//! which of those happened through [`CacheWrite`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use thaifreq::cache::{CacheKey, CacheStage, CacheWrite, CachedValue, ContentCache, Fingerprint};
//! use thaifreq::storage::MemoryStore;
//!
//! let cache = ContentCache::new(1024, Some(Arc::new(MemoryStore::new())));
//! let key = CacheKey::new(CacheStage::Normalize, Fingerprint::of("ข้อความ"));
//!
//! let write = cache.set(key, CachedValue::Text("ข้อความ".to_string()), true);
//! assert_eq!(write, CacheWrite::Persisted);
//! assert!(cache.get(&key).is_some());
//! assert_eq!(cache.stats().memory_hits, 1);
//! ```

pub mod codec;
pub mod fingerprint;
pub mod memory;

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::token::TaggedToken;
use crate::error::Result;
use crate::storage::DurableCacheStore;
use crate::util::deadline::maybe_with_deadline;

pub use fingerprint::Fingerprint;
pub use memory::{DEFAULT_MEMORY_CAPACITY, MemoryTier};

/// Pipeline stage that produced a cached value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheStage {
    /// Output of the text normalizer.
    Normalize,
    /// Output of the token tagger.
    Tokenize,
}

impl CacheStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStage::Normalize => "normalize",
            CacheStage::Tokenize => "tokenize",
        }
    }
}

impl fmt::Display for CacheStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache key: the producing stage plus the fingerprint of its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub stage: CacheStage,
    pub fingerprint: Fingerprint,
}

impl CacheKey {
    pub fn new(stage: CacheStage, fingerprint: Fingerprint) -> Self {
        Self { stage, fingerprint }
    }

    /// Name of this entry in the durable store.
    pub fn storage_key(&self) -> String {
        format!("{}-{}", self.stage, self.fingerprint.to_hex())
    }
}

/// A value produced by a pipeline stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CachedValue {
    Text(String),
    Tagged(Vec<TaggedToken>),
}

/// Outcome of [`ContentCache::set`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheWrite {
    /// Stored in memory and in the durable tier.
    Persisted,
    /// Stored in memory only, as requested (or no durable tier configured).
    MemoryOnly,
    /// Stored in memory; the durable write failed.
    NotPersisted { reason: String },
}

/// Snapshot of cache hit/miss accounting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub memory_hits: u64,
    pub durable_hits: u64,
    pub misses: u64,
    pub total_requests: u64,
    pub hit_rate: f64,
    /// Durable writes that failed and fell back to memory-only.
    pub persist_failures: u64,
    /// Durable reads that failed or returned undecodable data.
    pub read_failures: u64,
}

/// Content-addressed cache with a memory tier and an optional durable tier.
pub struct ContentCache {
    memory: MemoryTier,
    durable: Option<Arc<dyn DurableCacheStore>>,
    io_timeout: Option<Duration>,

    memory_hits: AtomicU64,
    durable_hits: AtomicU64,
    misses: AtomicU64,
    persist_failures: AtomicU64,
    read_failures: AtomicU64,
}

impl ContentCache {
    /// Create a cache with the given memory capacity and durable store.
    pub fn new(memory_capacity: u64, durable: Option<Arc<dyn DurableCacheStore>>) -> Self {
        Self {
            memory: MemoryTier::new(memory_capacity),
            durable,
            io_timeout: None,
            memory_hits: AtomicU64::new(0),
            durable_hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            persist_failures: AtomicU64::new(0),
            read_failures: AtomicU64::new(0),
        }
    }

    /// Create a cache without a durable tier.
    pub fn memory_only(memory_capacity: u64) -> Self {
        Self::new(memory_capacity, None)
    }

    /// Bound every durable read/write/delete by `timeout`.
    pub fn with_io_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.io_timeout = timeout;
        self
    }

    /// Whether a durable tier is configured.
    pub fn has_durable_tier(&self) -> bool {
        self.durable.is_some()
    }

    /// Look up `key`: memory tier first, then the durable tier.
    pub fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        if let Some(value) = self.memory.get(key) {
            self.memory_hits.fetch_add(1, Ordering::Relaxed);
            return Some(value);
        }

        if let Some(value) = self.read_durable(key) {
            self.durable_hits.fetch_add(1, Ordering::Relaxed);
            self.memory.insert(*key, value.clone());
            return Some(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store `value` under `key`.
    ///
    /// Always writes the memory tier; writes the durable tier too unless
    /// `durable` is false.
    pub fn set(&self, key: CacheKey, value: CachedValue, durable: bool) -> CacheWrite {
        let write = match (&self.durable, durable) {
            (Some(store), true) => match self.write_durable(store, &key, &value) {
                Ok(()) => CacheWrite::Persisted,
                Err(e) => {
                    self.persist_failures.fetch_add(1, Ordering::Relaxed);
                    warn!("cache entry {} kept in memory only: {e}", key.storage_key());
                    CacheWrite::NotPersisted {
                        reason: e.to_string(),
                    }
                }
            },
            _ => CacheWrite::MemoryOnly,
        };

        self.memory.insert(key, value);
        write
    }

    /// Empty the memory tier and delete every durable entry.
    ///
    /// The memory tier is cleared even when the durable delete fails.
    pub fn clear(&self) -> Result<()> {
        self.memory.clear();

        if let Some(store) = &self.durable {
            let store = Arc::clone(store);
            maybe_with_deadline("cache-clear", self.io_timeout, move || store.delete_all())??;
            debug!("durable cache cleared");
        }
        Ok(())
    }

    /// Current hit/miss accounting.
    pub fn stats(&self) -> CacheStats {
        let memory_hits = self.memory_hits.load(Ordering::Relaxed);
        let durable_hits = self.durable_hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total_requests = memory_hits + durable_hits + misses;

        let hit_rate = if total_requests > 0 {
            (memory_hits + durable_hits) as f64 / total_requests as f64
        } else {
            0.0
        };

        CacheStats {
            memory_hits,
            durable_hits,
            misses,
            total_requests,
            hit_rate,
            persist_failures: self.persist_failures.load(Ordering::Relaxed),
            read_failures: self.read_failures.load(Ordering::Relaxed),
        }
    }

    /// Reset the accounting counters; entries are kept.
    pub fn reset_stats(&self) {
        self.memory_hits.store(0, Ordering::Relaxed);
        self.durable_hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.persist_failures.store(0, Ordering::Relaxed);
        self.read_failures.store(0, Ordering::Relaxed);
    }

    /// Approximate number of entries held in memory.
    pub fn memory_entry_count(&self) -> u64 {
        self.memory.entry_count()
    }

    fn read_durable(&self, key: &CacheKey) -> Option<CachedValue> {
        let store = Arc::clone(self.durable.as_ref()?);
        let storage_key = key.storage_key();

        let read = {
            let storage_key = storage_key.clone();
            maybe_with_deadline("cache-read", self.io_timeout, move || {
                store.read(&storage_key)
            })
            .and_then(|inner| inner)
        };

        let bytes = match read {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                self.read_failures.fetch_add(1, Ordering::Relaxed);
                warn!("durable cache read for {storage_key} failed: {e}");
                return None;
            }
        };

        match codec::decode(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                self.read_failures.fetch_add(1, Ordering::Relaxed);
                warn!("discarding unreadable cache entry {storage_key}: {e}");
                None
            }
        }
    }

    fn write_durable(
        &self,
        store: &Arc<dyn DurableCacheStore>,
        key: &CacheKey,
        value: &CachedValue,
    ) -> Result<()> {
        let bytes = codec::encode(value)?;
        let store = Arc::clone(store);
        let storage_key = key.storage_key();
        maybe_with_deadline("cache-write", self.io_timeout, move || {
            store.write(&storage_key, &bytes)
        })?
    }
}

impl fmt::Debug for ContentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentCache")
            .field("memory_capacity", &self.memory.capacity())
            .field("durable", &self.durable)
            .field("io_timeout", &self.io_timeout)
            .finish()
    }
}

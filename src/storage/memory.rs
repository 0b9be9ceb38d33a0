//! In-memory storage implementation for testing and ephemeral caching.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::Result;
use crate::storage::traits::{DurableCacheStore, validate_key};

/// An in-memory durable store.
///
/// Nothing survives the process, but the store behaves like the file
/// backend otherwise, which makes it the default for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Box<[u8]>>>,
}

impl MemoryStore {
    /// Create a new, empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total size of all stored values.
    pub fn total_size(&self) -> u64 {
        self.entries
            .read()
            .values()
            .map(|data| data.len() as u64)
            .sum()
    }
}

impl DurableCacheStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.entries.read().get(key).map(|data| data.to_vec()))
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        validate_key(key)?;
        self.entries
            .write()
            .insert(key.to_string(), bytes.to_vec().into_boxed_slice());
        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        self.entries.write().clear();
        Ok(())
    }

    fn entry_count(&self) -> Result<usize> {
        Ok(self.entries.read().len())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_basic_operations() {
        let store = MemoryStore::new();

        assert_eq!(store.read("k1").unwrap(), None);

        store.write("k1", b"hello").unwrap();
        store.write("k2", b"world!").unwrap();
        assert_eq!(store.read("k1").unwrap(), Some(b"hello".to_vec()));
        assert_eq!(store.entry_count().unwrap(), 2);
        assert_eq!(store.total_size(), 11);

        store.write("k1", b"replaced").unwrap();
        assert_eq!(store.read("k1").unwrap(), Some(b"replaced".to_vec()));

        store.delete_all().unwrap();
        assert_eq!(store.entry_count().unwrap(), 0);
        assert_eq!(store.read("k2").unwrap(), None);
    }

    #[test]
    fn test_memory_store_rejects_bad_keys() {
        let store = MemoryStore::new();
        assert!(store.write("../x", b"data").is_err());
    }
}

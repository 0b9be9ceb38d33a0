//! Storage abstraction trait for the durable cache tier.

use crate::error::{Result, ThaifreqError};

/// A key -> bytes store that outlives the in-memory cache tier.
///
/// Implementations must be safe to share across worker threads. Each key
/// is independent, so concurrent writes to the same key may race; the
/// last complete write wins and readers never see a torn value.
pub trait DurableCacheStore: Send + Sync + std::fmt::Debug {
    /// Read the bytes stored under `key`, or `None` when absent.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `bytes` under `key`, replacing any previous value.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Remove every entry owned by this store.
    fn delete_all(&self) -> Result<()>;

    /// Number of entries currently stored.
    fn entry_count(&self) -> Result<usize>;

    /// Get the name of this backend (for logging).
    fn name(&self) -> &'static str;
}

/// Reject keys that could escape a directory-backed store.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ThaifreqError::invalid_argument(format!(
            "Invalid cache key: {key:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("tokenize-abc123").is_ok());
        assert!(validate_key("normalize_01").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b").is_err());
    }
}

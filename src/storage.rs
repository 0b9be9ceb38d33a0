//! Durable storage backends for the content cache.
//!
//! The durable tier of [`ContentCache`](crate::cache::ContentCache) talks to
//! a [`DurableCacheStore`]: a flat key -> bytes namespace with bulk delete.
//! Backends can be swapped without touching the cache.
//!
//! # Storage Types
//!
//! ## FileStore
//! - One file per entry inside a cache directory
//! - Atomic writes through a temporary file + rename
//! - Survives process restarts
//!
//! ## MemoryStore
//! - In-memory map for testing and ephemeral runs
//!
//! # Example
//!
//! ```
//! use thaifreq::storage::{DurableCacheStore, MemoryStore};
//!
//! # fn main() -> thaifreq::error::Result<()> {
//! let store = MemoryStore::new();
//! store.write("normalize-00ff", b"payload")?;
//! assert_eq!(store.read("normalize-00ff")?, Some(b"payload".to_vec()));
//!
//! store.delete_all()?;
//! assert_eq!(store.read("normalize-00ff")?, None);
//! # Ok(())
//! # }
//! ```

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{DurableCacheStore, validate_key};

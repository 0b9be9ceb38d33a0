//! File-based storage implementation.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, ThaifreqError};
use crate::storage::traits::{DurableCacheStore, validate_key};

/// Extension of cache entry files; `delete_all` only touches these.
pub const ENTRY_EXTENSION: &str = "bin";

/// A directory of cache entry files, one per key.
#[derive(Debug)]
pub struct FileStore {
    /// The root directory for storage.
    directory: PathBuf,
}

impl FileStore {
    /// Create a new file store in the given directory.
    pub fn new<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();

        // Create directory if it doesn't exist
        if !directory.exists() {
            fs::create_dir_all(&directory).map_err(|e| {
                ThaifreqError::cache_io(format!(
                    "Failed to create cache directory {}: {e}",
                    directory.display()
                ))
            })?;
        }

        // Verify it's a directory
        if !directory.is_dir() {
            return Err(ThaifreqError::cache_io(format!(
                "Path is not a directory: {}",
                directory.display()
            )));
        }

        Ok(FileStore { directory })
    }

    /// The directory holding the entry files.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Get the full path for a key.
    fn entry_path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.{ENTRY_EXTENSION}"))
    }

    fn entry_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.directory)
            .map_err(|e| ThaifreqError::cache_io(e.to_string()))?
        {
            let entry = entry.map_err(|e| ThaifreqError::cache_io(e.to_string()))?;
            let path = entry.path();

            if path.is_file() && path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Total size in bytes of all entry files.
    pub fn total_size(&self) -> Result<u64> {
        let mut total = 0;
        for path in self.entry_files()? {
            total += path
                .metadata()
                .map_err(|e| ThaifreqError::cache_io(e.to_string()))?
                .len();
        }
        Ok(total)
    }
}

impl DurableCacheStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;

        match fs::read(self.entry_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ThaifreqError::cache_io(format!(
                "Failed to read cache entry {key}: {e}"
            ))),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        validate_key(key)?;

        let temp_file = NamedTempFile::new_in(&self.directory)
            .map_err(|e| ThaifreqError::cache_io(format!("Failed to create temp file: {e}")))?;
        {
            let mut writer = BufWriter::new(&temp_file);
            writer
                .write_all(bytes)
                .and_then(|_| writer.flush())
                .map_err(|e| ThaifreqError::cache_io(format!("Failed to write {key}: {e}")))?;
        }

        temp_file
            .persist(self.entry_path(key))
            .map_err(|e| ThaifreqError::cache_io(format!("Failed to persist {key}: {e}")))?;
        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        for path in self.entry_files()? {
            match fs::remove_file(&path) {
                Ok(()) => {}
                // Another clear() got there first.
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(ThaifreqError::cache_io(format!(
                        "Failed to delete {}: {e}",
                        path.display()
                    )));
                }
            }
        }
        Ok(())
    }

    fn entry_count(&self) -> Result<usize> {
        Ok(self.entry_files()?.len())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

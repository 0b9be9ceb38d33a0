//! Configuration for the analysis pipeline.
//!
//! [`AnalyzerConfig`] is a plain serde struct: every field has a default,
//! so a JSON file only needs the keys it wants to change.
//!
//! ```
//! use thaifreq::config::AnalyzerConfig;
//!
//! let config: AnalyzerConfig = serde_json::from_str(r#"{ "max_workers": 2 }"#).unwrap();
//! assert_eq!(config.max_workers, Some(2));
//! assert!(config.enable_cache);
//! config.validate().unwrap();
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_MEMORY_CAPACITY;
use crate::error::{Result, ThaifreqError};
use crate::parallel::BatchFailureMode;

/// Configuration for a [`FrequencyAggregator`](crate::detector::FrequencyAggregator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Whether pipeline stages memoize their results.
    pub enable_cache: bool,

    /// Directory of the durable cache tier.
    pub cache_dir: PathBuf,

    /// Whether the cache has a durable tier at all.
    pub durable_cache: bool,

    /// Maximum number of entries held by the memory tier.
    pub memory_cache_capacity: u64,

    /// Whether `analyze` records timings in the performance tracker.
    pub enable_performance_tracking: bool,

    /// POS filtering applied when the caller does not choose.
    pub default_filter_pos: bool,

    /// Accepted tags when the caller does not name any.
    /// If None, uses NOUN, VERB, NCMN, VACT and VSTA.
    pub default_target_tags: Option<Vec<String>>,

    /// Worker threads for parallel batches.
    /// If None, uses the number of CPU cores.
    pub max_workers: Option<usize>,

    /// How a batch reports per-item failures.
    pub batch_failure_mode: BatchFailureMode,

    /// Deadline for one linguistic analyzer call, in milliseconds.
    pub tagger_timeout_ms: Option<u64>,

    /// Deadline for one durable cache operation, in milliseconds.
    pub durable_io_timeout_ms: Option<u64>,

    /// Stop words added to the default Thai and English lists.
    pub extra_stopwords: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enable_cache: true,
            cache_dir: PathBuf::from("cache"),
            durable_cache: true,
            memory_cache_capacity: DEFAULT_MEMORY_CAPACITY,
            enable_performance_tracking: true,
            default_filter_pos: true,
            default_target_tags: None,
            max_workers: None,
            batch_failure_mode: BatchFailureMode::FailFast,
            tagger_timeout_ms: None,
            durable_io_timeout_ms: None,
            extra_stopwords: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    /// A configuration with no durable tier, for tests and one-off runs.
    pub fn in_memory() -> Self {
        Self {
            durable_cache: false,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ThaifreqError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config: AnalyzerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the durable cache directory.
    pub fn with_cache_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.cache_dir = dir.into();
        self.durable_cache = true;
        self
    }

    /// Set the number of worker threads.
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Set the batch failure mode.
    pub fn with_batch_failure_mode(mut self, mode: BatchFailureMode) -> Self {
        self.batch_failure_mode = mode;
        self
    }

    /// Set the analyzer deadline.
    pub fn with_tagger_timeout(mut self, timeout: Duration) -> Self {
        self.tagger_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn tagger_timeout(&self) -> Option<Duration> {
        self.tagger_timeout_ms.map(Duration::from_millis)
    }

    pub fn durable_io_timeout(&self) -> Option<Duration> {
        self.durable_io_timeout_ms.map(Duration::from_millis)
    }

    /// Check the configuration for values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.memory_cache_capacity == 0 {
            return Err(ThaifreqError::config(
                "memory_cache_capacity must be at least 1",
            ));
        }
        if self.max_workers == Some(0) {
            return Err(ThaifreqError::config("max_workers must be at least 1"));
        }
        if self.tagger_timeout_ms == Some(0) {
            return Err(ThaifreqError::config("tagger_timeout_ms must be positive"));
        }
        if self.durable_io_timeout_ms == Some(0) {
            return Err(ThaifreqError::config(
                "durable_io_timeout_ms must be positive",
            ));
        }
        if self.enable_cache && self.durable_cache && self.cache_dir.as_os_str().is_empty() {
            return Err(ThaifreqError::config(
                "cache_dir must be set when the durable cache is enabled",
            ));
        }
        if let Some(tags) = &self.default_target_tags {
            if tags.iter().any(|t| t.is_empty()) {
                return Err(ThaifreqError::config("default_target_tags contains an empty tag"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert!(config.enable_cache);
        assert!(config.durable_cache);
        assert_eq!(config.cache_dir, PathBuf::from("cache"));
        assert_eq!(config.memory_cache_capacity, 10_000);
        assert_eq!(config.batch_failure_mode, BatchFailureMode::FailFast);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{ "batch_failure_mode": "collect", "tagger_timeout_ms": 250 }"#)
                .unwrap();
        assert_eq!(config.batch_failure_mode, BatchFailureMode::Collect);
        assert_eq!(config.tagger_timeout(), Some(Duration::from_millis(250)));
        assert!(config.default_filter_pos);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "extra_stopwords": ["แมว"], "durable_cache": false }}"#).unwrap();

        let config = AnalyzerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.extra_stopwords, vec!["แมว".to_string()]);
        assert!(!config.durable_cache);
    }

    #[test]
    fn test_from_json_file_rejects_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_workers": 0 }}"#).unwrap();
        let err = AnalyzerConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ThaifreqError::Config(_)));

        let err = AnalyzerConfig::from_json_file("/nonexistent/thaifreq.json").unwrap_err();
        assert!(matches!(err, ThaifreqError::Config(_)));
    }

    #[test]
    fn test_validate() {
        let config = AnalyzerConfig {
            memory_cache_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AnalyzerConfig {
            default_target_tags: Some(vec!["".to_string()]),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        assert!(AnalyzerConfig::in_memory().validate().is_ok());
    }
}

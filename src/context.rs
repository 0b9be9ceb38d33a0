//! Shared pipeline collaborators.
//!
//! Every stage of one pipeline shares a single [`ContentCache`] and a single
//! [`PerformanceTracker`]. [`PipelineContext`] carries both and is handed
//! to whoever builds the stages.
//!
//! Aggregators built with [`FrequencyAggregator::new`](crate::detector::FrequencyAggregator::new)
//! get a fresh context from their configuration. [`PipelineContext::global`]
//! returns a process-wide default, created on first use from
//! [`AnalyzerConfig::default`] and never torn down; callers that need
//! isolation (tests, embedded use) should build their own context instead.

use std::sync::Arc;

use lazy_static::lazy_static;
use log::{info, warn};

use crate::cache::ContentCache;
use crate::config::AnalyzerConfig;
use crate::perf::PerformanceTracker;
use crate::storage::{DurableCacheStore, FileStore};

lazy_static! {
    static ref GLOBAL_CONTEXT: PipelineContext =
        PipelineContext::from_config(&AnalyzerConfig::default());
}

/// The cache and tracker shared by one pipeline.
#[derive(Clone, Debug)]
pub struct PipelineContext {
    cache: Option<Arc<ContentCache>>,
    tracker: Arc<PerformanceTracker>,
}

impl PipelineContext {
    /// Assemble a context from explicit parts.
    pub fn new(cache: Option<Arc<ContentCache>>, tracker: Arc<PerformanceTracker>) -> Self {
        PipelineContext { cache, tracker }
    }

    /// A context with a memory-only cache.
    pub fn in_memory() -> Self {
        Self::from_config(&AnalyzerConfig::in_memory())
    }

    /// Build the cache and tracker described by `config`.
    ///
    /// A durable directory that cannot be created downgrades the cache to
    /// memory-only rather than failing.
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        let cache = config.enable_cache.then(|| {
            let durable: Option<Arc<dyn DurableCacheStore>> = if config.durable_cache {
                match FileStore::new(&config.cache_dir) {
                    Ok(store) => {
                        info!("durable cache at {}", config.cache_dir.display());
                        Some(Arc::new(store) as Arc<dyn DurableCacheStore>)
                    }
                    Err(e) => {
                        warn!(
                            "durable cache at {} unavailable, using memory only: {e}",
                            config.cache_dir.display()
                        );
                        None
                    }
                }
            } else {
                None
            };

            Arc::new(
                ContentCache::new(config.memory_cache_capacity, durable)
                    .with_io_timeout(config.durable_io_timeout()),
            )
        });

        PipelineContext {
            cache,
            tracker: Arc::new(PerformanceTracker::new()),
        }
    }

    /// The process-wide default context.
    pub fn global() -> &'static PipelineContext {
        &GLOBAL_CONTEXT
    }

    pub fn cache(&self) -> Option<&Arc<ContentCache>> {
        self.cache.as_ref()
    }

    pub fn tracker(&self) -> &Arc<PerformanceTracker> {
        &self.tracker
    }
}

//! Aggregate performance report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::perf::{OperationStats, SystemInfo};

/// Snapshot returned by
/// [`FrequencyAggregator::performance_stats`](super::FrequencyAggregator::performance_stats).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Timing statistics per operation name.
    pub operations: BTreeMap<String, OperationStats>,

    /// Cache accounting; `None` when caching is disabled.
    pub cache: Option<CacheStats>,

    pub total_texts_processed: usize,
    pub total_words_processed: usize,

    /// Mean `analyze` time in seconds over timed calls, 0 when none.
    pub average_processing_time: f64,

    pub system: SystemInfo,
}

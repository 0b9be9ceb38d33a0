//! Bounded parallel execution over independent inputs.
//!
//! [`ParallelExecutor`] owns a rayon thread pool and maps a function over a
//! slice, returning results in input order whatever order the workers
//! finish in. Running with one worker or many gives the same output.
//!
//! Failures are handled according to a [`BatchFailureMode`]:
//!
//! - [`BatchFailureMode::FailFast`]: the batch fails with the error of the
//!   first failing item in input order
//! - [`BatchFailureMode::Collect`]: every item yields its own `Result`
//!
//! In both modes every item runs to completion. Side effects of items that
//! succeeded are kept even when the batch as a whole fails.

use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThaifreqError};

/// How a batch reacts to a failing item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchFailureMode {
    /// Propagate the first failure (in input order) for the whole batch.
    #[default]
    FailFast,
    /// Capture a result per item.
    Collect,
}

/// Runs closures over batches on a bounded worker pool.
pub struct ParallelExecutor {
    pool: ThreadPool,
    workers: usize,
}

impl ParallelExecutor {
    /// Create an executor with `max_workers` threads.
    ///
    /// `None` uses the number of available CPUs.
    pub fn new(max_workers: Option<usize>) -> Result<Self> {
        let workers = max_workers.unwrap_or_else(num_cpus::get);
        if workers == 0 {
            return Err(ThaifreqError::invalid_argument(
                "max_workers must be at least 1",
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("thaifreq-worker-{i}"))
            .build()
            .map_err(|e| ThaifreqError::thread_pool(format!("Failed to create thread pool: {e}")))?;

        Ok(Self { pool, workers })
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Apply `f` to every item; results follow input order.
    pub fn map_parallel<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        debug!(
            "mapping {} items over {} workers",
            items.len(),
            self.workers
        );
        self.pool.install(|| items.par_iter().map(&f).collect())
    }

    /// Apply a fallible `f` to every item, reporting per `mode`.
    ///
    /// With [`BatchFailureMode::FailFast`] the outer `Result` carries the
    /// first failure and the inner results are all `Ok`. With
    /// [`BatchFailureMode::Collect`] the outer `Result` is always `Ok`.
    pub fn try_map_parallel<T, R, F>(
        &self,
        items: &[T],
        mode: BatchFailureMode,
        f: F,
    ) -> Result<Vec<Result<R>>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Result<R> + Sync + Send,
    {
        let results = self.map_parallel(items, f);
        match mode {
            BatchFailureMode::Collect => Ok(results),
            BatchFailureMode::FailFast => {
                let values = results.into_iter().collect::<Result<Vec<R>>>()?;
                Ok(values.into_iter().map(Ok).collect())
            }
        }
    }
}

impl std::fmt::Debug for ParallelExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelExecutor")
            .field("workers", &self.workers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_output_follows_input_order() {
        let executor = ParallelExecutor::new(Some(4)).unwrap();
        let items: Vec<u64> = (0..64).collect();

        // Early items sleep longest, so they finish last.
        let results = executor.map_parallel(&items, |&i| {
            thread::sleep(Duration::from_micros((64 - i) * 200));
            i * 10
        });

        assert_eq!(results, items.iter().map(|i| i * 10).collect::<Vec<_>>());
    }

    #[test]
    fn test_one_worker_matches_many() {
        let items: Vec<String> = (0..50).map(|i| format!("item-{i}")).collect();
        let f = |s: &String| s.chars().rev().collect::<String>();

        let single = ParallelExecutor::new(Some(1)).unwrap().map_parallel(&items, f);
        let many = ParallelExecutor::new(Some(8)).unwrap().map_parallel(&items, f);
        assert_eq!(single, many);
    }

    #[test]
    fn test_work_is_spread_over_workers() {
        let executor = ParallelExecutor::new(Some(4)).unwrap();
        let seen = Mutex::new(HashSet::new());
        let items: Vec<u32> = (0..32).collect();

        executor.map_parallel(&items, |_| {
            thread::sleep(Duration::from_millis(5));
            seen.lock()
                .unwrap()
                .insert(thread::current().name().map(str::to_string));
        });

        let seen = seen.into_inner().unwrap();
        assert!(seen.len() <= 4);
        assert!(seen.iter().all(|name| {
            name.as_deref()
                .is_some_and(|n| n.starts_with("thaifreq-worker-"))
        }));
    }

    #[test]
    fn test_fail_fast_reports_first_failure_in_input_order() {
        let executor = ParallelExecutor::new(Some(4)).unwrap();
        let items = vec![1, 2, 3, 4, 5];

        let result = executor.try_map_parallel(&items, BatchFailureMode::FailFast, |&i| {
            if i == 2 || i == 4 {
                Err(ThaifreqError::tagging(format!("item {i}")))
            } else {
                Ok(i)
            }
        });

        match result {
            Err(ThaifreqError::Tagging(msg)) => assert_eq!(msg, "item 2"),
            other => panic!("expected tagging failure, got {other:?}"),
        }
    }

    #[test]
    fn test_collect_mode_captures_each_item() {
        let executor = ParallelExecutor::new(Some(2)).unwrap();
        let items = vec![1, 2, 3];

        let results = executor
            .try_map_parallel(&items, BatchFailureMode::Collect, |&i| {
                if i == 2 {
                    Err(ThaifreqError::tagging("bad"))
                } else {
                    Ok(i * 2)
                }
            })
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(*results[0].as_ref().unwrap(), 2);
        assert!(results[1].is_err());
        assert_eq!(*results[2].as_ref().unwrap(), 6);
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(ParallelExecutor::new(Some(0)).is_err());
    }

    #[test]
    fn test_default_worker_count() {
        let executor = ParallelExecutor::new(None).unwrap();
        assert_eq!(executor.workers(), num_cpus::get());
    }
}

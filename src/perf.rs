//! Timing and resource tracking for pipeline operations.
//!
//! [`PerformanceTracker`] keeps one open interval per operation name.
//! `start(op)` opens it, `end(op)` closes it and records the elapsed time.
//! Every start/end also appends a [`PerformanceSample`] carrying a
//! [`ResourceSnapshot`] of the process.
//!
//! Memory use is bounded: timings are folded into running totals per
//! operation, and only the most recent [`DEFAULT_SAMPLE_CAPACITY`] samples
//! are retained.
//!
//! # Examples
//!
//! ```
//! use thaifreq::perf::PerformanceTracker;
//!
//! let tracker = PerformanceTracker::new();
//! tracker.start("analyze_text");
//! let elapsed = tracker.end("analyze_text");
//! assert!(elapsed.is_some());
//!
//! // No matching start: nothing is recorded.
//! assert!(tracker.end("never_started").is_none());
//!
//! let stats = tracker.stats();
//! assert_eq!(stats["analyze_text"].count, 1);
//! ```

pub mod resource;

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

pub use resource::{ResourceSnapshot, SystemInfo};

/// Number of samples a tracker keeps before dropping the oldest.
pub const DEFAULT_SAMPLE_CAPACITY: usize = 4096;

/// Which end of an interval a sample was taken at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Start,
    End,
}

/// A single resource observation. Appended, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    pub operation: String,
    pub phase: Phase,

    /// Elapsed time of the interval; `None` for start samples.
    pub duration: Option<Duration>,

    pub resources: ResourceSnapshot,
}

/// Aggregate timing statistics for one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationStats {
    pub count: u64,
    pub total: Duration,
    pub mean: Duration,
    pub min: Duration,
    pub max: Duration,
}

/// Running totals of one operation's recorded durations.
#[derive(Debug, Clone, Copy)]
struct Timing {
    count: u64,
    total: Duration,
    min: Duration,
    max: Duration,
}

impl Timing {
    fn new(duration: Duration) -> Self {
        Self {
            count: 1,
            total: duration,
            min: duration,
            max: duration,
        }
    }

    fn add(&mut self, duration: Duration) {
        self.count += 1;
        self.total += duration;
        self.min = self.min.min(duration);
        self.max = self.max.max(duration);
    }

    fn mean(&self) -> Duration {
        match u32::try_from(self.count) {
            Ok(count) => self.total / count,
            Err(_) => self.total.div_f64(self.count as f64),
        }
    }
}

#[derive(Debug, Default)]
struct TrackerState {
    open: HashMap<String, Instant>,
    timings: HashMap<String, Timing>,
    samples: VecDeque<PerformanceSample>,
}

impl TrackerState {
    fn add_timing(&mut self, operation: &str, duration: Duration) {
        match self.timings.get_mut(operation) {
            Some(timing) => timing.add(duration),
            None => {
                self.timings
                    .insert(operation.to_string(), Timing::new(duration));
            }
        }
    }

    fn push_sample(&mut self, sample: PerformanceSample, capacity: usize) {
        if capacity == 0 {
            return;
        }
        while self.samples.len() >= capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }
}

/// Collector for per-operation timings.
///
/// Safe to share between threads. Starting an operation that is already
/// open restarts its interval; only the most recent start is kept.
/// Holds at most `sample_capacity` samples, oldest dropped first.
#[derive(Debug)]
pub struct PerformanceTracker {
    state: Mutex<TrackerState>,
    capture_resources: bool,
    sample_capacity: usize,
}

impl PerformanceTracker {
    /// Create a new tracker that captures resource snapshots.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TrackerState::default()),
            capture_resources: true,
            sample_capacity: DEFAULT_SAMPLE_CAPACITY,
        }
    }

    /// Create a tracker that records timings only.
    pub fn without_resources() -> Self {
        Self {
            state: Mutex::new(TrackerState::default()),
            capture_resources: false,
            sample_capacity: DEFAULT_SAMPLE_CAPACITY,
        }
    }

    /// Keep at most `capacity` samples; zero disables sampling.
    pub fn with_sample_capacity(mut self, capacity: usize) -> Self {
        self.sample_capacity = capacity;
        self
    }

    fn snapshot(&self) -> ResourceSnapshot {
        if self.capture_resources {
            ResourceSnapshot::capture()
        } else {
            ResourceSnapshot::default()
        }
    }

    /// Open the interval for `operation`.
    pub fn start(&self, operation: &str) {
        let resources = self.snapshot();
        let mut state = self.state.lock();
        state.open.insert(operation.to_string(), Instant::now());
        state.push_sample(
            PerformanceSample {
                operation: operation.to_string(),
                phase: Phase::Start,
                duration: None,
                resources,
            },
            self.sample_capacity,
        );
    }

    /// Close the interval for `operation` and record its duration.
    ///
    /// Returns `None` when `operation` was never started.
    pub fn end(&self, operation: &str) -> Option<Duration> {
        let now = Instant::now();
        let resources = self.snapshot();
        let mut state = self.state.lock();

        let started = state.open.remove(operation)?;
        let duration = now.duration_since(started);

        state.add_timing(operation, duration);
        state.push_sample(
            PerformanceSample {
                operation: operation.to_string(),
                phase: Phase::End,
                duration: Some(duration),
                resources,
            },
            self.sample_capacity,
        );

        Some(duration)
    }

    /// Drop the open interval for `operation` without recording it.
    pub fn cancel(&self, operation: &str) -> bool {
        self.state.lock().open.remove(operation).is_some()
    }

    /// Record a duration measured elsewhere.
    pub fn record(&self, operation: &str, duration: Duration) {
        self.state.lock().add_timing(operation, duration);
    }

    /// Per-operation statistics, ordered by operation name.
    pub fn stats(&self) -> BTreeMap<String, OperationStats> {
        let state = self.state.lock();
        state
            .timings
            .iter()
            .map(|(operation, timing)| {
                let stats = OperationStats {
                    count: timing.count,
                    total: timing.total,
                    mean: timing.mean(),
                    min: timing.min,
                    max: timing.max,
                };
                (operation.clone(), stats)
            })
            .collect()
    }

    /// Mean duration of `operation` in seconds; 0 when never recorded.
    pub fn average(&self, operation: &str) -> f64 {
        let state = self.state.lock();
        state
            .timings
            .get(operation)
            .map_or(0.0, |timing| timing.mean().as_secs_f64())
    }

    /// Total recorded time of `operation` in seconds.
    pub fn total(&self, operation: &str) -> f64 {
        let state = self.state.lock();
        state
            .timings
            .get(operation)
            .map_or(0.0, |timing| timing.total.as_secs_f64())
    }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> Vec<PerformanceSample> {
        self.state.lock().samples.iter().cloned().collect()
    }

    /// Forget every interval, timing and sample.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.open.clear();
        state.timings.clear();
        state.samples.clear();
    }
}

impl Default for PerformanceTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper for timing a single operation without a tracker.
pub struct OperationTimer {
    start: Instant,
}

impl OperationTimer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return elapsed time.
    pub fn stop(self) -> Duration {
        self.start.elapsed()
    }
}

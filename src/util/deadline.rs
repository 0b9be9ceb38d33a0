//! Bounded waits for blocking collaborators.
//!
//! The linguistic analyzer and the durable cache tier may block for an
//! unbounded time. [`run_with_deadline`] runs such a call on a helper thread
//! and stops waiting once the deadline passes. The helper thread is detached
//! on timeout: the call keeps running in the background and its result is
//! discarded.

use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;

use crate::error::{Result, ThaifreqError};

/// Run `f` on a helper thread and wait at most `timeout` for its result.
///
/// Returns [`ThaifreqError::Timeout`] when the deadline passes, and an
/// internal error when `f` panics.
pub fn run_with_deadline<T, F>(label: &str, timeout: Duration, f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(1);

    thread::Builder::new()
        .name(format!("deadline-{label}"))
        .spawn(move || {
            // The receiver is gone once the caller timed out.
            let _ = tx.send(f());
        })
        .map_err(|e| ThaifreqError::thread_pool(format!("Failed to spawn {label} worker: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(value) => Ok(value),
        Err(RecvTimeoutError::Timeout) => Err(ThaifreqError::timeout(format!(
            "{label} did not finish within {timeout:?}"
        ))),
        Err(RecvTimeoutError::Disconnected) => Err(ThaifreqError::internal(format!(
            "{label} worker panicked"
        ))),
    }
}

/// Like [`run_with_deadline`], but runs `f` inline when no deadline is set.
pub fn maybe_with_deadline<T, F>(label: &str, timeout: Option<Duration>, f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match timeout {
        Some(timeout) => run_with_deadline(label, timeout, f),
        None => Ok(f()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_within_deadline() {
        let value = run_with_deadline("fast", Duration::from_secs(5), || 21 * 2).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_times_out() {
        let result = run_with_deadline("slow", Duration::from_millis(20), || {
            thread::sleep(Duration::from_millis(500));
            1
        });
        assert!(matches!(result, Err(ThaifreqError::Timeout(_))));
    }

    #[test]
    fn test_panic_is_reported() {
        let result: Result<()> = run_with_deadline("boom", Duration::from_secs(5), || {
            panic!("worker failure");
        });
        assert!(matches!(result, Err(ThaifreqError::Other(_))));
    }

    #[test]
    fn test_inline_without_deadline() {
        assert_eq!(maybe_with_deadline("inline", None, || "ok").unwrap(), "ok");
    }
}

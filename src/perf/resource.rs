//! Process resource snapshots.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Memory and CPU usage of the current process at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    /// Peak resident set size in bytes.
    pub max_rss_bytes: u64,

    /// User plus system CPU time consumed so far.
    pub cpu_time: Duration,
}

impl ResourceSnapshot {
    /// Capture the current process usage.
    ///
    /// Returns an all-zero snapshot where the platform offers no data.
    #[cfg(unix)]
    pub fn capture() -> Self {
        // SAFETY: getrusage only writes into the zeroed struct we hand it.
        let usage = unsafe {
            let mut usage: libc::rusage = std::mem::zeroed();
            if libc::getrusage(libc::RUSAGE_SELF, &mut usage) != 0 {
                return Self::default();
            }
            usage
        };

        let to_duration = |tv: libc::timeval| {
            Duration::from_secs(tv.tv_sec.max(0) as u64)
                + Duration::from_micros(tv.tv_usec.max(0) as u64)
        };

        // Linux reports kilobytes, macOS reports bytes.
        let max_rss = usage.ru_maxrss.max(0) as u64;
        let max_rss_bytes = if cfg!(target_os = "macos") {
            max_rss
        } else {
            max_rss * 1024
        };

        Self {
            max_rss_bytes,
            cpu_time: to_duration(usage.ru_utime) + to_duration(usage.ru_stime),
        }
    }

    #[cfg(not(unix))]
    pub fn capture() -> Self {
        Self::default()
    }
}

/// Host information reported alongside performance statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub cpu_count: usize,
    pub physical_cpu_count: usize,
    pub process: ResourceSnapshot,
}

impl SystemInfo {
    pub fn collect() -> Self {
        Self {
            cpu_count: num_cpus::get(),
            physical_cpu_count: num_cpus::get_physical(),
            process: ResourceSnapshot::capture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_capture_reports_usage() {
        // Burn a little CPU so the counter is non-zero.
        let mut acc = 0u64;
        for i in 0..2_000_000u64 {
            acc = acc.wrapping_add(i * i);
        }
        std::hint::black_box(acc);

        let snapshot = ResourceSnapshot::capture();
        assert!(snapshot.max_rss_bytes > 0);
        assert!(snapshot.cpu_time > Duration::ZERO);
    }

    #[test]
    fn test_system_info() {
        let info = SystemInfo::collect();
        assert!(info.cpu_count >= 1);
        assert!(info.physical_cpu_count >= 1);
    }
}

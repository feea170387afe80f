// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Host derived load configuration

use log::warn;
use std::thread;
use std::time::Duration;

/// One worker per this many processing units
pub const WORKER_DIVISOR: i64 = 2;

/// Interval at which the waiting parent wakes up
pub const SUPERVISE_INTERVAL: Duration = Duration::from_secs(1);

/// Number of workers to spawn for `units` available processing units.
///
/// Never less than one, also for zero or negative (invalid) unit counts.
pub fn worker_count(units: i64) -> usize {
    usize::try_from(units / WORKER_DIVISOR).unwrap_or(0).max(1)
}

/// Load configuration, computed once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressConfig {
    /// Processing units reported by the host
    pub cores: usize,
    /// Number of worker processes to spawn
    pub workers: usize,
}

impl StressConfig {
    /// Derive the configuration from `cores` processing units
    pub fn new(cores: usize) -> Self {
        let workers = worker_count(i64::try_from(cores).unwrap_or(i64::MAX));
        Self { cores, workers }
    }

    /// Derive the configuration from the logical CPUs online on the host.
    ///
    /// Affinity masks and cgroup quotas are not taken into account. Falls back to
    /// the parallelism available to this process if the online count is unknown.
    pub fn from_host() -> Self {
        let cores = online_cpus().unwrap_or_else(|| {
            thread::available_parallelism()
                .map(usize::from)
                .unwrap_or_else(|e| {
                    warn!("Failed to query available processing units, assuming 1: {e}");
                    1
                })
        });
        Self::new(cores)
    }
}

/// Number of logical CPUs currently online
pub fn online_cpus() -> Option<usize> {
    // Safety: sysconf(3) has no preconditions
    let cpus = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
    usize::try_from(cpus).ok().filter(|&cpus| cpus > 0)
}

#[cfg(test)]
mod test {
    use super::{online_cpus, worker_count, StressConfig};
    use std::thread;

    #[test]
    fn half_of_units() {
        assert_eq!(worker_count(1), 1);
        assert_eq!(worker_count(2), 1);
        assert_eq!(worker_count(3), 1);
        assert_eq!(worker_count(8), 4);
        assert_eq!(worker_count(9), 4);
        assert_eq!(worker_count(64), 32);
    }

    #[test]
    fn floors_at_one() {
        assert_eq!(worker_count(0), 1);
        assert_eq!(worker_count(-1), 1);
        assert_eq!(worker_count(-8), 1);
        assert_eq!(worker_count(i64::MIN), 1);
    }

    #[test]
    fn config() {
        assert_eq!(StressConfig::new(8), StressConfig { cores: 8, workers: 4 });
        assert_eq!(StressConfig::new(0).workers, 1);
    }

    #[test]
    fn online_covers_available() {
        let online = online_cpus().expect("failed to query online cpus");
        let available = thread::available_parallelism().unwrap().get();
        assert!(online >= available);
        assert_eq!(StressConfig::from_host().cores, online);
    }

    #[test]
    fn host_has_workers() {
        let config = StressConfig::from_host();
        assert!(config.cores >= 1);
        assert_eq!(config.workers, worker_count(config.cores as i64));
    }
}

// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use super::worker::{Payload, Worker, WorkerId};
use crate::error::Error;
use log::{error, info, warn};

/// Outcome of [`WorkerPool::terminate_all`]
#[derive(Debug, Default)]
pub struct Termination {
    /// Number of workers that were sent a termination request
    pub signaled: usize,
    /// Workers that could not be signaled
    pub failed: Vec<WorkerId>,
}

impl Termination {
    /// Check if every worker was signaled
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A pool of worker processes
#[derive(Debug)]
pub struct WorkerPool {
    workers: Vec<Worker>,
}

impl WorkerPool {
    /// Spawn `count` workers running `payload`.
    ///
    /// If a worker can not be spawned, the workers spawned so far are terminated
    /// and the error is returned.
    pub fn spawn(count: usize, payload: Payload) -> Result<WorkerPool, Error> {
        Self::spawn_with(count, |id| Worker::spawn(id, payload))
    }

    /// Spawn `count` workers, creating each one with `spawner`.
    ///
    /// Same rollback as [`WorkerPool::spawn`].
    pub fn spawn_with<F>(count: usize, mut spawner: F) -> Result<WorkerPool, Error>
    where
        F: FnMut(WorkerId) -> Result<Worker, Error>,
    {
        assert!(count > 0, "cannot create empty worker pool");

        let mut workers = Vec::with_capacity(count);
        for id in (0..count).map(WorkerId::from) {
            match spawner(id) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    error!("Failed to spawn worker {id}: {e}");
                    WorkerPool { workers }.terminate_all();
                    return Err(e);
                }
            }
        }

        info!("Spawned {count} workers");
        Ok(WorkerPool { workers })
    }

    /// Number of workers in the pool
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Check if the pool holds no workers
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Iterate the worker handles
    pub fn iter(&self) -> std::slice::Iter<'_, Worker> {
        self.workers.iter()
    }

    /// Process ids of all workers
    pub fn pids(&self) -> Vec<libc::pid_t> {
        self.workers.iter().map(Worker::pid).collect()
    }

    /// Request termination of every worker. Failures are logged and collected.
    pub fn terminate_all(self) -> Termination {
        let mut termination = Termination::default();
        for worker in self.workers {
            let id = worker.id();
            match worker.terminate() {
                Ok(()) => termination.signaled += 1,
                Err(e) => {
                    warn!("{e}");
                    termination.failed.push(id);
                }
            }
        }

        info!(
            "Requested termination of {} workers ({} failed)",
            termination.signaled,
            termination.failed.len()
        );
        termination
    }
}

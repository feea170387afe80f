// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use log::debug;
use std::fmt::Display;
use std::hint::black_box;
use std::io;

/// Worker id type. This id is unique to each worker process of a pool.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct WorkerId(usize);

impl From<usize> for WorkerId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<WorkerId> for usize {
    fn from(value: WorkerId) -> Self {
        value.0
    }
}

impl Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "W{}", self.0)
    }
}

/// Body of a worker process. Never returns.
pub type Payload = fn() -> !;

/// Burn CPU forever without I/O.
pub fn spin() -> ! {
    let mut counter = 0u64;
    loop {
        counter = black_box(counter.wrapping_add(1));
    }
}

/// Handle of a worker process.
#[derive(Debug)]
pub struct Worker {
    id: WorkerId,
    pid: libc::pid_t,
}

impl Worker {
    /// Fork a worker process that runs `payload`.
    ///
    /// The child restores the default action of SIGINT and SIGTERM and is sent
    /// SIGTERM when the parent dies.
    pub fn spawn(id: WorkerId, payload: Payload) -> Result<Worker, Error> {
        let parent = std::process::id() as libc::pid_t;

        // Safety: the child only calls async-signal-safe functions before
        // entering `payload`, which never returns.
        match unsafe { libc::fork() } {
            -1 => Err(Error::Io((
                io::Error::last_os_error(),
                "failed to fork worker process",
            ))),
            0 => run(parent, payload),
            pid => {
                debug!("Spawned worker {id} (pid {pid})");
                Ok(Worker { id, pid })
            }
        }
    }

    /// Id of the worker within its pool
    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Process id of the worker
    pub fn pid(&self) -> libc::pid_t {
        self.pid
    }

    /// Check if the process still exists. An exited but unreaped worker counts as running.
    pub fn is_running(&self) -> bool {
        // Safety: signal 0 only checks for existence and permission
        unsafe { libc::kill(self.pid, 0) == 0 }
    }

    /// Request termination with SIGTERM. Does not wait for the worker to exit.
    pub fn terminate(self) -> Result<(), Error> {
        // Safety: plain syscall on a pid owned by this handle
        if unsafe { libc::kill(self.pid, libc::SIGTERM) } == 0 {
            debug!("Sent SIGTERM to worker {} (pid {})", self.id, self.pid);
            Ok(())
        } else {
            Err(Error::Terminate((self.id, io::Error::last_os_error())))
        }
    }
}

/// Worker process main function
fn run(parent: libc::pid_t, payload: Payload) -> ! {
    // Safety: signal(2), prctl(2), getppid(2) and _exit(2) are async-signal-safe
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_DFL);
        libc::signal(libc::SIGTERM, libc::SIG_DFL);

        #[cfg(target_os = "linux")]
        libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);

        // Parent died before the death signal was armed
        if libc::getppid() != parent {
            libc::_exit(0);
        }
    }

    payload()
}

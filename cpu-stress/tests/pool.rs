// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use cpu_stress::error::Error;
use cpu_stress::worker::{spin, Worker, WorkerId, WorkerPool};
use std::{io, thread};
use std::time::Duration;

/// Reap `pid` and return its wait status
fn wait(pid: libc::pid_t) -> libc::c_int {
    let mut status = 0;
    // Safety: `pid` is a child of this process
    let reaped = unsafe { libc::waitpid(pid, &mut status, 0) };
    assert_eq!(reaped, pid, "failed to wait for worker {pid}");
    status
}

/// Check if `pid` exited without blocking
fn has_exited(pid: libc::pid_t) -> bool {
    let mut status = 0;
    // Safety: `pid` is a child of this process
    unsafe { libc::waitpid(pid, &mut status, libc::WNOHANG) != 0 }
}

#[test]
fn workers_spin_until_terminated() {
    let pool = WorkerPool::spawn(2, spin).unwrap();
    assert_eq!(pool.len(), 2);
    assert!(pool.iter().all(|worker| worker.is_running()));

    let pids = pool.pids();
    thread::sleep(Duration::from_millis(200));
    for &pid in &pids {
        assert!(!has_exited(pid), "worker {pid} exited on its own");
    }

    let termination = pool.terminate_all();
    assert_eq!(termination.signaled, 2);
    assert!(termination.is_complete());

    for pid in pids {
        let status = wait(pid);
        assert!(libc::WIFSIGNALED(status));
        assert_eq!(libc::WTERMSIG(status), libc::SIGTERM);
    }
}

#[test]
fn worker_ids_are_sequential() {
    let pool = WorkerPool::spawn(3, spin).unwrap();
    let ids: Vec<usize> = pool.iter().map(|worker| worker.id().into()).collect();
    assert_eq!(ids, [0, 1, 2]);

    let pids = pool.pids();
    let mut unique = pids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), 3);

    assert_eq!(pool.terminate_all().signaled, 3);
    for pid in pids {
        wait(pid);
    }
}

#[test]
fn vanished_worker_is_reported() {
    let pool = WorkerPool::spawn(2, spin).unwrap();
    let pids = pool.pids();

    // Safety: `pids[0]` is a child of this process
    assert_eq!(unsafe { libc::kill(pids[0], libc::SIGKILL) }, 0);
    let status = wait(pids[0]);
    assert_eq!(libc::WTERMSIG(status), libc::SIGKILL);

    let termination = pool.terminate_all();
    assert_eq!(termination.signaled, 1);
    assert_eq!(termination.failed, [WorkerId::from(0)]);
    assert!(!termination.is_complete());

    let status = wait(pids[1]);
    assert_eq!(libc::WTERMSIG(status), libc::SIGTERM);
}

#[test]
fn failed_spawn_terminates_earlier_workers() {
    let mut pids = Vec::new();
    let result = WorkerPool::spawn_with(4, |id| {
        if usize::from(id) == 2 {
            return Err(Error::Io((io::Error::other("no more processes"), "spawn")));
        }
        let worker = Worker::spawn(id, spin)?;
        pids.push(worker.pid());
        Ok(worker)
    });

    assert!(matches!(result, Err(Error::Io(_))));
    assert_eq!(pids.len(), 2);
    for pid in pids {
        let status = wait(pid);
        assert!(libc::WIFSIGNALED(status));
        assert_eq!(libc::WTERMSIG(status), libc::SIGTERM);
    }
}

#[test]
#[should_panic(expected = "cannot create empty worker pool")]
fn empty_pool() {
    let _ = WorkerPool::spawn(0, spin);
}

// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! CPU load generator.
//!
//! Spawns one busy-looping worker process per two available processing units
//! and keeps them running until the operator interrupts. Intended to put a host
//! under load while testing a system monitor.
//!
//! # Workers
//!
//! [Workers](crate::worker::Worker) are forked processes that run a
//! [payload](crate::worker::Payload) forever, by default [`spin`](crate::worker::spin).
//! The [pool](crate::worker::WorkerPool) owns all worker handles and
//! requests their termination on shutdown.
//!
//! # Shutdown
//!
//! The parent sleeps in [`Shutdown::wait`](crate::shutdown::Shutdown::wait)
//! until SIGINT or SIGTERM arrives.

pub mod config;
pub mod error;
pub mod shutdown;
pub mod worker;

/// Re-export the public API
pub mod prelude {
    pub use crate::config::StressConfig;
    pub use crate::shutdown::{Shutdown, ShutdownSignal};
    pub use crate::worker::{spin, WorkerPool};
}

// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

mod pool;
#[allow(clippy::module_inception)]
mod worker;

pub use pool::{Termination, WorkerPool};
pub use worker::{spin, Payload, Worker, WorkerId};

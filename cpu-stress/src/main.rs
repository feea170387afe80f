// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Generate CPU load to test a system monitor

use anyhow::{Context, Error};
use argh::FromArgs;
use cpu_stress::prelude::*;
use log::{debug, info, warn, LevelFilter};
use tokio::runtime;

#[derive(FromArgs)]
#[argh(help_triggers("-h", "--help", "help"))]
/// Keep half of the available CPU cores busy until interrupted
struct Args {}

fn main() -> Result<(), Error> {
    let _args: Args = argh::from_env();

    stress_logger::init(LevelFilter::Warn)?;

    let runtime = runtime::Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .build()?;

    // Listen before printing anything so an early Ctrl-C is not lost
    let shutdown = {
        let _guard = runtime.enter();
        Shutdown::listen()?
    };

    println!("Starting CPU stress test...");
    println!("This tool will create high CPU load to test the SystemMonitor app");
    println!("Press Ctrl+C to stop the test");

    let config = StressConfig::from_host();
    debug!("{config:?}");
    println!(
        "Creating {} worker processes on a {}-core system",
        config.workers, config.cores
    );

    let pool = WorkerPool::spawn(config.workers, spin).context("failed to start workers")?;

    let signal = runtime.block_on(shutdown.wait());
    info!("Received {signal}");

    println!("\nStopping CPU stress test...");
    let termination = pool.terminate_all();
    if !termination.is_complete() {
        warn!("Workers {:?} may still be running", termination.failed);
    }
    println!("Test completed");

    Ok(())
}

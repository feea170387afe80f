// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Console logger for `cpu-stress`.
//!
//! Implements [`log::Log`] and writes one colored line per record to `stdout`.
//! The level passed to [`init`] can be overridden with the `RUST_LOG`
//! environment variable.

use log::{LevelFilter, Log, Metadata, SetLoggerError};
use std::process;
use std::str::FromStr;
use std::time::SystemTime;

mod console;
pub mod fmt;
pub mod record;
mod thread;

const ENV_RUST_LOG: &str = "RUST_LOG";

/// Initialize the logger.
///
/// A valid level passed as `RUST_LOG` environment variable overrides `level`.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(Logger::new()))?;
    log::set_max_level(level_from_env().unwrap_or(level));
    Ok(())
}

/// The console logger.
#[derive(Debug, Default)]
pub struct Logger {
    console: console::Console,
}

impl Logger {
    /// Create a new logger.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Static messages need no formatting
        let formatted;
        let args = match record.args().as_str() {
            Some(args) => args,
            None => {
                formatted = record.args().to_string();
                formatted.as_str()
            }
        };

        let record = record::Record {
            timestamp: SystemTime::now(),
            level: record.level(),
            target: record.target(),
            file: record.file(),
            line: record.line(),
            tgid: process::id(),
            tid: thread::id(),
            args,
        };

        let _ = self.console.write(&record);
    }

    fn flush(&self) {}
}

/// Try to parse the log level from the environment variable `RUST_LOG`.
fn level_from_env() -> Option<LevelFilter> {
    std::env::var(ENV_RUST_LOG).ok().and_then(|s| {
        parse_level(&s).or_else(|| {
            eprintln!("Failed to parse log level from `RUST_LOG={s}`");
            None
        })
    })
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(s.trim()).ok()
}

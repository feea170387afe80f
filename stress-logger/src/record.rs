// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use log::Level;
use std::time::SystemTime;

/// A log record captured at the call site, borrowing from the `log` record.
#[derive(Debug)]
pub struct Record<'a> {
    pub timestamp: SystemTime,
    pub level: Level,
    pub target: &'a str,
    pub file: Option<&'a str>,
    pub line: Option<u32>,
    pub tgid: u32,
    pub tid: u32,
    pub args: &'a str,
}

// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Wait for an operator interrupt or a termination request

use crate::config::SUPERVISE_INTERVAL;
use crate::error::Error;
use log::trace;
use std::fmt::Display;
use tokio::select;
use tokio::signal::unix::{signal, Signal, SignalKind};
use tokio::time::{self, Instant, MissedTickBehavior};

/// Signal that ended the wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT, e.g. Ctrl-C
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Registered shutdown signal listeners
#[derive(Debug)]
pub struct Shutdown {
    interrupt: Signal,
    terminate: Signal,
}

impl Shutdown {
    /// Register listeners for SIGINT and SIGTERM.
    ///
    /// Signals arriving after this call are not lost, even before [`Shutdown::wait`]
    /// is polled. Must be called within the context of a tokio runtime with IO enabled.
    pub fn listen() -> Result<Self, Error> {
        let interrupt = signal(SignalKind::interrupt())
            .map_err(|e| Error::Io((e, "failed to listen for SIGINT")))?;
        let terminate = signal(SignalKind::terminate())
            .map_err(|e| Error::Io((e, "failed to listen for SIGTERM")))?;
        Ok(Self {
            interrupt,
            terminate,
        })
    }

    /// Sleep until a shutdown signal arrives.
    pub async fn wait(mut self) -> ShutdownSignal {
        let started = Instant::now();
        let mut heartbeat = time::interval(SUPERVISE_INTERVAL);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            select! {
                _ = self.interrupt.recv() => return ShutdownSignal::Interrupt,
                _ = self.terminate.recv() => return ShutdownSignal::Terminate,
                _ = heartbeat.tick() => trace!("Waiting for shutdown since {:?}", started.elapsed()),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Shutdown, ShutdownSignal};
    use std::time::Duration;
    use tokio::time;

    #[tokio::test]
    async fn sigterm_ends_wait() {
        let shutdown = Shutdown::listen().unwrap();

        // Safety: a handler for SIGTERM is installed above
        assert_eq!(unsafe { libc::kill(libc::getpid(), libc::SIGTERM) }, 0);

        let signal = time::timeout(Duration::from_secs(5), shutdown.wait())
            .await
            .expect("no shutdown signal received");
        assert_eq!(signal, ShutdownSignal::Terminate);
    }

    #[test]
    fn display_signal() {
        assert_eq!(ShutdownSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownSignal::Terminate.to_string(), "SIGTERM");
    }
}

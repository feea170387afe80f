// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Error type of the load generator

use crate::worker::WorkerId;

/// Load generator error type
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    Io((std::io::Error, &'static str)),
    Terminate((WorkerId, std::io::Error)),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io((e, _)) | Error::Terminate((_, e)) => Some(e),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io((e, description)) => write!(f, "Io error: {}, {}", description, e),
            Error::Terminate((id, e)) => write!(f, "Failed to terminate worker {}: {}", id, e),
        }
    }
}

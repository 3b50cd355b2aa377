use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that end the monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("{} not found. Is the kernel module loaded? ({source})", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to install signal handlers: {0}")]
    Signal(#[from] nix::Error),
    #[error("failed to write dashboard: {0}")]
    Render(#[from] io::Error),
}

impl MonitorError {
    pub fn exit_code(&self) -> u8 {
        1
    }
}

//A single data line that could not be turned into a record. Never fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("expected at least 6 fields, found {found}")]
    TooFewFields { found: usize },
    #[error("field {field} is not a non-negative integer: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

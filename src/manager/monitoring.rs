use std::convert::TryFrom;
use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::SourceKind;
use crate::error::MonitorError;
use crate::process::{parse_table, ProcessRecord, Snapshot};

/// Something that can produce a full snapshot on demand.
pub trait SnapshotSource {
    fn capture(&mut self) -> Result<Snapshot, MonitorError>;
}

/// Reads the whole process table from a text file every capture.
#[derive(Debug, Clone)]
pub struct TableFileSource {
    path: PathBuf,
}

impl TableFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for TableFileSource {
    fn capture(&mut self) -> Result<Snapshot, MonitorError> {
        let bytes = fs::read(&self.path).map_err(|source| MonitorError::SourceUnavailable {
            path: self.path.clone(),
            source,
        })?;

        let snapshot = parse_table(&String::from_utf8_lossy(&bytes));
        debug!(path = %self.path.display(), processes = snapshot.len(), "captured snapshot");
        Ok(snapshot)
    }
}

/// Builds the table directly from `/proc`, for hosts without the kernel module.
#[derive(Debug, Clone, Default)]
pub struct ProcfsSource;

impl SnapshotSource for ProcfsSource {
    fn capture(&mut self) -> Result<Snapshot, MonitorError> {
        let procfs_processes = procfs::process::all_processes().map_err(|e| {
            MonitorError::SourceUnavailable {
                path: PathBuf::from("/proc"),
                source: io::Error::new(io::ErrorKind::NotFound, e.to_string()),
            }
        })?;

        let mut snapshot = Snapshot::new();
        for p in procfs_processes {
            let procfs_proc = match p {
                Ok(p) => p,
                Err(_) => continue, //Skip listing errors
            };

            let pid = procfs_proc.pid as u32;
            match ProcessRecord::try_from(pid) {
                Ok(record) => snapshot.insert(record),
                //The process vanished between listing and reading its data
                Err(procfs::ProcError::NotFound(_)) => continue,
                Err(e) => warn!(pid, error = ?e, "could not read process"),
            }
        }

        debug!(processes = snapshot.len(), "captured snapshot from /proc");
        Ok(snapshot)
    }
}

pub fn source_for(kind: &SourceKind) -> Box<dyn SnapshotSource> {
    match kind {
        SourceKind::TableFile(path) => Box::new(TableFileSource::new(path.clone())),
        SourceKind::Procfs => Box::new(ProcfsSource),
    }
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for Box<S> {
    fn capture(&mut self) -> Result<Snapshot, MonitorError> {
        (**self).capture()
    }
}

use std::collections::HashMap;
use std::collections::hash_map;

use tracing::trace;

use crate::process::ProcessRecord;

/// Every process visible at one sample instant, keyed by PID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    records: HashMap<u32, ProcessRecord>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    //Last occurrence of a PID wins
    pub fn insert(&mut self, record: ProcessRecord) {
        self.records.insert(record.pid, record);
    }

    pub fn get(&self, pid: u32) -> Option<&ProcessRecord> {
        self.records.get(&pid)
    }

    pub fn iter(&self) -> hash_map::Values<'_, u32, ProcessRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record not owned by `uid`.
    pub fn retain_uid(&mut self, uid: u32) {
        self.records.retain(|_, record| record.uid == uid);
    }
}

impl FromIterator<ProcessRecord> for Snapshot {
    fn from_iter<I: IntoIterator<Item = ProcessRecord>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for record in iter {
            snapshot.insert(record);
        }
        snapshot
    }
}

fn is_header(line: &str) -> bool {
    line.contains("PID") && line.contains("RSS")
}

/// Builds a snapshot from the textual process table.
///
/// Everything up to and including the first line that carries both a `PID`
/// and an `RSS` label is preamble. After it, each line that parses as a
/// [`ProcessRecord`] is kept and every other line is skipped.
pub fn parse_table(text: &str) -> Snapshot {
    let mut snapshot = Snapshot::new();
    let mut lines = text.lines();

    //Skip preamble until the table header
    if !lines.by_ref().any(is_header) {
        return snapshot;
    }

    for line in lines {
        match line.parse::<ProcessRecord>() {
            Ok(record) => snapshot.insert(record),
            Err(e) => trace!(line, error = %e, "skipping malformed line"),
        }
    }

    snapshot
}

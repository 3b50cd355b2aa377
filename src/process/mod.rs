use procfs::{
    process::Process as ProcfsProcess,
    ProcError,
};
use std::convert::TryFrom;
use std::str::FromStr;

use crate::error::LineError;

// 1. Declare submodules
pub mod row;
pub mod snapshot;

pub use row::DisplayRow;
pub use snapshot::{parse_table, Snapshot};

//Minimum number of whitespace-separated fields in a data line:
//PID UID PPID RSS CPU COMMAND...
const MIN_FIELDS: usize = 6;


// Main Process Data Structure

/// One process as seen at a single sample instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub uid: u32,
    pub command: String,
    pub resident_memory_kb: u64,
    /// Cumulative CPU time since the process started.
    pub cpu_total_ms: u64,
}


// Implementation

/// Parses one data line of the process table.
///
/// Fields are split on runs of whitespace and read positionally:
/// `[0]` pid, `[1]` uid, `[2]` ppid (discarded), `[3]` rss in KB,
/// `[4]` cumulative CPU in ms, `[5..]` the command, rejoined with single spaces.
impl FromStr for ProcessRecord {
    type Err = LineError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS {
            return Err(LineError::TooFewFields { found: fields.len() });
        }

        Ok(ProcessRecord {
            pid: parse_field("pid", fields[0])?,
            uid: parse_field("uid", fields[1])?,
            resident_memory_kb: parse_field("rss", fields[3])?,
            cpu_total_ms: parse_field("cpu_total", fields[4])?,
            command: fields[5..].join(" "),
        })
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, LineError> {
    value.parse().map_err(|_| LineError::InvalidField {
        field,
        value: value.to_string(),
    })
}

//Reads the same columns straight out of /proc/[pid]
impl TryFrom<u32> for ProcessRecord {
    type Error = ProcError;

    fn try_from(pid: u32) -> Result<Self, Self::Error> {
        let procfs_proc = ProcfsProcess::new(pid as i32)?;
        let stat = procfs_proc.stat()?;
        let uid = procfs_proc.uid()?;
        let page_size: u64 = procfs::page_size();
        let ticks_per_second = procfs::ticks_per_second().max(1);

        let resident_memory_kb = (stat.rss as u64 * page_size) / 1024;
        let cpu_total_ms = (stat.utime + stat.stime) * 1000 / ticks_per_second;

        Ok(ProcessRecord {
            pid,
            uid,
            command: stat.comm,
            resident_memory_kb,
            cpu_total_ms,
        })
    }
}

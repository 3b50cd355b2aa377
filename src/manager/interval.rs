use std::cmp::Reverse;

use tracing::debug;

use crate::process::{DisplayRow, Snapshot};

/// Diffs two consecutive snapshots into ranked rows.
///
/// Only PIDs present in both snapshots produce a row: a process that just
/// appeared has no baseline yet and a process that exited has nothing to show.
/// Rows are ordered by CPU used in the interval, highest first, then by PID.
pub fn interval_rows(previous: &Snapshot, current: &Snapshot) -> Vec<DisplayRow> {
    let mut rows: Vec<DisplayRow> = current
        .iter()
        .filter_map(|curr| {
            let prev = previous.get(curr.pid)?;

            //A counter that went backwards was reset or wrapped; count the interval as idle
            if curr.cpu_total_ms < prev.cpu_total_ms {
                debug!(
                    pid = curr.pid,
                    previous = prev.cpu_total_ms,
                    current = curr.cpu_total_ms,
                    "cpu counter went backwards"
                );
            }

            Some(DisplayRow {
                pid: curr.pid,
                command: curr.command.clone(),
                resident_memory_kb: curr.resident_memory_kb,
                cpu_interval_ms: curr.cpu_total_ms.saturating_sub(prev.cpu_total_ms),
            })
        })
        .collect();

    rows.sort_by_key(|row| (Reverse(row.cpu_interval_ms), row.pid));
    rows
}

/// [`interval_rows`] truncated to the `top_n` heaviest.
pub fn top_rows(previous: &Snapshot, current: &Snapshot, top_n: usize) -> Vec<DisplayRow> {
    let mut rows = interval_rows(previous, current);
    rows.truncate(top_n);
    rows
}

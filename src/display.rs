use std::io::{self, Write};

use crate::config::MonitorConfig;
use crate::manager::interval::top_rows;
use crate::process::{DisplayRow, Snapshot};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";
const HIGH_MEMORY_MARKER: &str = " [High Memory!]";
const RULE_WIDTH: usize = 60;

/// True when stdout is attached to a terminal, so redrawing in place makes sense.
pub fn stdout_is_terminal() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) == 1 }
}

/// Renders one interval of the dashboard: the heaviest `top_n` processes
/// that are present in both `previous` and `current`.
pub fn render_interval<W: Write>(
    out: &mut W,
    previous: &Snapshot,
    current: &Snapshot,
    config: &MonitorConfig,
    clear: bool,
) -> io::Result<()> {
    let rows = top_rows(previous, current, config.top_n);

    if clear {
        write!(out, "{CLEAR_SCREEN}")?;
    }
    write_header(out, config)?;
    for row in &rows {
        write_row(out, row, config.memory_threshold_kb)?;
    }

    out.flush()
}

fn write_header<W: Write>(out: &mut W, config: &MonitorConfig) -> io::Result<()> {
    writeln!(out, "=== ProcMonitor Dashboard (Refresh: {}s) ===", config.refresh_secs())?;
    writeln!(out, "{:<8} {:<12} {:<20} {}", "PID", "RSS (MB)", "CPU (ms/interval)", "COMMAND")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

fn write_row<W: Write>(out: &mut W, row: &DisplayRow, threshold_kb: u64) -> io::Result<()> {
    let alert = if row.exceeds(threshold_kb) { HIGH_MEMORY_MARKER } else { "" };
    writeln!(
        out,
        "{:<8} {:<12.1} {:<20} {}{}",
        row.pid,
        row.resident_memory_mb(),
        row.cpu_interval_ms,
        row.command,
        alert
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessRecord;

    fn record(pid: u32, resident_memory_kb: u64, cpu_total_ms: u64, command: &str) -> ProcessRecord {
        ProcessRecord {
            pid,
            uid: 1000,
            command: command.to_string(),
            resident_memory_kb,
            cpu_total_ms,
        }
    }

    fn render(previous: &Snapshot, current: &Snapshot, config: &MonitorConfig, clear: bool) -> String {
        let mut out = Vec::new();
        render_interval(&mut out, previous, current, config, clear).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_header_and_rows() {
        let previous: Snapshot = [record(5, 2048, 1000, "python3 worker.py")].into_iter().collect();
        let current: Snapshot = [record(5, 2048, 1350, "python3 worker.py")].into_iter().collect();

        let text = render(&previous, &current, &MonitorConfig::default(), false);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=== ProcMonitor Dashboard (Refresh: 2s) ===");
        assert_eq!(lines[1], "PID      RSS (MB)     CPU (ms/interval)    COMMAND");
        assert_eq!(lines[2], "-".repeat(60));
        assert_eq!(lines[3], "5        2.0          350                  python3 worker.py");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn high_memory_marker_is_strict() {
        let previous: Snapshot = [record(1, 204800, 0, "big"), record(2, 102400, 0, "edge")]
            .into_iter()
            .collect();
        let current: Snapshot = [record(1, 204800, 20, "big"), record(2, 102400, 10, "edge")]
            .into_iter()
            .collect();

        let text = render(&previous, &current, &MonitorConfig::default(), false);
        let big = text.lines().find(|l| l.starts_with("1 ")).unwrap();
        let edge = text.lines().find(|l| l.starts_with("2 ")).unwrap();

        assert!(big.ends_with("big [High Memory!]"));
        assert!(big.contains("200.0"));
        assert!(edge.ends_with("edge"));
    }

    #[test]
    fn truncates_to_top_n() {
        let previous: Snapshot = (1..=20).map(|pid| record(pid, 10, 0, "p")).collect();
        let current: Snapshot = (1..=20).map(|pid| record(pid, 10, pid as u64, "p")).collect();

        let text = render(&previous, &current, &MonitorConfig::default(), false);
        assert_eq!(text.lines().count(), 3 + 15);
        assert!(text.lines().nth(3).unwrap().starts_with("20 "));
    }

    #[test]
    fn clear_sequence_only_when_asked() {
        let empty = Snapshot::new();
        assert!(render(&empty, &empty, &MonitorConfig::default(), true).starts_with(CLEAR_SCREEN));
        assert!(render(&empty, &empty, &MonitorConfig::default(), false).starts_with("==="));
    }
}

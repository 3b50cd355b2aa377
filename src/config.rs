use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

pub const DEFAULT_SOURCE_PATH: &str = "/proc/proc_monitor";
pub const DEFAULT_REFRESH_SECS: u64 = 2;
pub const DEFAULT_MEMORY_THRESHOLD_KB: u64 = 100 * 1024;
pub const DEFAULT_TOP_N: usize = 15;

//Value of PROC_MONITOR_SOURCE that selects the built-in /proc reader
const PROCFS_SOURCE: &str = "procfs";

/// Where snapshots come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A text table produced by the kernel module (or anything shaped like it).
    TableFile(PathBuf),
    /// The same table built in-process from `/proc`.
    Procfs,
}

/// Settings fixed for the lifetime of the monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub source: SourceKind,
    pub refresh_interval: Duration,
    pub memory_threshold_kb: u64,
    pub top_n: usize,
    pub uid_filter: Option<u32>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::TableFile(PathBuf::from(DEFAULT_SOURCE_PATH)),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            memory_threshold_kb: DEFAULT_MEMORY_THRESHOLD_KB,
            top_n: DEFAULT_TOP_N,
            uid_filter: None,
        }
    }
}

impl MonitorConfig {
    /// Defaults overlaid with `PROC_MONITOR_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PROC_MONITOR_SOURCE") {
            self.source = if v == PROCFS_SOURCE {
                SourceKind::Procfs
            } else {
                SourceKind::TableFile(PathBuf::from(v))
            };
            info!(source = ?self.source, "source overridden");
        }
        if let Some(secs) = parse_override::<u64>(&lookup, "PROC_MONITOR_INTERVAL_SECS", |n| *n > 0) {
            self.refresh_interval = Duration::from_secs(secs);
        }
        if let Some(kb) = parse_override::<u64>(&lookup, "PROC_MONITOR_THRESHOLD_KB", |_| true) {
            self.memory_threshold_kb = kb;
        }
        if let Some(n) = parse_override::<usize>(&lookup, "PROC_MONITOR_TOP_N", |n| *n > 0) {
            self.top_n = n;
        }
        //-1 mirrors the kernel module's "show all" setting
        if let Some(uid) = parse_override::<i64>(&lookup, "PROC_MONITOR_UID", |n| *n >= -1 && *n <= u32::MAX as i64) {
            self.uid_filter = if uid == -1 { None } else { Some(uid as u32) };
        }
        self
    }

    pub fn refresh_secs(&self) -> u64 {
        self.refresh_interval.as_secs()
    }
}

fn parse_override<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, valid: impl Fn(&T) -> bool) -> Option<T>
where
    T: FromStr + std::fmt::Debug,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => {
            info!(key, ?value, "config overridden");
            Some(value)
        }
        _ => {
            warn!(key, value = %raw, "ignoring invalid override");
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with(vars: &[(&str, &str)]) -> MonitorConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MonitorConfig::default().with_overrides(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_baseline() {
        let config = MonitorConfig::default();
        assert_eq!(config.source, SourceKind::TableFile(PathBuf::from("/proc/proc_monitor")));
        assert_eq!(config.refresh_secs(), 2);
        assert_eq!(config.memory_threshold_kb, 102400);
        assert_eq!(config.top_n, 15);
        assert_eq!(config.uid_filter, None);
    }

    #[test]
    fn overrides_apply() {
        let config = with(&[
            ("PROC_MONITOR_SOURCE", "/tmp/table.txt"),
            ("PROC_MONITOR_INTERVAL_SECS", "5"),
            ("PROC_MONITOR_THRESHOLD_KB", "2048"),
            ("PROC_MONITOR_TOP_N", "3"),
            ("PROC_MONITOR_UID", "1000"),
        ]);
        assert_eq!(config.source, SourceKind::TableFile(PathBuf::from("/tmp/table.txt")));
        assert_eq!(config.refresh_secs(), 5);
        assert_eq!(config.memory_threshold_kb, 2048);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.uid_filter, Some(1000));
    }

    #[test]
    fn procfs_keyword_selects_procfs_source() {
        assert_eq!(with(&[("PROC_MONITOR_SOURCE", "procfs")]).source, SourceKind::Procfs);
    }

    #[test]
    fn invalid_overrides_keep_defaults() {
        let config = with(&[
            ("PROC_MONITOR_INTERVAL_SECS", "0"),
            ("PROC_MONITOR_THRESHOLD_KB", "lots"),
            ("PROC_MONITOR_TOP_N", "-4"),
            ("PROC_MONITOR_UID", "-7"),
        ]);
        assert_eq!(config, MonitorConfig::default());
    }

    #[test]
    fn uid_minus_one_shows_all() {
        assert_eq!(with(&[("PROC_MONITOR_UID", "-1")]).uid_filter, None);
    }
}

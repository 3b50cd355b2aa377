
/// One dashboard line, derived from a process present in two consecutive snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub pid: u32,
    pub command: String,
    pub resident_memory_kb: u64, // From the current snapshot
    pub cpu_interval_ms: u64,    // CPU consumed between the two samples
}

impl DisplayRow {
    pub fn resident_memory_mb(&self) -> f64 {
        self.resident_memory_kb as f64 / 1024.0
    }

    //Strictly greater than: a process sitting exactly on the threshold is not flagged
    pub fn exceeds(&self, threshold_kb: u64) -> bool {
        self.resident_memory_kb > threshold_kb
    }
}

//! State — sequence, severity counters, timing anchors.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

/// Mutable per-run state threaded through the monitor loop.
pub struct Session {
    seq: u64,
    start_time: DateTime<Local>,
    pub(super) last_display: Option<DateTime<Local>>,
    severity_counts: BTreeMap<String, u64>,
    filtered: u64,
}

impl Session {
    pub fn new(now: DateTime<Local>) -> Self {
        // The conventional severities are pre-seeded so the summary shows
        // them even when no line of that severity ever arrived.
        let mut severity_counts = BTreeMap::new();
        for severity in ["INFO", "WARN", "ERR"] {
            severity_counts.insert(severity.to_string(), 0);
        }

        Self {
            seq: 1,
            start_time: now,
            last_display: None,
            severity_counts,
            filtered: 0,
        }
    }

    /// Sequence number the next printed line will carry.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    /// Restart the timing anchors after a device reset. Counters and the
    /// sequence number deliberately survive; only time starts over.
    pub fn reset_timing(&mut self, now: DateTime<Local>) {
        self.start_time = now;
        self.last_display = None;
    }

    /// Account for one printed line.
    pub fn record_printed(&mut self, severity: &str) {
        self.seq += 1;
        *self
            .severity_counts
            .entry(severity.to_string())
            .or_insert(0) += 1;
    }

    /// Account for one line suppressed by the pass filter.
    pub fn record_filtered(&mut self) {
        self.filtered += 1;
    }

    pub fn severity_counts(&self) -> &BTreeMap<String, u64> {
        &self.severity_counts
    }

    pub fn filtered(&self) -> u64 {
        self.filtered
    }
}

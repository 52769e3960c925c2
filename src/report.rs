// Report assembly: summaries + host metadata + window bookkeeping.

use chrono::{DateTime, Utc};

use crate::models::{ContainerSummary, Report};

/// Builds the report, stamped with the current wall-clock time. Never fails; an empty
/// `summaries` is a valid report for a window with no qualifying containers.
pub fn assemble(
    summaries: Vec<ContainerSummary>,
    window_seconds: u64,
    host_metadata: serde_json::Value,
) -> Report {
    assemble_at(Utc::now(), summaries, window_seconds, host_metadata)
}

pub fn assemble_at(
    now: DateTime<Utc>,
    summaries: Vec<ContainerSummary>,
    window_seconds: u64,
    host_metadata: serde_json::Value,
) -> Report {
    Report {
        timestamp: now.timestamp(),
        interval: window_seconds,
        stats: summaries,
        machine: host_metadata,
    }
}

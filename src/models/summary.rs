// Per-container rollup output, one entry per collection window.
// Field names follow the collector's document format.

use serde::{Deserialize, Serialize};

/// Average/min/max of a gauge over one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeSummary<T> {
    pub ave: f64,
    pub min: T,
    pub max: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuSummary {
    /// Increase of cumulative CPU time over the window.
    pub usage: i64,
    pub load: GaugeSummary<i64>,
}

/// Memory usage in kilobytes.
pub type MemorySummary = GaugeSummary<u64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub tx_bytes: GaugeSummary<u64>,
    pub rx_bytes: GaugeSummary<u64>,
    pub tx_packets: GaugeSummary<u64>,
    pub rx_packets: GaugeSummary<u64>,
}

/// Byte-count deltas summed across all block devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskIoSummary {
    #[serde(rename = "async")]
    pub async_bytes: i64,
    #[serde(rename = "sync")]
    pub sync_bytes: i64,
    #[serde(rename = "read")]
    pub read_bytes: i64,
    #[serde(rename = "write")]
    pub write_bytes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub name: String,
    /// Window start (first snapshot), epoch seconds.
    pub ts: i64,
    pub cpu: CpuSummary,
    pub memory: MemorySummary,
    pub network: NetworkSummary,
    pub diskio: DiskIoSummary,
}

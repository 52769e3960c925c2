// Raw cAdvisor v1.2 container stats (only the fields the rollup reads)

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the `/docker` response: a container's aliases and its recent per-second stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerInfo {
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub stats: Vec<Snapshot>,
}

/// One container's measurement at one second.
///
/// `network` and `diskio` are decoded leniently: a block that is absent or has the wrong
/// shape fails only this container's rollup (`MalformedRecord`) instead of the whole
/// `/docker` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub cpu: CpuSample,
    pub memory: MemorySample,
    #[serde(default, deserialize_with = "lenient")]
    pub network: Option<NetworkSample>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub diskio: DiskIo,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuSample {
    pub usage: CpuUsage,
    /// cAdvisor always emits this, as 0 when load collection is disabled.
    #[serde(default)]
    pub load_average: i64,
}

/// Cumulative CPU time in nanoseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuUsage {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySample {
    pub usage: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSample {
    pub rx_bytes: u64,
    pub rx_packets: u64,
    pub tx_bytes: u64,
    pub tx_packets: u64,
}

/// Block I/O counters. cAdvisor omits `io_service_bytes` when it has nothing to report, so
/// absence is kept distinct from an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiskIo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub io_service_bytes: Option<Vec<DiskDeviceEntry>>,
}

/// Per-device byte counts keyed by category name ("Async", "Sync", "Read", "Write", "Total").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiskDeviceEntry {
    #[serde(default)]
    pub major: u64,
    #[serde(default)]
    pub minor: u64,
    #[serde(default)]
    pub stats: HashMap<String, u64>,
}

/// The byte-count categories the rollup reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiskCategory {
    Async,
    Sync,
    Read,
    Write,
}

impl DiskCategory {
    pub const ALL: [DiskCategory; 4] = [
        DiskCategory::Async,
        DiskCategory::Sync,
        DiskCategory::Read,
        DiskCategory::Write,
    ];

    /// Key used in cAdvisor's per-device `stats` map.
    pub fn as_str(self) -> &'static str {
        match self {
            DiskCategory::Async => "Async",
            DiskCategory::Sync => "Sync",
            DiskCategory::Read => "Read",
            DiskCategory::Write => "Write",
        }
    }
}

impl fmt::Display for DiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

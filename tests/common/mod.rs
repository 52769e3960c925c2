// Shared test helpers

#![allow(dead_code)]

use cadvisor_rollup::models::*;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;

pub const WINDOW_START: i64 = 1_700_000_000;

/// Device entry carrying the same byte count in every category.
pub fn device(minor: u64, bytes: u64) -> DiskDeviceEntry {
    DiskDeviceEntry {
        major: 8,
        minor,
        stats: ["Async", "Sync", "Read", "Write", "Total"]
            .iter()
            .map(|k| (k.to_string(), bytes))
            .collect::<HashMap<_, _>>(),
    }
}

/// Snapshot at `WINDOW_START + second` with uniform network/disk fields.
pub fn snapshot(second: i64, memory_bytes: u64, cpu_total: u64) -> Snapshot {
    Snapshot {
        timestamp: Utc.timestamp_opt(WINDOW_START + second, 0).unwrap(),
        cpu: CpuSample {
            usage: CpuUsage { total: cpu_total },
            load_average: 0,
        },
        memory: MemorySample {
            usage: memory_bytes,
        },
        network: Some(NetworkSample {
            rx_bytes: 500,
            rx_packets: 5,
            tx_bytes: 700,
            tx_packets: 7,
        }),
        diskio: DiskIo {
            io_service_bytes: Some(vec![device(0, 4096)]),
        },
    }
}

pub fn container(aliases: &[&str], stats: Vec<Snapshot>) -> ContainerInfo {
    ContainerInfo {
        aliases: aliases.iter().map(|s| s.to_string()).collect(),
        stats,
    }
}

/// cAdvisor `/docker` payload for one container with three samples, as the API returns it.
pub const CADVISOR_DOCKER_JSON: &str = r#"{
  "/docker/3f1c": {
    "name": "/docker/3f1c",
    "aliases": ["web", "3f1c"],
    "namespace": "docker",
    "spec": {"has_cpu": true},
    "stats": [
      {
        "timestamp": "2023-11-14T22:13:20.123456789Z",
        "cpu": {"usage": {"total": 100, "per_cpu_usage": [60, 40], "user": 70, "system": 30}, "load_average": 0},
        "diskio": {
          "io_service_bytes": [{"major": 8, "minor": 0, "stats": {"Async": 10, "Read": 0, "Sync": 5, "Total": 15, "Write": 15}}],
          "io_serviced": [{"major": 8, "minor": 0, "stats": {"Async": 1, "Read": 0, "Sync": 1, "Total": 2, "Write": 2}}]
        },
        "memory": {"usage": 1024, "working_set": 512},
        "network": {"name": "eth0", "rx_bytes": 100, "rx_packets": 1, "rx_errors": 0, "rx_dropped": 0, "tx_bytes": 200, "tx_packets": 2, "tx_errors": 0, "tx_dropped": 0}
      },
      {
        "timestamp": "2023-11-14T22:13:21.123456789Z",
        "cpu": {"usage": {"total": 150}, "load_average": 2},
        "diskio": {"io_service_bytes": [{"major": 8, "minor": 0, "stats": {"Async": 20, "Read": 0, "Sync": 5, "Total": 25, "Write": 25}}]},
        "memory": {"usage": 2048},
        "network": {"rx_bytes": 300, "rx_packets": 3, "tx_bytes": 400, "tx_packets": 4}
      },
      {
        "timestamp": "2023-11-14T22:13:22.123456789Z",
        "cpu": {"usage": {"total": 220}, "load_average": 1},
        "diskio": {"io_service_bytes": [{"major": 8, "minor": 0, "stats": {"Async": 30, "Read": 8, "Sync": 9, "Total": 47, "Write": 39}}]},
        "memory": {"usage": 3072},
        "network": {"rx_bytes": 500, "rx_packets": 5, "tx_bytes": 600, "tx_packets": 6}
      }
    ]
  },
  "/docker/aa00": {
    "name": "/docker/aa00",
    "aliases": ["cadvisor", "aa00"],
    "stats": [
      {
        "timestamp": "2023-11-14T22:13:20Z",
        "cpu": {"usage": {"total": 1}, "load_average": 0},
        "diskio": {"io_service_bytes": []},
        "memory": {"usage": 4096},
        "network": {"rx_bytes": 0, "rx_packets": 0, "tx_bytes": 0, "tx_packets": 0}
      }
    ]
  }
}"#;

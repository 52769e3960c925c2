// Rollup: reduce one container's window of per-second snapshots to a summary.
// Gauges (memory, CPU load, network) get ave/min/max; cumulative counters (CPU time,
// disk bytes) get the first-to-last delta.

pub mod aggregate;
pub mod counter;
pub mod diskio;

use tracing::warn;

use crate::error::RollupError;
use crate::models::{
    ContainerSummary, CpuSummary, DiskCategory, DiskIoSummary, NetworkSummary, Snapshot,
};
use aggregate::RunningAggregate;

const BYTES_PER_KB: u64 = 1024;

/// Rolls up `window` (in source order) for the container reported as `name`.
///
/// Averages divide by the number of snapshots actually present.
pub fn rollup_container(
    name: &str,
    window: &[Snapshot],
) -> Result<ContainerSummary, RollupError> {
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        return Err(RollupError::EmptyWindow);
    };
    let n = window.len();

    let mut memory_kb = RunningAggregate::<u64>::new();
    let mut load = RunningAggregate::<i64>::new();
    let mut tx_bytes = RunningAggregate::<u64>::new();
    let mut rx_bytes = RunningAggregate::<u64>::new();
    let mut tx_packets = RunningAggregate::<u64>::new();
    let mut rx_packets = RunningAggregate::<u64>::new();

    for s in window {
        let network = s.network.as_ref().ok_or(RollupError::MalformedRecord)?;
        memory_kb.push(s.memory.usage / BYTES_PER_KB);
        load.push(s.cpu.load_average);
        tx_bytes.push(network.tx_bytes);
        rx_bytes.push(network.rx_bytes);
        tx_packets.push(network.tx_packets);
        rx_packets.push(network.rx_packets);
    }

    let cpu_usage = counter_delta(
        name,
        "cpu.usage.total",
        first.cpu.usage.total,
        last.cpu.usage.total,
    );

    let mut disk = [0i64; 4];
    for (slot, category) in disk.iter_mut().zip(DiskCategory::ALL) {
        let start = diskio::sum_category(&first.diskio, category)?;
        let end = diskio::sum_category(&last.diskio, category)?;
        *slot = counter_delta(name, category.as_str(), start, end);
    }
    let [async_bytes, sync_bytes, read_bytes, write_bytes] = disk;

    let gauge = |agg: &RunningAggregate<u64>| agg.summary(n).ok_or(RollupError::EmptyWindow);

    Ok(ContainerSummary {
        name: name.to_string(),
        ts: first.timestamp.timestamp(),
        cpu: CpuSummary {
            usage: cpu_usage,
            load: load.summary(n).ok_or(RollupError::EmptyWindow)?,
        },
        memory: gauge(&memory_kb)?,
        network: NetworkSummary {
            tx_bytes: gauge(&tx_bytes)?,
            rx_bytes: gauge(&rx_bytes)?,
            tx_packets: gauge(&tx_packets)?,
            rx_packets: gauge(&rx_packets)?,
        },
        diskio: DiskIoSummary {
            async_bytes,
            sync_bytes,
            read_bytes,
            write_bytes,
        },
    })
}

/// Counter delta, passed through even when negative. A negative value means the counter
/// went backwards inside the window, so it is logged for the operator.
fn counter_delta(container: &str, counter: &str, first: u64, last: u64) -> i64 {
    let d = counter::delta(first, last);
    if d < 0 {
        warn!(
            container = %container,
            counter = %counter,
            first,
            last,
            delta = d,
            "counter decreased within window (restart?); reporting negative delta"
        );
    }
    d
}

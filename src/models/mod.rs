// Domain models: raw cAdvisor samples in, rolled-up summaries and the report out

mod report;
mod snapshot;
mod summary;

pub use report::Report;
pub use snapshot::{
    ContainerInfo, CpuSample, CpuUsage, DiskCategory, DiskDeviceEntry, DiskIo, MemorySample,
    NetworkSample, Snapshot,
};
pub use summary::{
    ContainerSummary, CpuSummary, DiskIoSummary, GaugeSummary, MemorySummary, NetworkSummary,
};

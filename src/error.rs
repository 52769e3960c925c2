//! Error types for the rollup and for a whole run

use thiserror::Error;

use crate::models::DiskCategory;

/// Why a single container could not be rolled up. The run continues without it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollupError {
    /// The source returned no snapshots for the container
    #[error("window has no snapshots")]
    EmptyWindow,

    /// The disk I/O record has no per-device `io_service_bytes` list
    #[error("disk I/O record has no io_service_bytes entries")]
    MalformedRecord,

    /// A device entry lacks the requested byte-count category
    #[error("disk I/O entry {major}:{minor} is missing category {category}")]
    MissingCategory {
        category: DiskCategory,
        major: u64,
        minor: u64,
    },
}

/// Failures that abort a run. Nothing is retried; the next scheduled run starts fresh.
#[derive(Debug, Error)]
pub enum JobError {
    /// cAdvisor could not be reached or returned something unusable
    #[error("stats source unavailable ({endpoint}): {reason}")]
    SourceUnavailable { endpoint: String, reason: String },

    /// The collector refused the report or could not be reached
    #[error("collector rejected report ({endpoint}): {reason}")]
    SinkRejected { endpoint: String, reason: String },

    /// The report could not be encoded as JSON
    #[error("report encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

// The document sent to the collector once per run.

use serde::{Deserialize, Serialize};

use super::ContainerSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// When the report was assembled, epoch seconds.
    pub timestamp: i64,
    /// Window length in seconds.
    pub interval: u64,
    pub stats: Vec<ContainerSummary>,
    /// Host metadata from cAdvisor's `/machine`, passed through untouched.
    pub machine: serde_json::Value,
}

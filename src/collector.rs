// Collector endpoint: POST the report as JSON. Any non-2xx response fails the run.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::instrument;

use crate::error::JobError;
use crate::job::ReportSink;
use crate::models::Report;
use crate::version;

pub struct Collector {
    client: Client,
    url: String,
}

impl Collector {
    pub fn connect(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(version::user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl ReportSink for Collector {
    #[instrument(skip_all, fields(operation = "deliver_report", containers = report.stats.len()))]
    async fn deliver(&self, report: &Report) -> Result<(), JobError> {
        let rejected = |reason: String| JobError::SinkRejected {
            endpoint: self.url.clone(),
            reason,
        };
        let body = serde_json::to_vec(report)?;
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| rejected(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(rejected(format!("HTTP {}: {}", status, text.trim())));
        }
        Ok(())
    }
}

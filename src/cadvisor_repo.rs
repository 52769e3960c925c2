// cAdvisor v1.2 REST API: per-container stats window and host machine info

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::JobError;
use crate::job::StatsSource;
use crate::models::ContainerInfo;
use crate::version;

pub struct CadvisorRepo {
    client: Client,
    base_url: String,
}

impl CadvisorRepo {
    /// `base_url` is the API root, e.g. `http://cadvisor.local:8989/api/v1.2`.
    pub fn connect(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(version::user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, JobError> {
        let url = self.endpoint(path);
        let unavailable = |reason: String| JobError::SourceUnavailable {
            endpoint: url.clone(),
            reason,
        };
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| unavailable(e.to_string()))?;
        response
            .json::<T>()
            .await
            .map_err(|e| unavailable(format!("decoding response: {}", e)))
    }
}

impl StatsSource for CadvisorRepo {
    #[instrument(skip(self), fields(repo = "cadvisor", operation = "fetch_containers"))]
    async fn fetch_containers(&self) -> Result<BTreeMap<String, ContainerInfo>, JobError> {
        let containers: BTreeMap<String, ContainerInfo> = self.get_json("docker").await?;
        debug!(count = containers.len(), "fetched container stats");
        Ok(containers)
    }

    #[instrument(skip(self), fields(repo = "cadvisor", operation = "fetch_machine"))]
    async fn fetch_machine(&self) -> Result<serde_json::Value, JobError> {
        self.get_json("machine").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let repo =
            CadvisorRepo::connect("http://cadvisor.local:8989/api/v1.2/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            repo.endpoint("docker"),
            "http://cadvisor.local:8989/api/v1.2/docker"
        );
        assert_eq!(
            repo.endpoint("machine"),
            "http://cadvisor.local:8989/api/v1.2/machine"
        );
    }
}

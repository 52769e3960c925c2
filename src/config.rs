use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::selector::MatchType;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cadvisor: CadvisorConfig,
    pub collector: CollectorConfig,
    pub selection: SelectionConfig,
    pub report: ReportConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CadvisorConfig {
    /// API root, without the trailing `/docker` or `/machine`.
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for CadvisorConfig {
    fn default() -> Self {
        Self {
            url: "http://cadvisor.local:8989/api/v1.2".into(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub url: String,
    pub timeout_secs: u64,
    /// Build and print the report without POSTing it.
    pub dry_run: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            url: "http://collector.local:8787/cadvisor/metrics/".into(),
            timeout_secs: default_timeout_secs(),
            dry_run: false,
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub match_type: MatchType,
    /// Alias of the monitoring agent's own container.
    pub agent_name: String,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            match_type: MatchType::All,
            agent_name: "cadvisor".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Seconds of data cAdvisor returns per container; written to the report as `interval`.
    pub interval_secs: u64,
    pub print_json: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            print_json: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Cron expression (local time, seconds field first, e.g. "0 * * * * *"). When unset the
    /// process runs once and exits, leaving scheduling to the system cron.
    pub cron: Option<String>,
}

impl AppConfig {
    /// Loads `CONFIG_FILE` (default `config.toml`), then applies `CADVISOR_URL`,
    /// `COLLECTOR_URL` and `MATCH_TYPE` from the environment. A missing default file means
    /// built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_with("config.toml", |key| std::env::var(key).ok())
    }

    /// [`AppConfig::load`] with the default path and the environment supplied by the caller.
    /// A file named by `CONFIG_FILE` must exist; `default_path` may be missing.
    pub fn load_with<F>(default_path: impl AsRef<Path>, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = lookup("CONFIG_FILE").map(PathBuf::from);
        let path = explicit
            .clone()
            .unwrap_or_else(|| default_path.as_ref().to_path_buf());
        let s = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if explicit.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
                String::new()
            }
            Err(e) => anyhow::bail!("reading config {}: {}", path.display(), e),
        };
        let mut config: AppConfig = toml::from_str(&s)?;
        config.apply_env_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates one file. No env overrides.
    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path.display(), e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests). No env overrides.
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies the environment variables the sender has always honored. `lookup` is
    /// `std::env::var` in production.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CADVISOR_URL") {
            self.cadvisor.url = url;
        }
        if let Some(url) = lookup("COLLECTOR_URL") {
            self.collector.url = url;
        }
        if let Some(match_type) = lookup("MATCH_TYPE") {
            self.selection.match_type = MatchType::from_str(&match_type)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            is_http_url(&self.cadvisor.url),
            "cadvisor.url must be an absolute http(s) URL, got {:?}",
            self.cadvisor.url
        );
        anyhow::ensure!(
            self.cadvisor.timeout_secs > 0,
            "cadvisor.timeout_secs must be > 0, got {}",
            self.cadvisor.timeout_secs
        );
        anyhow::ensure!(
            is_http_url(&self.collector.url),
            "collector.url must be an absolute http(s) URL, got {:?}",
            self.collector.url
        );
        anyhow::ensure!(
            self.collector.timeout_secs > 0,
            "collector.timeout_secs must be > 0, got {}",
            self.collector.timeout_secs
        );
        anyhow::ensure!(
            !self.selection.agent_name.is_empty(),
            "selection.agent_name must be non-empty"
        );
        anyhow::ensure!(
            self.report.interval_secs > 0,
            "report.interval_secs must be > 0, got {}",
            self.report.interval_secs
        );
        if let Some(expr) = &self.schedule.cron {
            cron::Schedule::from_str(expr)
                .map_err(|e| anyhow::anyhow!("schedule.cron {:?} is invalid: {}", expr, e))?;
        }
        Ok(())
    }
}

fn is_http_url(s: &str) -> bool {
    reqwest::Url::parse(s).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

// In-process schedule: run the job at each cron tick (local time) until shutdown.
// Runs never overlap; a tick that passes while a run is in progress is skipped.

use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

use crate::job::{self, JobConfig, ReportSink, StatsSource};

/// Delay until the next tick of `schedule` after now, or `None` when the schedule has no
/// upcoming ticks.
pub fn until_next(schedule: &cron::Schedule) -> Option<Duration> {
    let now = chrono::Local::now();
    let next = schedule.after(&now).next()?;
    Some((next - now).to_std().unwrap_or(Duration::from_secs(1)))
}

pub async fn run_scheduled<S, K, F>(
    cron_expr: &str,
    source: &S,
    sink: &K,
    config: &JobConfig,
    shutdown: F,
) -> anyhow::Result<()>
where
    S: StatsSource,
    K: ReportSink,
    F: std::future::Future<Output = ()>,
{
    let schedule = cron::Schedule::from_str(cron_expr)
        .map_err(|e| anyhow::anyhow!("invalid cron expression {:?}: {}", cron_expr, e))?;
    info!(cron = %cron_expr, "running on schedule");

    tokio::pin!(shutdown);
    loop {
        let Some(delay) = until_next(&schedule) else {
            warn!(cron = %cron_expr, "schedule has no upcoming ticks; stopping");
            return Ok(());
        };
        tokio::select! {
            _ = tokio::time::sleep(delay) => {
                // Failed runs are not retried; the next tick starts over.
                if let Err(e) = job::run_once(source, sink, config).await {
                    warn!(error = %e, "run failed");
                }
            }
            _ = &mut shutdown => {
                info!("Received shutdown signal");
                return Ok(());
            }
        }
    }
}

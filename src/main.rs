use std::time::Duration;

use anyhow::Result;
use cadvisor_rollup::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the report JSON; logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        app = version::NAME,
        version = version::VERSION,
        cadvisor = %app_config.cadvisor.url,
        collector = %app_config.collector.url,
        match_type = %app_config.selection.match_type,
        "starting"
    );

    let source = cadvisor_repo::CadvisorRepo::connect(
        &app_config.cadvisor.url,
        Duration::from_secs(app_config.cadvisor.timeout_secs),
    )?;
    let sink = collector::Collector::connect(
        &app_config.collector.url,
        Duration::from_secs(app_config.collector.timeout_secs),
    )?;
    let job_config = job::JobConfig::from(&app_config);

    match app_config.schedule.cron.as_deref() {
        None => {
            job::run_once(&source, &sink, &job_config).await?;
        }
        Some(expr) => {
            scheduler::run_scheduled(expr, &source, &sink, &job_config, shutdown_signal())
                .await?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

// One rollup run: fetch the last window from cAdvisor, roll up each selected container,
// assemble the report, print it and hand it to the collector.
// Per-container failures are logged and skipped; source and sink failures end the run.

use std::collections::BTreeMap;
use std::future::Future;
use std::io::Write;

use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::error::JobError;
use crate::models::{ContainerInfo, ContainerSummary, Report};
use crate::report;
use crate::rollup;
use crate::selector::ContainerSelector;

/// Where container windows and host metadata come from.
pub trait StatsSource {
    /// Containers keyed by their cAdvisor path, each with its most recent window of stats.
    fn fetch_containers(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<String, ContainerInfo>, JobError>> + Send;

    /// Opaque host description.
    fn fetch_machine(&self) -> impl Future<Output = Result<serde_json::Value, JobError>> + Send;
}

/// Where finished reports go.
pub trait ReportSink {
    fn deliver(&self, report: &Report) -> impl Future<Output = Result<(), JobError>> + Send;
}

#[derive(Debug, Clone)]
pub struct JobConfig {
    pub selector: ContainerSelector,
    /// Window length reported in the document, seconds.
    pub interval_secs: u64,
    /// Print the report JSON to stdout before delivery.
    pub print_report: bool,
    /// Build and print the report but do not deliver it.
    pub dry_run: bool,
}

impl From<&AppConfig> for JobConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            selector: ContainerSelector::new(
                config.selection.match_type,
                config.selection.agent_name.clone(),
            ),
            interval_secs: config.report.interval_secs,
            print_report: config.report.print_json,
            dry_run: config.collector.dry_run,
        }
    }
}

/// Per-run counts for the log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub containers_seen: usize,
    pub reported: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Rolls up every selected container, in key order. Containers the selector rejects are
/// skipped; containers whose rollup fails are logged and left out.
pub fn rollup_all(
    containers: &BTreeMap<String, ContainerInfo>,
    selector: &ContainerSelector,
) -> (Vec<ContainerSummary>, RunSummary) {
    let mut summaries = Vec::with_capacity(containers.len());
    let mut counts = RunSummary {
        containers_seen: containers.len(),
        ..Default::default()
    };

    for (key, info) in containers {
        let Some(name) = selector.select(&info.aliases) else {
            debug!(container = %key, aliases = ?info.aliases, "no matching name; skipped");
            counts.skipped += 1;
            continue;
        };
        match rollup::rollup_container(&name, &info.stats) {
            Ok(summary) => {
                summaries.push(summary);
                counts.reported += 1;
            }
            Err(e) => {
                warn!(
                    container = %name,
                    samples = info.stats.len(),
                    error = %e,
                    "rollup failed; container left out of report"
                );
                counts.failed += 1;
            }
        }
    }

    (summaries, counts)
}

/// Runs one full collection cycle.
#[instrument(skip_all, fields(interval_secs = config.interval_secs, dry_run = config.dry_run))]
pub async fn run_once<S, K>(
    source: &S,
    sink: &K,
    config: &JobConfig,
) -> Result<(Report, RunSummary), JobError>
where
    S: StatsSource,
    K: ReportSink,
{
    let containers = source.fetch_containers().await?;
    let (summaries, counts) = rollup_all(&containers, &config.selector);

    let machine = source.fetch_machine().await?;
    let report = report::assemble(summaries, config.interval_secs, machine);

    if config.print_report {
        // A closed stdout must not cost the delivery.
        if let Err(e) = write_report(std::io::stdout().lock(), &report) {
            warn!(error = %e, "could not print report to stdout");
        }
    }

    if config.dry_run {
        info!(
            containers_seen = counts.containers_seen,
            reported = counts.reported,
            skipped = counts.skipped,
            failed = counts.failed,
            "dry run; report not delivered"
        );
        return Ok((report, counts));
    }

    sink.deliver(&report).await?;
    info!(
        containers_seen = counts.containers_seen,
        reported = counts.reported,
        skipped = counts.skipped,
        failed = counts.failed,
        "report delivered"
    );
    Ok((report, counts))
}

/// Writes the report as one line of JSON.
fn write_report<W: Write>(mut out: W, report: &Report) -> std::io::Result<()> {
    serde_json::to_writer(&mut out, report)?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn empty_report() -> Report {
        report::assemble(Vec::new(), 60, serde_json::json!({"num_cores": 1}))
    }

    #[test]
    fn write_report_emits_one_json_line() {
        let mut out = Vec::new();
        write_report(&mut out, &empty_report()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);
        let back: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(back["interval"], 60);
    }

    #[test]
    fn write_report_to_closed_pipe_is_an_error_not_a_panic() {
        let err = write_report(ClosedPipe, &empty_report()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}

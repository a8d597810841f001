//! Orchestration of a run: period selection, loading, pipeline, publishing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use pbs_core::{DomainFilters, run_pipeline};
use pbs_ingest::{CsvSnapshotSource, TableSource, load_all, resolve_period};
use pbs_model::{Period, ScheduleTag};
use pbs_output::{CsvPublisher, DryRunPublisher, Publisher};
use tracing::{info, info_span};

use crate::types::{PeriodsResult, RunResult};

/// Published table name used when no output path is given.
pub const DEFAULT_OUTPUT_FILE: &str = "rheumatology-biologics.csv";

/// What to do with the combination rows once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishMode {
    Write,
    /// Compare against the published table without writing it.
    DryRun,
    Skip,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub snapshot_root: PathBuf,
    pub period: Option<Period>,
    pub output: Option<PathBuf>,
    pub filters: DomainFilters,
    pub lookback: Option<u32>,
    pub publish: PublishMode,
}

impl RunOptions {
    pub fn new(snapshot_root: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_root: snapshot_root.into(),
            period: None,
            output: None,
            filters: DomainFilters::rheumatology(),
            lookback: None,
            publish: PublishMode::Write,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.snapshot_root.join(DEFAULT_OUTPUT_FILE))
    }
}

/// Reads domain filters from a JSON file; missing lists keep their defaults.
pub fn load_filters(path: &Path) -> Result<DomainFilters> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read filters {}", path.display()))?;
    let filters: DomainFilters = serde_json::from_str(&content)
        .with_context(|| format!("parse filters {}", path.display()))?;
    let filters = filters.normalized();
    if filters.drugs.is_empty() || filters.diseases.is_empty() {
        bail!(
            "filters {} must name at least one drug and one disease",
            path.display()
        );
    }
    Ok(filters)
}

/// Picks the requested period, or the one the resolver prefers for `today`.
pub fn select_period(
    source: &dyn TableSource,
    requested: Option<Period>,
    today: NaiveDate,
    lookback: Option<u32>,
) -> Result<Period> {
    let available = source.periods().context("list snapshot periods")?;
    if let Some(period) = requested {
        if !available.contains(&period) {
            bail!("no snapshot for requested period {period}");
        }
        return Ok(period);
    }
    match resolve_period(&available, today, lookback) {
        Some(period) => Ok(period),
        None if available.is_empty() => bail!("no snapshot periods available"),
        None => bail!(
            "no snapshot within {} months of {today}",
            lookback.unwrap_or_default()
        ),
    }
}

/// Lists the snapshot periods under `root` and the one `run` would select.
pub fn list_periods(root: &Path, today: NaiveDate, lookback: Option<u32>) -> Result<PeriodsResult> {
    let source = CsvSnapshotSource::new(root);
    let periods = source.periods().context("list snapshot periods")?;
    let selected = resolve_period(&periods, today, lookback);
    Ok(PeriodsResult {
        root: root.to_path_buf(),
        periods,
        selected,
    })
}

/// Runs the extract for one period and publishes according to `options.publish`.
pub fn execute(options: &RunOptions, today: NaiveDate) -> Result<RunResult> {
    let span = info_span!("run", root = %options.snapshot_root.display());
    let _guard = span.enter();

    let source = CsvSnapshotSource::new(&options.snapshot_root);
    let period = select_period(&source, options.period, today, options.lookback)?;
    info!(period = %period, "schedule period selected");

    let tables = load_all(&source, period).with_context(|| format!("load snapshot {period}"))?;
    let schedule = ScheduleTag::from(period);
    let output = run_pipeline(&tables, &options.filters, &schedule)
        .with_context(|| format!("build combinations for {period}"))?;

    let output_path = options.output_path();
    let outcome = match options.publish {
        PublishMode::Write => Some(
            CsvPublisher::new(&output_path)
                .publish(&output.rows, &schedule.code)
                .with_context(|| format!("publish to {}", output_path.display()))?,
        ),
        PublishMode::DryRun => Some(
            DryRunPublisher::new(&output_path)
                .publish(&output.rows, &schedule.code)
                .with_context(|| format!("check {}", output_path.display()))?,
        ),
        PublishMode::Skip => None,
    };

    Ok(RunResult {
        period,
        schedule: output.schedule,
        output: output_path,
        rows: output.rows,
        stats: output.stats,
        outcome,
        dry_run: options.publish == PublishMode::DryRun,
    })
}

use std::path::PathBuf;

use pbs_core::PipelineStats;
use pbs_model::{CombinationRow, Period, ScheduleTag};
use pbs_output::PublishOutcome;

/// Result of one `run` invocation.
#[derive(Debug)]
pub struct RunResult {
    pub period: Period,
    pub schedule: ScheduleTag,
    pub output: PathBuf,
    pub rows: Vec<CombinationRow>,
    pub stats: PipelineStats,
    /// `None` when publishing was skipped.
    pub outcome: Option<PublishOutcome>,
    pub dry_run: bool,
}

/// Snapshot periods found under a store root.
#[derive(Debug)]
pub struct PeriodsResult {
    pub root: PathBuf,
    pub periods: Vec<Period>,
    /// The period `run` would process today.
    pub selected: Option<Period>,
}

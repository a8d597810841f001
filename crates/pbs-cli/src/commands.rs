use anyhow::{Context, Result};
use chrono::Local;

use pbs_cli::run::{PublishMode, RunOptions, execute, list_periods, load_filters};
use pbs_cli::types::{PeriodsResult, RunResult};

use crate::cli::{PeriodsArgs, RunArgs};

pub fn run_extract(args: &RunArgs) -> Result<RunResult> {
    let mut options = RunOptions::new(&args.snapshot_root);
    options.period = args.period;
    options.output.clone_from(&args.output);
    options.lookback = args.lookback;
    if let Some(path) = &args.filters {
        options.filters = load_filters(path)?;
    }
    options.publish = if args.json {
        PublishMode::Skip
    } else if args.dry_run {
        PublishMode::DryRun
    } else {
        PublishMode::Write
    };
    execute(&options, Local::now().date_naive())
}

pub fn run_periods(args: &PeriodsArgs) -> Result<PeriodsResult> {
    list_periods(&args.snapshot_root, Local::now().date_naive(), args.lookback)
}

pub fn print_rows_json(result: &RunResult) -> Result<()> {
    let json = serde_json::to_string_pretty(&result.rows).context("serialize combinations")?;
    println!("{json}");
    Ok(())
}

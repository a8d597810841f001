//! CLI argument definitions for the PBS biologics extract.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use pbs_cli::logging::LogFormat;
use pbs_model::Period;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "pbs-biologics",
    version,
    about = "PBS biologics extract - rheumatology drug/brand/restriction combinations",
    long_about = "Extract biologic drug listings for rheumatic diseases from a PBS \
                  schedule snapshot.\n\n\
                  Joins items, restrictions, prescribing texts and indications, then \
                  appends one row per drug, brand and restriction to a CSV table, \
                  at most once per schedule period."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract combinations for one schedule period and publish them.
    Run(RunArgs),

    /// List the schedule periods available in a snapshot store.
    Periods(PeriodsArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory holding one `YYYY-MM` folder of CSV tables per schedule.
    #[arg(value_name = "SNAPSHOT_ROOT")]
    pub snapshot_root: PathBuf,

    /// Schedule period to process (default: current month, then previous, then latest).
    #[arg(long = "period", value_name = "YYYY-MM")]
    pub period: Option<Period>,

    /// Published CSV table (default: <SNAPSHOT_ROOT>/rheumatology-biologics.csv).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON file with `drugs` and/or `diseases` lists replacing the defaults.
    #[arg(long = "filters", value_name = "JSON")]
    pub filters: Option<PathBuf>,

    /// Ignore snapshots older than this many months when falling back to the latest.
    #[arg(long = "lookback", value_name = "MONTHS")]
    pub lookback: Option<u32>,

    /// Run the pipeline and report what would be published without writing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the combination rows as JSON instead of publishing.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct PeriodsArgs {
    /// Directory holding one `YYYY-MM` folder of CSV tables per schedule.
    #[arg(value_name = "SNAPSHOT_ROOT")]
    pub snapshot_root: PathBuf,

    /// Lookback window applied when marking the period `run` would pick.
    #[arg(long = "lookback", value_name = "MONTHS")]
    pub lookback: Option<u32>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}

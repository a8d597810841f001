//! PBS biologics extract CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use pbs_cli::logging::{LogConfig, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{print_rows_json, run_extract, run_periods};
use crate::summary::{print_periods, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Run(args) => match run_extract(&args) {
            Ok(result) if args.json => match print_rows_json(&result) {
                Ok(()) => 0,
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            },
            Ok(result) => {
                print_summary(&result);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Periods(args) => match run_periods(&args) {
            Ok(result) => {
                print_periods(&result);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Logging settings from the global flags.
///
/// An explicit `--log-level` or `-v/-q` pins the level; otherwise `RUST_LOG`
/// may override the default.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_pinned = cli.log_level.is_some() || cli.verbosity.is_present();
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from),
        use_env_filter: !level_pinned,
        with_ansi,
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
    }
}

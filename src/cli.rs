// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::types::Granularity;

/// Command-line arguments for `ganttdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ganttdag",
    version,
    about = "Compute critical path, slack and Gantt layout for a task schedule.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the schedule file (TOML).
    ///
    /// Default: `$GANTTDAG_SCHEDULE`, else `Schedule.toml` in the current
    /// working directory.
    #[arg(long, value_name = "PATH")]
    pub schedule: Option<PathBuf>,

    /// Parse + validate and list the tasks, but don't compute the schedule.
    #[arg(long)]
    pub dry_run: bool,

    /// Fail instead of warning when a predecessor references an unknown task.
    #[arg(long)]
    pub strict: bool,

    /// Report format on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Override the timeline granularity from the schedule file.
    #[arg(long, value_enum, value_name = "GRANULARITY")]
    pub granularity: Option<GranularityArg>,

    /// Override the first visible day of the timeline (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub window_start: Option<NaiveDate>,

    /// Also write the task list as CSV to this path.
    #[arg(long, value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `GANTTDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Granularity as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum GranularityArg {
    Day,
    Week,
    Month,
    Quarter,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Day => Granularity::Day,
            GranularityArg::Week => Granularity::Week,
            GranularityArg::Month => Granularity::Month,
            GranularityArg::Quarter => Granularity::Quarter,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

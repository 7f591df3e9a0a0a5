// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod export;
pub mod logging;
pub mod phase;
pub mod report;
pub mod store;
pub mod timeline;
pub mod types;

use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::{CliArgs, OutputFormat};
use crate::config::{default_schedule_path, load_and_validate};
use crate::report::{render_dry_run, ScheduleReport};

/// How a run ended, for the binary's exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Schedule computed (or dry-run listed) successfully.
    Ok,
    /// The schedule loaded but could not be computed (e.g. a cycle).
    InvalidSchedule,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - schedule file loading + validation
/// - the task store and its first recomputation
/// - report rendering (text or JSON)
/// - optional CSV export
pub fn run(args: CliArgs) -> Result<RunOutcome> {
    let path = args.schedule.clone().unwrap_or_else(default_schedule_path);
    let cfg = load_and_validate(&path)
        .with_context(|| format!("loading schedule from {:?}", path))?;

    if args.dry_run {
        print!("{}", render_dry_run(&cfg.project.name, &cfg.task));
        debug!("dry-run complete (nothing computed)");
        return Ok(RunOutcome::Ok);
    }

    let store = cfg.to_store()?;
    info!(
        tasks = store.len(),
        valid = store.is_valid(),
        "schedule loaded"
    );

    if args.strict {
        store.ensure_no_dangling()?;
    }

    let mut window = cfg.window();
    if let Some(g) = args.granularity {
        window = window.with_granularity(g.into());
    }
    if let Some(start) = args.window_start {
        window.range_start = start;
    }

    let report = ScheduleReport::build(
        cfg.project.name.clone(),
        &store,
        window,
        &cfg.timeline.day_width,
        cfg.row_metrics(),
    );

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(ref csv_path) = args.export_csv {
        let file = File::create(csv_path)
            .with_context(|| format!("creating CSV file {:?}", csv_path))?;
        export::write_csv(&report.tasks, BufWriter::new(file))?;
        info!(path = ?csv_path, "task list exported as CSV");
    }

    if store.is_valid() {
        Ok(RunOutcome::Ok)
    } else {
        Ok(RunOutcome::InvalidSchedule)
    }
}

// tests/run_end_to_end.rs

use std::error::Error;
use std::io::Write;

use clap::Parser;
use tempfile::{NamedTempFile, TempDir};

use ganttdag::cli::CliArgs;
use ganttdag::config::load_and_validate;
use ganttdag::errors::ScheduleError;
use ganttdag::report::{render_dry_run, ScheduleReport};
use ganttdag::{run, RunOutcome};
use ganttdag_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

const SCHEDULE: &str = r#"
[project]
name = "Eaglewood Retail"

[[task]]
id = "A"
name = "Excavation"
start_date = "2024-05-01"
duration_days = 10
phase = "Foundation"

[[task]]
id = "B"
name = "Footings"
start_date = "2024-05-01"
duration_days = 5
phase = "Foundation"
predecessors = [{ task_id = "A", type = "FS" }]

[[task]]
id = "C"
name = "Survey"
start_date = "2024-05-01"
duration_days = 3
predecessors = [{ task_id = "A", type = "FS" }]
"#;

const CYCLIC: &str = r#"
[[task]]
id = "D"
name = "D"
start_date = "2024-05-01"
duration_days = 1
predecessors = [{ task_id = "E" }]

[[task]]
id = "E"
name = "E"
start_date = "2024-05-01"
duration_days = 1
predecessors = [{ task_id = "D" }]
"#;

const DANGLING: &str = r#"
[[task]]
id = "F"
name = "Finishes"
start_date = "2024-05-01"
duration_days = 2
predecessors = [{ task_id = "ghost" }]
"#;

fn write_schedule(contents: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = NamedTempFile::new()?;
    write!(file, "{contents}")?;
    Ok(file)
}

#[test]
fn run_exports_csv_and_succeeds() -> TestResult {
    init_tracing();

    let file = write_schedule(SCHEDULE)?;
    let dir = TempDir::new()?;
    let csv_path = dir.path().join("tasks.csv");

    let args = CliArgs::try_parse_from([
        "ganttdag",
        "--schedule",
        file.path().to_str().ok_or("non-utf8 path")?,
        "--format",
        "json",
        "--granularity",
        "day",
        "--export-csv",
        csv_path.to_str().ok_or("non-utf8 path")?,
    ])?;

    assert_eq!(run(args)?, RunOutcome::Ok);

    let csv = std::fs::read_to_string(&csv_path)?;
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.lines().any(|l| l.starts_with("C,Survey,,") && l.contains(",3,false,")));
    Ok(())
}

#[test]
fn run_reports_cyclic_schedule() -> TestResult {
    let file = write_schedule(CYCLIC)?;
    let args = CliArgs::try_parse_from([
        "ganttdag",
        "--schedule",
        file.path().to_str().ok_or("non-utf8 path")?,
    ])?;

    assert_eq!(run(args)?, RunOutcome::InvalidSchedule);
    Ok(())
}

#[test]
fn run_dry_run_skips_computation() -> TestResult {
    let file = write_schedule(CYCLIC)?;
    let args = CliArgs::try_parse_from([
        "ganttdag",
        "--schedule",
        file.path().to_str().ok_or("non-utf8 path")?,
        "--dry-run",
    ])?;

    assert_eq!(run(args)?, RunOutcome::Ok);
    Ok(())
}

#[test]
fn run_fails_on_missing_file() {
    let args = CliArgs::try_parse_from(["ganttdag", "--schedule", "/no/such/Schedule.toml"])
        .expect("args parse");
    assert!(run(args).is_err());
}

#[test]
fn text_report_lists_schedule() -> TestResult {
    let file = write_schedule(SCHEDULE)?;
    let cfg = load_and_validate(file.path())?;
    let store = cfg.to_store()?;

    let report = ScheduleReport::build(
        cfg.project.name.clone(),
        &store,
        cfg.window(),
        &cfg.timeline.day_width,
        cfg.row_metrics(),
    );
    let text = report.render_text();

    assert!(text.contains("ganttdag schedule: Eaglewood Retail"));
    assert!(text.contains("health: valid"));
    assert!(text.contains("critical path: A -> B"));
    assert!(text.contains("slack 2"));
    assert!(text.contains("Foundation: 2 tasks"));
    assert!(text.contains("Other: 1 tasks"));

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["tasks"][2]["slack"], 2);
    assert_eq!(json["tasks"][0]["early_start"], "2024-05-01");
    assert_eq!(json["health"]["state"], "valid");
    assert_eq!(json["layout"]["bars"].as_array().map(|a| a.len()), Some(3));

    let dry = render_dry_run(&cfg.project.name, &cfg.task);
    assert!(dry.contains("after: A FS +0d"));
    Ok(())
}

#[test]
fn strict_run_rejects_dangling_predecessors() -> TestResult {
    let file = write_schedule(DANGLING)?;
    let path = file.path().to_str().ok_or("non-utf8 path")?;

    let lenient = CliArgs::try_parse_from(["ganttdag", "--schedule", path])?;
    assert_eq!(run(lenient)?, RunOutcome::Ok);

    let strict = CliArgs::try_parse_from(["ganttdag", "--schedule", path, "--strict"])?;
    let err = run(strict).expect_err("strict run must fail");
    assert!(matches!(
        err.downcast_ref::<ScheduleError>(),
        Some(ScheduleError::DanglingPredecessor { predecessor, .. }) if predecessor == "ghost"
    ));
    Ok(())
}

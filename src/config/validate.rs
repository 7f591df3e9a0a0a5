// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{RawScheduleFile, ScheduleFile, TimelineSection};
use crate::errors::{Result, ScheduleError};
use crate::store::TaskInput;

impl TryFrom<RawScheduleFile> for ScheduleFile {
    type Error = crate::errors::ScheduleError;

    fn try_from(raw: RawScheduleFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_tasks(&raw)?;
        validate_timeline(&raw.timeline)?;
        let tasks = validate_tasks(raw.task)?;
        Ok(ScheduleFile::new_unchecked(raw.project, raw.timeline, tasks))
    }
}

fn ensure_has_tasks(cfg: &RawScheduleFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(ScheduleError::ConfigError(
            "schedule must contain at least one [[task]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_timeline(timeline: &TimelineSection) -> Result<()> {
    if timeline.days_to_show == 0 {
        return Err(ScheduleError::ConfigError(
            "[timeline].days_to_show must be >= 1 (got 0)".to_string(),
        ));
    }

    if !(timeline.header_height.is_finite() && timeline.header_height >= 0.0) {
        return Err(ScheduleError::ConfigError(format!(
            "[timeline].header_height must be >= 0 (got {})",
            timeline.header_height
        )));
    }

    let sizes = [
        ("row_height", timeline.row_height),
        ("day_width.day", timeline.day_width.day),
        ("day_width.week", timeline.day_width.week),
        ("day_width.month", timeline.day_width.month),
        ("day_width.quarter", timeline.day_width.quarter),
    ];
    for (name, value) in sizes {
        if !(value.is_finite() && value > 0.0) {
            return Err(ScheduleError::ConfigError(format!(
                "[timeline].{name} must be a positive number (got {value})"
            )));
        }
    }

    Ok(())
}

/// Reject duplicate ids and negative durations, and canonicalise each task.
///
/// Dangling predecessors and cycles are not load errors; they are reported
/// by recomputation.
fn validate_tasks(tasks: Vec<TaskInput>) -> Result<Vec<TaskInput>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(tasks.len());

    for task in tasks {
        if !seen.insert(task.id.clone()) {
            return Err(ScheduleError::DuplicateId(task.id));
        }
        out.push(task.normalized()?);
    }

    Ok(out)
}

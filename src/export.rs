// src/export.rs

//! CSV export of `list_tasks()`.

use std::io::Write;

use crate::errors::Result;
use crate::store::TaskView;

pub const CSV_HEADER: [&str; 20] = [
    "id",
    "name",
    "phase",
    "status",
    "priority",
    "start_date",
    "duration_days",
    "is_milestone",
    "predecessors",
    "early_start",
    "early_finish",
    "late_start",
    "late_finish",
    "slack",
    "is_on_critical_path",
    "assigned_crew",
    "required_crew",
    "budget",
    "spent",
    "progress",
];

/// Write one header row plus one row per task. Derived columns are empty
/// for tasks that have never been scheduled.
pub fn write_csv<W: Write>(tasks: &[TaskView], mut out: W) -> Result<()> {
    writeln!(out, "{}", CSV_HEADER.join(","))?;

    for view in tasks {
        let t = &view.task;
        let d = view.derived;

        let predecessors = t
            .predecessors
            .iter()
            .map(|p| format!("{}:{}:{}", p.task_id, p.dependency_type, p.lag_days))
            .collect::<Vec<_>>()
            .join(";");

        let row = [
            t.id.clone(),
            t.name.clone(),
            t.phase.clone().unwrap_or_default(),
            t.status.as_str().to_string(),
            t.priority.as_str().to_string(),
            t.start_date.to_string(),
            t.effective_duration().to_string(),
            t.is_milestone.to_string(),
            predecessors,
            d.map(|d| d.early_start.to_string()).unwrap_or_default(),
            d.map(|d| d.early_finish.to_string()).unwrap_or_default(),
            d.map(|d| d.late_start.to_string()).unwrap_or_default(),
            d.map(|d| d.late_finish.to_string()).unwrap_or_default(),
            d.map(|d| d.slack.to_string()).unwrap_or_default(),
            d.map(|d| d.is_on_critical_path.to_string()).unwrap_or_default(),
            t.assigned_crew.to_string(),
            t.required_crew.to_string(),
            t.budget.to_string(),
            t.spent.to_string(),
            t.progress.to_string(),
        ];

        let line = row.iter().map(|f| escape(f)).collect::<Vec<_>>().join(",");
        writeln!(out, "{line}")?;
    }

    out.flush()?;
    Ok(())
}

/// Quote a field if it contains a comma, quote or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render the CSV into a string.
pub fn to_csv_string(tasks: &[TaskView]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(tasks, &mut buf)?;
    String::from_utf8(buf).map_err(|e| anyhow::Error::from(e).into())
}

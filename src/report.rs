// src/report.rs

//! Plain-data report assembled from a store snapshot, plus a text renderer.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::ScheduleWarning;
use crate::phase::{group_by_phase, summarize, PhaseGroup, ScheduleMetrics};
use crate::store::{ScheduleHealth, ScheduleStore, TaskInput, TaskView};
use crate::timeline::{build_layout, DayWidths, Layout, RowMetrics, TimelineWindow};
use crate::types::TaskId;

/// Everything the UI consumes: tasks with derived fields, phase summaries,
/// project metrics, and layout geometry.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub project: String,
    pub anchor_date: Option<NaiveDate>,
    pub health: ScheduleHealth,
    pub project_finish: Option<NaiveDate>,
    pub critical_path: Vec<TaskId>,
    pub warnings: Vec<ScheduleWarning>,
    pub tasks: Vec<TaskView>,
    pub phases: Vec<PhaseGroup>,
    pub summary: ScheduleMetrics,
    pub layout: Layout,
}

impl ScheduleReport {
    pub fn build(
        project: impl Into<String>,
        store: &ScheduleStore,
        window: TimelineWindow,
        widths: &DayWidths,
        rows: RowMetrics,
    ) -> Self {
        let tasks = store.list_tasks();
        let phases = group_by_phase(&tasks);
        let summary = summarize(&tasks);
        let layout = build_layout(&tasks, window, widths, rows);

        Self {
            project: project.into(),
            anchor_date: store.anchor_date(),
            health: store.health().clone(),
            project_finish: store.project_finish(),
            critical_path: store.critical_path().to_vec(),
            warnings: store.warnings().to_vec(),
            tasks,
            phases,
            summary,
            layout,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "ganttdag schedule: {}", self.project)?;
        if let Some(anchor) = self.anchor_date {
            writeln!(out, "  anchor date: {anchor}")?;
        }
        match &self.health {
            ScheduleHealth::Valid => writeln!(out, "  health: valid")?,
            ScheduleHealth::Cyclic { from, to } => writeln!(
                out,
                "  health: INVALID - cyclic dependency closed by '{from}' -> '{to}'"
            )?,
            ScheduleHealth::Failed { reason } => writeln!(out, "  health: INVALID - {reason}")?,
        }
        if let Some(finish) = self.project_finish {
            writeln!(out, "  project finish: {finish}")?;
        }
        if !self.critical_path.is_empty() {
            writeln!(out, "  critical path: {}", self.critical_path.join(" -> "))?;
        }
        for w in self.warnings.iter() {
            writeln!(out, "  warning: {w}")?;
        }
        writeln!(out)?;

        writeln!(out, "tasks ({}):", self.tasks.len())?;
        for view in self.tasks.iter() {
            let t = &view.task;
            let marker = if view.is_on_critical_path() { "*" } else { " " };
            let kind = if t.is_milestone { " [milestone]" } else { "" };
            writeln!(out, " {marker} {} - {}{kind}", t.id, t.name)?;
            match view.derived {
                Some(d) => writeln!(
                    out,
                    "      ES {}  EF {}  LS {}  LF {}  slack {}",
                    d.early_start, d.early_finish, d.late_start, d.late_finish, d.slack
                )?,
                None => writeln!(out, "      (not scheduled)")?,
            }
            let mut flags = Vec::new();
            if view.is_delayed {
                flags.push("delayed");
            }
            if view.is_over_budget {
                flags.push("over budget");
            }
            if view.is_understaffed {
                flags.push("understaffed");
            }
            if !flags.is_empty() {
                writeln!(out, "      flags: {}", flags.join(", "))?;
            }
        }
        writeln!(out)?;

        writeln!(out, "phases ({}):", self.phases.len())?;
        for group in self.phases.iter() {
            let m = &group.metrics;
            writeln!(
                out,
                "  - {}: {} tasks, {:.0}% complete, {:.0}% budget, {} critical",
                group.phase, m.total_tasks, m.completion_percent, m.budget_percent, m.critical_tasks
            )?;
        }
        writeln!(out)?;

        let m = &self.summary;
        writeln!(out, "summary:")?;
        writeln!(
            out,
            "  completion {:.1}% ({}/{})",
            m.completion_percent, m.completed_tasks, m.total_tasks
        )?;
        writeln!(
            out,
            "  budget {:.1}% ({:.2} of {:.2})",
            m.budget_percent, m.spent, m.budget
        )?;
        writeln!(
            out,
            "  crew utilization {:.1}% ({}/{})",
            m.crew_utilization_percent, m.assigned_crew, m.required_crew
        )?;
        writeln!(
            out,
            "  critical {}  delayed {}  milestones {}/{}",
            m.critical_tasks, m.delayed_tasks, m.milestones_completed, m.milestones
        )?;

        Ok(())
    }
}

/// Task listing for `--dry-run`: inputs only, no computation.
pub fn render_dry_run(project: &str, tasks: &[TaskInput]) -> String {
    let mut out = String::new();
    let _ = write_dry_run(&mut out, project, tasks);
    out
}

fn write_dry_run(out: &mut String, project: &str, tasks: &[TaskInput]) -> std::fmt::Result {
    writeln!(out, "ganttdag dry-run: {project}")?;
    writeln!(out)?;
    writeln!(out, "tasks ({}):", tasks.len())?;
    for t in tasks {
        writeln!(out, "  - {} ({})", t.id, t.name)?;
        writeln!(out, "      start: {}", t.start_date)?;
        writeln!(out, "      duration: {}d", t.effective_duration())?;
        if t.is_milestone {
            writeln!(out, "      milestone: true")?;
        }
        if let Some(ref phase) = t.phase {
            writeln!(out, "      phase: {phase}")?;
        }
        if !t.predecessors.is_empty() {
            let preds: Vec<String> = t
                .predecessors
                .iter()
                .map(|p| format!("{} {} {:+}d", p.task_id, p.dependency_type, p.lag_days))
                .collect();
            writeln!(out, "      after: {}", preds.join(", "))?;
        }
    }
    Ok(())
}

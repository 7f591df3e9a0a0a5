// src/phase.rs

//! Read-side phase grouping and summary metrics.
//!
//! Everything here is recomputed on demand from a `list_tasks()` snapshot;
//! nothing is cached between calls.

use chrono::NaiveDate;
use serde::Serialize;

use crate::store::TaskView;
use crate::types::{TaskId, TaskStatus};

/// Bucket for tasks without a phase label.
pub const OTHER_PHASE: &str = "Other";

/// Summary numbers over a set of tasks (a phase or the whole project).
///
/// Percentages are in the range 0-100 and are 0 when the denominator is 0.
/// Milestones count toward task and milestone totals but not toward
/// budget, crew or progress sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleMetrics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_percent: f64,
    /// Mean `progress` of non-milestone tasks.
    pub average_progress: f64,
    pub budget: f64,
    pub spent: f64,
    pub budget_percent: f64,
    pub assigned_crew: u64,
    pub required_crew: u64,
    pub crew_utilization_percent: f64,
    pub critical_tasks: usize,
    pub delayed_tasks: usize,
    pub over_budget_tasks: usize,
    pub understaffed_tasks: usize,
    pub milestones: usize,
    pub milestones_completed: usize,
    /// Earliest displayed start.
    pub start: Option<NaiveDate>,
    /// Latest displayed finish.
    pub finish: Option<NaiveDate>,
}

impl ScheduleMetrics {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a TaskView>) -> Self {
        let mut m = ScheduleMetrics::default();
        let mut work_items = 0usize;
        let mut progress_sum = 0u64;

        for view in tasks {
            let task = &view.task;
            let completed = task.status == TaskStatus::Completed;

            m.total_tasks += 1;
            if completed {
                m.completed_tasks += 1;
            }
            if view.is_on_critical_path() {
                m.critical_tasks += 1;
            }
            if view.is_delayed {
                m.delayed_tasks += 1;
            }
            if view.is_over_budget {
                m.over_budget_tasks += 1;
            }
            if view.is_understaffed {
                m.understaffed_tasks += 1;
            }

            let start = view.display_start();
            let finish = view.display_finish();
            m.start = Some(m.start.map_or(start, |s| s.min(start)));
            m.finish = Some(m.finish.map_or(finish, |f| f.max(finish)));

            if task.is_milestone {
                m.milestones += 1;
                if completed {
                    m.milestones_completed += 1;
                }
                continue;
            }

            work_items += 1;
            progress_sum += u64::from(task.progress);
            m.budget += task.budget;
            m.spent += task.spent;
            m.assigned_crew += u64::from(task.assigned_crew);
            m.required_crew += u64::from(task.required_crew);
        }

        m.completion_percent = percent(m.completed_tasks as f64, m.total_tasks as f64);
        m.average_progress = if work_items == 0 {
            0.0
        } else {
            progress_sum as f64 / work_items as f64
        };
        m.budget_percent = percent(m.spent, m.budget);
        m.crew_utilization_percent = percent(m.assigned_crew as f64, m.required_crew as f64);
        m
    }
}

/// Tasks sharing one phase label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseGroup {
    pub phase: String,
    /// Member ids in display order.
    pub task_ids: Vec<TaskId>,
    pub metrics: ScheduleMetrics,
}

/// Group tasks by phase, in order of first appearance, with the
/// [`OTHER_PHASE`] bucket (if any) last.
pub fn group_by_phase(tasks: &[TaskView]) -> Vec<PhaseGroup> {
    let mut labels: Vec<&str> = Vec::new();
    let mut has_other = false;

    for view in tasks {
        match phase_label(view) {
            Some(label) => {
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
            None => has_other = true,
        }
    }

    let mut groups: Vec<PhaseGroup> = labels
        .into_iter()
        .map(|label| build_group(label, tasks.iter().filter(|v| phase_label(v) == Some(label))))
        .collect();

    if has_other {
        groups.push(build_group(
            OTHER_PHASE,
            tasks.iter().filter(|v| phase_label(v).is_none()),
        ));
    }

    groups
}

/// Project-wide metrics over every task.
pub fn summarize(tasks: &[TaskView]) -> ScheduleMetrics {
    ScheduleMetrics::from_tasks(tasks)
}

fn build_group<'a>(label: &str, members: impl Iterator<Item = &'a TaskView> + Clone) -> PhaseGroup {
    PhaseGroup {
        phase: label.to_string(),
        task_ids: members.clone().map(|v| v.task.id.clone()).collect(),
        metrics: ScheduleMetrics::from_tasks(members),
    }
}

/// Trimmed phase label. Blank labels and an explicit [`OTHER_PHASE`] both
/// land in the catch-all bucket.
fn phase_label(view: &TaskView) -> Option<&str> {
    view.task
        .phase
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != OTHER_PHASE)
}

fn percent(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

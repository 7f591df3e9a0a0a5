// src/store/task.rs

//! Task input model, partial updates, and the merged read-side view.
//!
//! User-editable fields live in [`TaskInput`]. Fields computed by the
//! critical path engine live in [`DerivedFields`] and are only joined with
//! the input in a [`TaskView`] when read.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ScheduleError};
use crate::types::{DependencyType, TaskId, TaskPriority, TaskStatus};

/// Largest accepted `duration_days` and largest accepted `|lag_days|`.
///
/// A thousand years keeps every date a schedule can reach inside
/// `NaiveDate`'s range and every day sum far from `i64` overflow.
pub const MAX_SPAN_DAYS: i64 = 365_250;

/// One incoming dependency edge: `task_id` constrains the owning task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predecessor {
    pub task_id: TaskId,
    #[serde(rename = "type", default)]
    pub dependency_type: DependencyType,
    /// Positive = delay, negative = overlap (lead).
    #[serde(default)]
    pub lag_days: i64,
}

impl Predecessor {
    pub fn new(task_id: impl Into<TaskId>, dependency_type: DependencyType, lag_days: i64) -> Self {
        Self {
            task_id: task_id.into(),
            dependency_type,
            lag_days,
        }
    }

    /// Finish-to-start with no lag.
    pub fn finish_to_start(task_id: impl Into<TaskId>) -> Self {
        Self::new(task_id, DependencyType::FinishToStart, 0)
    }
}

/// User-editable fields of a schedulable unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    pub id: TaskId,
    pub name: String,
    #[serde(default)]
    pub project_id: Option<String>,
    /// Planned (baseline) start.
    pub start_date: NaiveDate,
    /// Signed at the boundary so negative input can be rejected.
    #[serde(default)]
    pub duration_days: i64,
    #[serde(default)]
    pub predecessors: Vec<Predecessor>,
    #[serde(default)]
    pub is_milestone: bool,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    /// Percent complete, 0-100.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub assigned_crew: u32,
    #[serde(default)]
    pub required_crew: u32,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub actual_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub actual_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TaskInput {
    pub fn new(
        id: impl Into<TaskId>,
        name: impl Into<String>,
        start_date: NaiveDate,
        duration_days: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            project_id: None,
            start_date,
            duration_days,
            predecessors: Vec::new(),
            is_milestone: false,
            phase: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            progress: 0,
            assigned_crew: 0,
            required_crew: 0,
            budget: 0.0,
            spent: 0.0,
            actual_start_date: None,
            actual_end_date: None,
            notes: None,
        }
    }

    /// Duration used for scheduling: always 0 for milestones.
    pub fn effective_duration(&self) -> i64 {
        if self.is_milestone {
            0
        } else {
            self.duration_days.max(0)
        }
    }

    /// Baseline finish: `start_date + effective_duration`.
    pub fn planned_finish(&self) -> NaiveDate {
        TimeDelta::try_days(self.effective_duration())
            .and_then(|d| self.start_date.checked_add_signed(d))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn depends_on(&self, other: &str) -> bool {
        self.predecessors.iter().any(|p| p.task_id == other)
    }

    /// Validate and canonicalise a task before it enters the store.
    ///
    /// - negative duration on a non-milestone, or one above
    ///   [`MAX_SPAN_DAYS`] -> `InvalidDuration`
    /// - a lag outside `-MAX_SPAN_DAYS..=MAX_SPAN_DAYS` -> `InvalidLag`
    /// - milestones are coerced to duration 0
    /// - progress is clamped to 100
    /// - exact duplicate predecessor edges are collapsed (first one wins)
    pub fn normalized(mut self) -> Result<Self> {
        let bad_duration = self.duration_days < 0 || self.duration_days > MAX_SPAN_DAYS;
        if !self.is_milestone && bad_duration {
            return Err(ScheduleError::InvalidDuration {
                task: self.id,
                duration: self.duration_days,
            });
        }
        if self.is_milestone {
            self.duration_days = 0;
        }
        self.progress = self.progress.min(100);

        if let Some(pred) = self
            .predecessors
            .iter()
            .find(|p| !(-MAX_SPAN_DAYS..=MAX_SPAN_DAYS).contains(&p.lag_days))
        {
            return Err(ScheduleError::InvalidLag {
                task: self.id.clone(),
                predecessor: pred.task_id.clone(),
                lag_days: pred.lag_days,
            });
        }

        let mut seen: Vec<Predecessor> = Vec::with_capacity(self.predecessors.len());
        for pred in self.predecessors.drain(..) {
            if !seen.contains(&pred) {
                seen.push(pred);
            }
        }
        self.predecessors = seen;

        Ok(self)
    }
}

/// Partial update for [`crate::store::ScheduleStore::update_task`].
///
/// `None` leaves the field untouched. For optional fields the inner
/// `Option` is the new value (so `Some(None)` clears it).
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub duration_days: Option<i64>,
    pub predecessors: Option<Vec<Predecessor>>,
    pub is_milestone: Option<bool>,
    pub phase: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub progress: Option<u8>,
    pub assigned_crew: Option<u32>,
    pub required_crew: Option<u32>,
    pub budget: Option<f64>,
    pub spent: Option<f64>,
    pub actual_start_date: Option<Option<NaiveDate>>,
    pub actual_end_date: Option<Option<NaiveDate>>,
    pub notes: Option<Option<String>>,
}

impl TaskPatch {
    /// Whether applying this patch can change the computed schedule.
    pub fn is_structural(&self) -> bool {
        self.start_date.is_some()
            || self.duration_days.is_some()
            || self.predecessors.is_some()
            || self.is_milestone.is_some()
    }

    /// Return a copy of `task` with this patch applied. The id never changes.
    pub fn apply(&self, task: &TaskInput) -> TaskInput {
        let mut out = task.clone();
        if let Some(ref v) = self.name {
            out.name = v.clone();
        }
        if let Some(v) = self.start_date {
            out.start_date = v;
        }
        if let Some(v) = self.duration_days {
            out.duration_days = v;
        }
        if let Some(ref v) = self.predecessors {
            out.predecessors = v.clone();
        }
        if let Some(v) = self.is_milestone {
            out.is_milestone = v;
        }
        if let Some(ref v) = self.phase {
            out.phase = v.clone();
        }
        if let Some(v) = self.status {
            out.status = v;
        }
        if let Some(v) = self.priority {
            out.priority = v;
        }
        if let Some(v) = self.progress {
            out.progress = v;
        }
        if let Some(v) = self.assigned_crew {
            out.assigned_crew = v;
        }
        if let Some(v) = self.required_crew {
            out.required_crew = v;
        }
        if let Some(v) = self.budget {
            out.budget = v;
        }
        if let Some(v) = self.spent {
            out.spent = v;
        }
        if let Some(v) = self.actual_start_date {
            out.actual_start_date = v;
        }
        if let Some(v) = self.actual_end_date {
            out.actual_end_date = v;
        }
        if let Some(ref v) = self.notes {
            out.notes = v.clone();
        }
        out
    }
}

/// Values computed by the critical path engine for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedFields {
    pub early_start: NaiveDate,
    pub early_finish: NaiveDate,
    pub late_start: NaiveDate,
    pub late_finish: NaiveDate,
    /// `late_start - early_start`, in whole days.
    pub slack: i64,
    pub is_on_critical_path: bool,
}

/// Read-side merge of a task's input with its last computed derived fields.
///
/// `derived` is `None` for tasks that have never been part of a successful
/// recomputation (e.g. added while the graph contains a cycle).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: TaskInput,
    #[serde(flatten)]
    pub derived: Option<DerivedFields>,
    pub is_delayed: bool,
    pub is_over_budget: bool,
    pub is_understaffed: bool,
}

impl TaskView {
    pub fn new(task: TaskInput, derived: Option<DerivedFields>) -> Self {
        let is_delayed = is_delayed(&task, derived.as_ref());
        let is_over_budget = is_over_budget(&task);
        let is_understaffed = !task.is_milestone && task.assigned_crew < task.required_crew;
        Self {
            task,
            derived,
            is_delayed,
            is_over_budget,
            is_understaffed,
        }
    }

    pub fn id(&self) -> &str {
        &self.task.id
    }

    /// Start used for display: computed early start if available.
    pub fn display_start(&self) -> NaiveDate {
        self.derived
            .map(|d| d.early_start)
            .unwrap_or(self.task.start_date)
    }

    /// Finish used for display: computed early finish if available.
    pub fn display_finish(&self) -> NaiveDate {
        self.derived
            .map(|d| d.early_finish)
            .unwrap_or_else(|| self.task.planned_finish())
    }

    pub fn is_on_critical_path(&self) -> bool {
        self.derived.is_some_and(|d| d.is_on_critical_path)
    }

    pub fn slack(&self) -> Option<i64> {
        self.derived.map(|d| d.slack)
    }
}

/// A task is delayed when it is not completed and either the user marked it
/// delayed or the computed finish slipped past its baseline finish.
pub fn is_delayed(task: &TaskInput, derived: Option<&DerivedFields>) -> bool {
    if task.status == TaskStatus::Completed {
        return false;
    }
    if task.status == TaskStatus::Delayed {
        return true;
    }
    derived.is_some_and(|d| d.early_finish > task.planned_finish())
}

/// Spent share of budget ahead of progress share. Milestones and tasks
/// without a budget are never over budget.
fn is_over_budget(task: &TaskInput) -> bool {
    if task.is_milestone || task.budget <= 0.0 {
        return false;
    }
    task.spent / task.budget > f64::from(task.progress) / 100.0
}

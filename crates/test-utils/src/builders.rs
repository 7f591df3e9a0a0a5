#![allow(dead_code)]

use chrono::NaiveDate;
use ganttdag::config::{ProjectSection, RawScheduleFile, ScheduleFile, TimelineSection};
use ganttdag::store::{Predecessor, TaskInput};
use ganttdag::types::{DependencyType, Granularity, TaskPriority, TaskStatus};

use crate::date;

/// Builder for `TaskInput` to simplify test setup.
pub struct TaskBuilder {
    task: TaskInput,
}

impl TaskBuilder {
    /// Task starting 2024-05-01 with the given duration.
    pub fn new(id: &str, duration_days: i64) -> Self {
        Self {
            task: TaskInput::new(id, format!("Task {id}"), date("2024-05-01"), duration_days),
        }
    }

    pub fn milestone(id: &str) -> Self {
        let mut b = Self::new(id, 0);
        b.task.is_milestone = true;
        b
    }

    pub fn name(mut self, name: &str) -> Self {
        self.task.name = name.to_string();
        self
    }

    pub fn start(mut self, start: &str) -> Self {
        self.task.start_date = date(start);
        self
    }

    pub fn start_date(mut self, start: NaiveDate) -> Self {
        self.task.start_date = start;
        self
    }

    pub fn duration(mut self, days: i64) -> Self {
        self.task.duration_days = days;
        self
    }

    pub fn is_milestone(mut self, val: bool) -> Self {
        self.task.is_milestone = val;
        self
    }

    /// Finish-to-start dependency with no lag.
    pub fn after(self, pred: &str) -> Self {
        self.depends_on(pred, DependencyType::FinishToStart, 0)
    }

    pub fn depends_on(mut self, pred: &str, kind: DependencyType, lag_days: i64) -> Self {
        self.task
            .predecessors
            .push(Predecessor::new(pred, kind, lag_days));
        self
    }

    pub fn phase(mut self, phase: &str) -> Self {
        self.task.phase = Some(phase.to_string());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.task.priority = priority;
        self
    }

    pub fn progress(mut self, progress: u8) -> Self {
        self.task.progress = progress;
        self
    }

    pub fn crew(mut self, assigned: u32, required: u32) -> Self {
        self.task.assigned_crew = assigned;
        self.task.required_crew = required;
        self
    }

    pub fn budget(mut self, budget: f64, spent: f64) -> Self {
        self.task.budget = budget;
        self.task.spent = spent;
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.task.notes = Some(notes.to_string());
        self
    }

    pub fn build(self) -> TaskInput {
        self.task
    }
}

/// Builder for `ScheduleFile`.
pub struct ScheduleFileBuilder {
    raw: RawScheduleFile,
}

impl ScheduleFileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawScheduleFile {
                project: ProjectSection::default(),
                timeline: TimelineSection::default(),
                task: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.raw.project.name = name.to_string();
        self
    }

    pub fn anchor(mut self, anchor: &str) -> Self {
        self.raw.project.anchor_date = Some(date(anchor));
        self
    }

    pub fn granularity(mut self, g: Granularity) -> Self {
        self.raw.timeline.granularity = g;
        self
    }

    pub fn with_task(mut self, task: TaskInput) -> Self {
        self.raw.task.push(task);
        self
    }

    pub fn build_raw(self) -> RawScheduleFile {
        self.raw
    }

    pub fn build(self) -> ScheduleFile {
        ScheduleFile::try_from(self.raw).expect("Failed to build valid schedule from builder")
    }
}

impl Default for ScheduleFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

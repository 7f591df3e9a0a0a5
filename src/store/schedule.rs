// src/store/schedule.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::dag::critical_path;
use crate::errors::{Result, ScheduleError, ScheduleWarning};
use crate::store::task::{DerivedFields, TaskInput, TaskPatch, TaskView};
use crate::types::TaskId;

/// Validity of the derived fields currently held by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScheduleHealth {
    /// The last recomputation succeeded.
    #[default]
    Valid,
    /// The last recomputation hit a cycle; derived fields are from the last
    /// valid pass.
    Cyclic { from: TaskId, to: TaskId },
    /// The last recomputation failed for another reason.
    Failed { reason: String },
}

/// Authoritative in-memory task collection plus its derived-results table.
///
/// Insertion order is preserved and used as the display order. Every
/// structural mutation triggers a full recomputation; a failed pass leaves the
/// previous derived table in place and is reported via [`Self::health`].
///
/// The store is plain data with no interior mutability. A multi-threaded
/// host must guard it with a single writer lock, since recomputation needs a
/// consistent snapshot of every predecessor edge.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    tasks: Vec<TaskInput>,
    index: HashMap<TaskId, usize>,
    derived: HashMap<TaskId, DerivedFields>,
    anchor_date: Option<NaiveDate>,
    health: ScheduleHealth,
    warnings: Vec<ScheduleWarning>,
    project_finish: Option<NaiveDate>,
    critical_path: Vec<TaskId>,
}

impl ScheduleStore {
    pub fn new(anchor_date: Option<NaiveDate>) -> Self {
        Self {
            anchor_date,
            ..Default::default()
        }
    }

    /// Load an ordered task list and compute once.
    ///
    /// Structural errors (`DuplicateId`, `InvalidDuration`) fail the load.
    /// A cycle does not: it is recorded in [`Self::health`].
    pub fn from_tasks(
        tasks: impl IntoIterator<Item = TaskInput>,
        anchor_date: Option<NaiveDate>,
    ) -> Result<Self> {
        let mut store = Self::new(anchor_date);
        for task in tasks {
            store.insert(task)?;
        }
        store.refresh();
        Ok(store)
    }

    pub fn anchor_date(&self) -> Option<NaiveDate> {
        self.anchor_date
    }

    pub fn set_anchor_date(&mut self, anchor_date: Option<NaiveDate>) {
        self.anchor_date = anchor_date;
        self.refresh();
    }

    /// Add a new task and recompute.
    pub fn add_task(&mut self, task: TaskInput) -> Result<()> {
        self.insert(task)?;
        self.refresh();
        Ok(())
    }

    /// Apply a partial update. Only structural changes trigger recomputation.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<()> {
        let pos = self.position(id)?;
        let updated = patch.apply(&self.tasks[pos]).normalized()?;
        self.tasks[pos] = updated;

        if patch.is_structural() {
            debug!(task = %id, "structural update; recomputing");
            self.refresh();
        }
        Ok(())
    }

    /// Remove a task, strip it from every predecessor list, and recompute.
    pub fn remove_task(&mut self, id: &str) -> Result<TaskInput> {
        let pos = self.position(id)?;
        let removed = self.tasks.remove(pos);

        for task in self.tasks.iter_mut() {
            task.predecessors.retain(|p| p.task_id != removed.id);
        }
        self.derived.remove(&removed.id);
        self.rebuild_index();

        info!(task = %removed.id, "task removed");
        self.refresh();
        Ok(removed)
    }

    pub fn get_task(&self, id: &str) -> Option<TaskView> {
        let pos = *self.index.get(id)?;
        Some(self.view_of(&self.tasks[pos]))
    }

    /// All tasks in insertion order, with derived fields merged in.
    pub fn list_tasks(&self) -> Vec<TaskView> {
        self.tasks.iter().map(|t| self.view_of(t)).collect()
    }

    /// Raw input records, in insertion order.
    pub fn inputs(&self) -> &[TaskInput] {
        &self.tasks
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Recompute every derived field from the current inputs.
    ///
    /// On failure the previous derived table is kept and the error is both
    /// returned and recorded in [`Self::health`].
    pub fn recompute(&mut self) -> Result<()> {
        match critical_path::compute(&self.tasks, self.anchor_date) {
            Ok(outcome) => {
                self.derived = outcome.derived;
                self.project_finish = outcome.project_finish;
                self.critical_path = outcome.critical_path;
                self.warnings = outcome.warnings;
                self.health = ScheduleHealth::Valid;
                Ok(())
            }
            Err(ScheduleError::CyclicDependency { from, to }) => {
                warn!(
                    from = %from,
                    to = %to,
                    "cyclic dependency; keeping previous derived schedule"
                );
                self.health = ScheduleHealth::Cyclic {
                    from: from.clone(),
                    to: to.clone(),
                };
                Err(ScheduleError::CyclicDependency { from, to })
            }
            Err(e) => {
                warn!(error = %e, "recomputation failed; keeping previous derived schedule");
                self.health = ScheduleHealth::Failed {
                    reason: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// State of the last recomputation, independent of whether the last
    /// mutation call succeeded.
    pub fn health(&self) -> &ScheduleHealth {
        &self.health
    }

    pub fn is_valid(&self) -> bool {
        self.health == ScheduleHealth::Valid
    }

    /// Dangling predecessor references seen by the last successful pass.
    pub fn warnings(&self) -> &[ScheduleWarning] {
        &self.warnings
    }

    /// Strict variant of [`Self::warnings`]: the first dangling reference of
    /// the last successful pass, as an error.
    pub fn ensure_no_dangling(&self) -> Result<()> {
        match self.warnings.first() {
            Some(w) => Err(w.clone().into()),
            None => Ok(()),
        }
    }

    pub fn project_finish(&self) -> Option<NaiveDate> {
        self.project_finish
    }

    /// Zero-slack task ids from the last successful pass, in dependency order.
    pub fn critical_path(&self) -> &[TaskId] {
        &self.critical_path
    }

    fn insert(&mut self, task: TaskInput) -> Result<()> {
        if self.index.contains_key(&task.id) {
            return Err(ScheduleError::DuplicateId(task.id));
        }
        let task = task.normalized()?;
        debug!(task = %task.id, "task added");
        self.index.insert(task.id.clone(), self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    /// Recompute after a mutation. The mutation itself already succeeded, so
    /// a failed pass is only recorded in `health`.
    fn refresh(&mut self) {
        let _ = self.recompute();
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| ScheduleError::NotFound(id.to_string()))
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();
    }

    fn view_of(&self, task: &TaskInput) -> TaskView {
        TaskView::new(task.clone(), self.derived.get(&task.id).copied())
    }
}

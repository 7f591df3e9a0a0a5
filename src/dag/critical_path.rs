// src/dag/critical_path.rs

//! Critical path method over the task dependency DAG.
//!
//! [`compute`] is a pure function: a task snapshot goes in, a table of
//! derived fields comes out. Nothing here mutates the caller's tasks, so the
//! store can keep its previous results when a pass fails.
//!
//! Dates are handled as whole-day numbers internally.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::dag::graph::{Edge, TaskGraph};
use crate::errors::{Result, ScheduleError, ScheduleWarning};
use crate::store::{DerivedFields, TaskInput};
use crate::types::{DependencyType, TaskId};

/// Result of one successful recomputation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriticalPathOutcome {
    /// Derived fields for every task in the snapshot.
    pub derived: HashMap<TaskId, DerivedFields>,
    /// Latest early finish over tasks without successors.
    pub project_finish: Option<NaiveDate>,
    /// Zero-slack tasks, in dependency order.
    pub critical_path: Vec<TaskId>,
    /// Edges dropped from the pass.
    pub warnings: Vec<ScheduleWarning>,
}

#[derive(Debug, Clone, Copy)]
struct Span {
    start: i64,
    finish: i64,
}

/// Run the forward and backward passes over `tasks`.
///
/// - Tasks never start before their own `start_date`, nor before
///   `anchor_date` when one is given.
/// - Predecessors referencing unknown ids are skipped and reported in
///   `warnings`.
/// - A cycle fails the whole pass with `CyclicDependency`.
pub fn compute(tasks: &[TaskInput], anchor_date: Option<NaiveDate>) -> Result<CriticalPathOutcome> {
    let graph = TaskGraph::from_tasks(tasks);
    let order = graph.topological_order()?;

    let by_id: HashMap<&str, &TaskInput> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
    let anchor = anchor_date.map(day_number);

    // Forward pass.
    let mut early: HashMap<&str, Span> = HashMap::with_capacity(order.len());
    for &id in order.iter() {
        let task = by_id[id];
        let duration = task.effective_duration();

        let mut start = day_number(task.start_date);
        if let Some(anchor) = anchor {
            start = start.max(anchor);
        }

        for edge in graph.incoming_edges(id) {
            let pred = early[edge.from];
            let bound = forward_constraint(edge, pred, duration).ok_or_else(|| overflow(id))?;
            start = start.max(bound);
        }

        let finish = start.checked_add(duration).ok_or_else(|| overflow(id))?;
        early.insert(id, Span { start, finish });
    }

    let project_finish = order
        .iter()
        .filter(|id| !graph.has_successors(id))
        .map(|id| early[*id].finish)
        .max();

    // Backward pass.
    let mut late: HashMap<&str, Span> = HashMap::with_capacity(order.len());
    for &id in order.iter().rev() {
        let duration = by_id[id].effective_duration();

        let mut finish: Option<i64> = None;
        for edge in graph.outgoing_edges(id) {
            let bound =
                backward_constraint(edge, late[edge.to], duration).ok_or_else(|| overflow(id))?;
            finish = Some(finish.map_or(bound, |f| f.min(bound)));
        }
        let finish = finish.or(project_finish).unwrap_or(early[id].finish);
        let start = finish.checked_sub(duration).ok_or_else(|| overflow(id))?;

        late.insert(id, Span { start, finish });
    }

    let mut derived = HashMap::with_capacity(order.len());
    let mut critical_path = Vec::new();

    for &id in order.iter() {
        let e = early[id];
        let l = late[id];
        let slack = l.start.checked_sub(e.start).ok_or_else(|| overflow(id))?;

        let fields = DerivedFields {
            early_start: from_day_number(e.start)?,
            early_finish: from_day_number(e.finish)?,
            late_start: from_day_number(l.start)?,
            late_finish: from_day_number(l.finish)?,
            slack,
            is_on_critical_path: slack == 0,
        };

        if fields.is_on_critical_path {
            critical_path.push(id.to_string());
        }
        derived.insert(id.to_string(), fields);
    }

    debug!(
        tasks = graph.node_count(),
        edges = graph.edges().len(),
        critical = critical_path.len(),
        dangling = graph.warnings().len(),
        "critical path: recomputation complete"
    );

    Ok(CriticalPathOutcome {
        derived,
        project_finish: project_finish.map(from_day_number).transpose()?,
        critical_path,
        warnings: graph.warnings().to_vec(),
    })
}

/// Earliest start of the successor implied by one incoming edge.
fn forward_constraint(edge: &Edge<'_>, pred: Span, duration: i64) -> Option<i64> {
    let lag = edge.lag_days;
    match edge.kind {
        DependencyType::FinishToStart => pred.finish.checked_add(lag),
        DependencyType::FinishToFinish => pred.finish.checked_add(lag)?.checked_sub(duration),
        DependencyType::StartToStart => pred.start.checked_add(lag),
        DependencyType::StartToFinish => pred.start.checked_add(lag)?.checked_sub(duration),
    }
}

/// Latest finish of the predecessor implied by one outgoing edge.
fn backward_constraint(edge: &Edge<'_>, succ: Span, duration: i64) -> Option<i64> {
    let lag = edge.lag_days;
    match edge.kind {
        DependencyType::FinishToStart => succ.start.checked_sub(lag),
        DependencyType::FinishToFinish => succ.finish.checked_sub(lag),
        DependencyType::StartToStart => succ.start.checked_sub(lag)?.checked_add(duration),
        DependencyType::StartToFinish => succ.finish.checked_sub(lag)?.checked_add(duration),
    }
}

fn overflow(task: &str) -> ScheduleError {
    ScheduleError::DateOutOfRange(format!("day arithmetic overflowed at task '{task}'"))
}

fn day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce())
}

fn from_day_number(n: i64) -> Result<NaiveDate> {
    i32::try_from(n)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| ScheduleError::DateOutOfRange(format!("day number {n}")))
}

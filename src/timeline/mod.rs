// src/timeline/mod.rs

//! Timeline layout for the Gantt view.
//!
//! - [`geometry`] maps dates to x offsets and computes bars and connectors.
//! - [`window`] holds the visible date window and its prev/next/today moves.
//!
//! [`build_layout`] ties both together for a full task list.

pub mod geometry;
pub mod window;

use std::collections::HashMap;

use serde::Serialize;

use crate::store::TaskView;
use crate::types::{DependencyType, TaskId};

pub use geometry::{
    connector_path, date_to_offset, task_bar_geometry, BarGeometry, DayWidths, Point, RowMetrics,
    TimelineScale,
};
pub use window::{Tick, TimelineWindow};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskBar {
    pub task_id: TaskId,
    pub row: usize,
    #[serde(flatten)]
    pub geometry: BarGeometry,
    pub is_on_critical_path: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    pub from: TaskId,
    pub to: TaskId,
    pub kind: DependencyType,
    pub points: Vec<Point>,
}

/// Bars, connectors and column headers for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub window: TimelineWindow,
    pub unit_width: f64,
    pub ticks: Vec<Tick>,
    pub bars: Vec<TaskBar>,
    pub connectors: Vec<Connector>,
}

/// Lay out `tasks` in the given order (row = position in the slice).
///
/// Connectors are produced for every predecessor edge whose both ends are
/// present; dangling references are skipped.
pub fn build_layout(
    tasks: &[TaskView],
    window: TimelineWindow,
    widths: &DayWidths,
    rows: RowMetrics,
) -> Layout {
    let unit_width = widths.for_granularity(window.granularity);
    let scale = TimelineScale {
        range_start: window.range_start,
        unit_width,
        rows,
    };

    let row_of: HashMap<&str, usize> = tasks
        .iter()
        .enumerate()
        .map(|(row, view)| (view.id(), row))
        .collect();
    let row_index_of = |id: &str| row_of.get(id).copied();

    let bars = tasks
        .iter()
        .enumerate()
        .map(|(row, view)| TaskBar {
            task_id: view.task.id.clone(),
            row,
            geometry: scale.bar(view),
            is_on_critical_path: view.is_on_critical_path(),
        })
        .collect();

    let mut connectors = Vec::new();
    for to in tasks {
        for pred in to.task.predecessors.iter() {
            let Some(&from_row) = row_of.get(pred.task_id.as_str()) else {
                continue;
            };
            let from = &tasks[from_row];
            if let Some(points) = connector_path(from, to, row_index_of, &scale) {
                connectors.push(Connector {
                    from: from.task.id.clone(),
                    to: to.task.id.clone(),
                    kind: pred.dependency_type,
                    points,
                });
            }
        }
    }

    Layout {
        window,
        unit_width,
        ticks: window.ticks(unit_width),
        bars,
        connectors,
    }
}

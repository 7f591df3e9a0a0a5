// src/timeline/geometry.rs

//! Date-to-pixel mapping, bar geometry and connector routing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::TaskView;
use crate::types::Granularity;

/// Horizontal run of a connector before it turns toward the successor row.
pub const ELBOW_STUB: f64 = 12.0;

/// Per-day pixel width for each granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayWidths {
    #[serde(default = "default_day_width")]
    pub day: f64,
    #[serde(default = "default_week_width")]
    pub week: f64,
    #[serde(default = "default_month_width")]
    pub month: f64,
    #[serde(default = "default_quarter_width")]
    pub quarter: f64,
}

fn default_day_width() -> f64 {
    80.0
}

fn default_week_width() -> f64 {
    60.0
}

fn default_month_width() -> f64 {
    20.0
}

fn default_quarter_width() -> f64 {
    8.0
}

impl Default for DayWidths {
    fn default() -> Self {
        Self {
            day: default_day_width(),
            week: default_week_width(),
            month: default_month_width(),
            quarter: default_quarter_width(),
        }
    }
}

impl DayWidths {
    pub fn for_granularity(&self, granularity: Granularity) -> f64 {
        match granularity {
            Granularity::Day => self.day,
            Granularity::Week => self.week,
            Granularity::Month => self.month,
            Granularity::Quarter => self.quarter,
        }
    }
}

/// Vertical layout of task rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowMetrics {
    pub row_height: f64,
    pub header_height: f64,
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self {
            row_height: 60.0,
            header_height: 40.0,
        }
    }
}

impl RowMetrics {
    /// Vertical center of the given row.
    pub fn row_center_y(&self, row: usize) -> f64 {
        self.header_height + row as f64 * self.row_height + self.row_height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal extent of a task bar. Milestones have `width == 0` and are
/// drawn as a marker at `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarGeometry {
    pub x: f64,
    pub width: f64,
    pub is_milestone: bool,
}

impl BarGeometry {
    pub fn end_x(&self) -> f64 {
        self.x + self.width
    }
}

/// Linear offset of `date` from `range_start`; negative before the range.
pub fn date_to_offset(date: NaiveDate, range_start: NaiveDate, unit_width: f64) -> f64 {
    (date - range_start).num_days() as f64 * unit_width
}

/// Bar for a task, positioned at its computed early start when available.
pub fn task_bar_geometry(task: &TaskView, range_start: NaiveDate, unit_width: f64) -> BarGeometry {
    let x = date_to_offset(task.display_start(), range_start, unit_width);
    let width = if task.task.is_milestone {
        0.0
    } else {
        task.task.effective_duration() as f64 * unit_width
    };
    BarGeometry {
        x,
        width,
        is_milestone: task.task.is_milestone,
    }
}

/// Everything needed to turn tasks into coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineScale {
    pub range_start: NaiveDate,
    pub unit_width: f64,
    pub rows: RowMetrics,
}

impl TimelineScale {
    pub fn offset(&self, date: NaiveDate) -> f64 {
        date_to_offset(date, self.range_start, self.unit_width)
    }

    pub fn bar(&self, task: &TaskView) -> BarGeometry {
        task_bar_geometry(task, self.range_start, self.unit_width)
    }
}

/// Elbow connector from the predecessor's finish to the successor's start:
/// out horizontally, down/up to the successor row, then into its start.
///
/// Returns `None` when either task has no row.
pub fn connector_path(
    from: &TaskView,
    to: &TaskView,
    row_index_of: impl Fn(&str) -> Option<usize>,
    scale: &TimelineScale,
) -> Option<Vec<Point>> {
    let from_row = row_index_of(from.id())?;
    let to_row = row_index_of(to.id())?;

    let from_x = scale.bar(from).end_x();
    let to_x = scale.bar(to).x;
    let from_y = scale.rows.row_center_y(from_row);
    let to_y = scale.rows.row_center_y(to_row);
    let elbow_x = from_x + ELBOW_STUB;

    Some(vec![
        Point::new(from_x, from_y),
        Point::new(elbow_x, from_y),
        Point::new(elbow_x, to_y),
        Point::new(to_x, to_y),
    ])
}

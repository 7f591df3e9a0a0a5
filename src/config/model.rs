// src/config/model.rs

use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::Result;
use crate::store::{ScheduleStore, TaskInput};
use crate::timeline::{DayWidths, RowMetrics, TimelineWindow};
use crate::types::Granularity;

/// Schedule file exactly as read from TOML, before validation.
///
/// ```toml
/// [project]
/// name = "Eaglewood Retail"
/// anchor_date = "2024-05-01"
///
/// [timeline]
/// granularity = "week"
///
/// [[task]]
/// id = "A"
/// name = "Excavation"
/// start_date = "2024-05-01"
/// duration_days = 10
///
/// [[task]]
/// id = "B"
/// name = "Footings"
/// start_date = "2024-05-01"
/// duration_days = 5
/// predecessors = [{ task_id = "A", type = "FS", lag_days = 0 }]
/// ```
///
/// Tasks keep their file order, which becomes the display order.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScheduleFile {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub timeline: TimelineSection,

    /// All `[[task]]` entries.
    #[serde(default)]
    pub task: Vec<TaskInput>,
}

/// Validated schedule file. Build it with `ScheduleFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ScheduleFile {
    pub project: ProjectSection,
    pub timeline: TimelineSection,
    pub task: Vec<TaskInput>,
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    #[serde(default = "default_project_name")]
    pub name: String,

    /// No task is scheduled before this date.
    #[serde(default)]
    pub anchor_date: Option<NaiveDate>,
}

fn default_project_name() -> String {
    "Untitled Project".to_string()
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            anchor_date: None,
        }
    }
}

/// `[timeline]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineSection {
    #[serde(default)]
    pub granularity: Granularity,

    /// First visible day; falls back to the anchor date, then the earliest
    /// task start.
    #[serde(default)]
    pub range_start: Option<NaiveDate>,

    #[serde(default = "default_days_to_show")]
    pub days_to_show: u32,

    #[serde(default = "default_row_height")]
    pub row_height: f64,

    #[serde(default = "default_header_height")]
    pub header_height: f64,

    #[serde(default)]
    pub day_width: DayWidths,
}

fn default_days_to_show() -> u32 {
    crate::timeline::window::DEFAULT_DAYS_TO_SHOW
}

fn default_row_height() -> f64 {
    RowMetrics::default().row_height
}

fn default_header_height() -> f64 {
    RowMetrics::default().header_height
}

impl Default for TimelineSection {
    fn default() -> Self {
        Self {
            granularity: Granularity::default(),
            range_start: None,
            days_to_show: default_days_to_show(),
            row_height: default_row_height(),
            header_height: default_header_height(),
            day_width: DayWidths::default(),
        }
    }
}

impl ScheduleFile {
    /// Construct without validation. Prefer `ScheduleFile::try_from`.
    pub fn new_unchecked(
        project: ProjectSection,
        timeline: TimelineSection,
        task: Vec<TaskInput>,
    ) -> Self {
        Self {
            project,
            timeline,
            task,
        }
    }

    /// Load the tasks into a store and run the first recomputation.
    pub fn to_store(&self) -> Result<ScheduleStore> {
        ScheduleStore::from_tasks(self.task.iter().cloned(), self.project.anchor_date)
    }

    pub fn row_metrics(&self) -> RowMetrics {
        RowMetrics {
            row_height: self.timeline.row_height,
            header_height: self.timeline.header_height,
        }
    }

    /// Initial visible window.
    pub fn window(&self) -> TimelineWindow {
        let range_start = self
            .timeline
            .range_start
            .or(self.project.anchor_date)
            .or_else(|| self.task.iter().map(|t| t.start_date).min())
            .unwrap_or_default();

        TimelineWindow::new(
            range_start,
            self.timeline.granularity,
            self.timeline.days_to_show,
        )
    }
}

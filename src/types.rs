use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical task identifier type used throughout the crate.
pub type TaskId = String;

/// How a predecessor constrains its successor.
///
/// Each variant names which end of the predecessor drives which end of the
/// successor; the edge's `lag_days` is added on top (negative = lead).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyType {
    /// Successor starts after predecessor finishes.
    #[serde(rename = "FS", alias = "finish-to-start")]
    FinishToStart,
    /// Successor finishes after predecessor finishes.
    #[serde(rename = "FF", alias = "finish-to-finish")]
    FinishToFinish,
    /// Successor starts after predecessor starts.
    #[serde(rename = "SS", alias = "start-to-start")]
    StartToStart,
    /// Successor finishes after predecessor starts.
    #[serde(rename = "SF", alias = "start-to-finish")]
    StartToFinish,
}

impl Default for DependencyType {
    fn default() -> Self {
        DependencyType::FinishToStart
    }
}

impl DependencyType {
    pub fn code(self) -> &'static str {
        match self {
            DependencyType::FinishToStart => "FS",
            DependencyType::FinishToFinish => "FF",
            DependencyType::StartToStart => "SS",
            DependencyType::StartToFinish => "SF",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DependencyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FS" | "FINISH-TO-START" => Ok(DependencyType::FinishToStart),
            "FF" | "FINISH-TO-FINISH" => Ok(DependencyType::FinishToFinish),
            "SS" | "START-TO-START" => Ok(DependencyType::StartToStart),
            "SF" | "START-TO-FINISH" => Ok(DependencyType::StartToFinish),
            other => Err(format!(
                "invalid dependency type: {other} (expected FS, FF, SS or SF)"
            )),
        }
    }
}

/// User-set progress status of a task.
///
/// Independent from the computed schedule; the engine only reads it to
/// decide delay flags and summary counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[serde(alias = "NOT_STARTED")]
    NotStarted,
    #[serde(alias = "IN_PROGRESS")]
    InProgress,
    #[serde(alias = "DELAYED")]
    Delayed,
    #[serde(alias = "COMPLETED")]
    Completed,
    #[serde(alias = "ON_HOLD")]
    OnHold,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::NotStarted
    }
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not_started",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Delayed => "delayed",
            TaskStatus::Completed => "completed",
            TaskStatus::OnHold => "on_hold",
        }
    }
}

/// Informational priority; never used by the critical path computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    #[serde(alias = "LOW")]
    Low,
    #[serde(alias = "MEDIUM")]
    Medium,
    #[serde(alias = "HIGH")]
    High,
    #[serde(alias = "CRITICAL")]
    Critical,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Critical => "critical",
        }
    }
}

/// Zoom level of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Week
    }
}

impl Granularity {
    /// Number of days the window moves on prev/next.
    pub fn step_days(self) -> i64 {
        match self {
            Granularity::Day => 7,
            Granularity::Week => 14,
            Granularity::Month => 30,
            Granularity::Quarter => 90,
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "quarter" => Ok(Granularity::Quarter),
            other => Err(format!(
                "invalid granularity: {other} (expected day, week, month or quarter)"
            )),
        }
    }
}

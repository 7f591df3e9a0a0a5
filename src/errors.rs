// src/errors.rs

//! Crate-wide error type and result alias.

use serde::Serialize;
use thiserror::Error;

use crate::types::TaskId;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Task id already exists: {0}")]
    DuplicateId(TaskId),

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Cyclic dependency: edge '{from}' -> '{to}' closes a cycle")]
    CyclicDependency { from: TaskId, to: TaskId },

    #[error("Task '{task}' references unknown predecessor '{predecessor}'")]
    DanglingPredecessor { task: TaskId, predecessor: TaskId },

    #[error("Task '{task}' has invalid duration {duration} (must be >= 0)")]
    InvalidDuration { task: TaskId, duration: i64 },

    #[error("Task '{task}' has invalid lag {lag_days} on predecessor '{predecessor}'")]
    InvalidLag {
        task: TaskId,
        predecessor: TaskId,
        lag_days: i64,
    },

    #[error("Computed date is out of range: {0}")]
    DateOutOfRange(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScheduleError {
    /// `true` for errors that invalidate derived results project-wide.
    pub fn is_cycle(&self) -> bool {
        matches!(self, ScheduleError::CyclicDependency { .. })
    }
}

/// Non-fatal problem found during recomputation. The offending edge is left
/// out of the pass; everything else is still scheduled.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleWarning {
    #[error("Task '{task}' references unknown predecessor '{predecessor}'")]
    DanglingPredecessor { task: TaskId, predecessor: TaskId },
}

impl From<ScheduleWarning> for ScheduleError {
    fn from(w: ScheduleWarning) -> Self {
        match w {
            ScheduleWarning::DanglingPredecessor { task, predecessor } => {
                ScheduleError::DanglingPredecessor { task, predecessor }
            }
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ScheduleError>;

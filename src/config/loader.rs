// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{RawScheduleFile, ScheduleFile};
use crate::errors::Result;

/// Environment variable overriding the default schedule path.
pub const SCHEDULE_ENV_VAR: &str = "GANTTDAG_SCHEDULE";

/// Load a schedule file and return the raw, unvalidated `RawScheduleFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] for
/// the checked version.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawScheduleFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    parse_str(&contents)
}

/// Parse TOML text into a `RawScheduleFile`.
pub fn parse_str(contents: &str) -> Result<RawScheduleFile> {
    let raw: RawScheduleFile = toml::from_str(contents)?;
    Ok(raw)
}

/// Load a schedule file from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Rejects empty schedules, duplicate ids, negative durations and
///   non-positive timeline sizes.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ScheduleFile> {
    let raw = load_from_path(&path)?;
    ScheduleFile::try_from(raw)
}

/// `$GANTTDAG_SCHEDULE` if set, otherwise `Schedule.toml` in the current
/// working directory.
pub fn default_schedule_path() -> PathBuf {
    std::env::var_os(SCHEDULE_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Schedule.toml"))
}

// src/config/mod.rs

//! Schedule file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a schedule file from disk (`loader.rs`).
//! - Validate load-time invariants like unique ids (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_schedule_path, load_and_validate, load_from_path, parse_str};
pub use model::{ProjectSection, RawScheduleFile, ScheduleFile, TimelineSection};

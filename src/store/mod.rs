// src/store/mod.rs

//! Task graph store and mutation API.
//!
//! - [`task`] defines the user-editable [`TaskInput`], partial updates, and
//!   the merged [`TaskView`] handed to readers.
//! - [`schedule`] owns the task collection and the derived-results table
//!   and recomputes the latter after every structural change.

pub mod schedule;
pub mod task;

pub use schedule::{ScheduleHealth, ScheduleStore};
pub use task::{DerivedFields, Predecessor, TaskInput, TaskPatch, TaskView, MAX_SPAN_DAYS};

// src/dag/mod.rs

//! Dependency graph and critical path computation.
//!
//! - [`graph`] resolves predecessor lists into a petgraph DAG, orders it
//!   topologically and pinpoints the edge that closes a cycle.
//! - [`critical_path`] runs the forward/backward passes and derives slack
//!   and critical-path membership.

pub mod critical_path;
pub mod graph;

pub use critical_path::{compute, CriticalPathOutcome};
pub use graph::{Edge, TaskGraph};

// src/pipeline/mod.rs

//! The declared task graph.
//!
//! - [`stage`] holds artifacts and stage bindings (which files flow through
//!   which transformation).
//! - [`graph`] builds the ordered [`Pipeline`] and its watch binding from a
//!   validated config.
//! - [`plan`] decides which stages a given invocation runs.

pub mod graph;
pub mod plan;
pub mod stage;

pub use graph::{Pipeline, WatchBinding};
pub use plan::plan_for;
pub use stage::{Artifact, FileMapping, StageBinding};

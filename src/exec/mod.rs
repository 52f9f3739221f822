// src/exec/mod.rs

//! Stage execution layer.
//!
//! - [`backend`] provides the `StageExecutor` trait and the production
//!   `RealStageExecutor`; tests substitute a fake.
//! - [`compile`] runs the external structured-stylesheet compiler through
//!   `tokio::process`.
//! - [`minify`] minifies plain stylesheets in-process with `lightningcss`.
//! - [`concat`] joins minified stylesheets byte for byte.
//! - [`report`] describes what a stage or run wrote.

pub mod backend;
pub mod compile;
pub mod concat;
pub mod minify;
pub mod report;

pub use backend::{RealStageExecutor, StageExecutor};
pub use compile::CompileCommand;
pub use report::{ArtifactReport, RunReport, StageReport};

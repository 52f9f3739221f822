// src/engine/mod.rs

//! Orchestration engine for stylepipe.
//!
//! - [`runner`] executes a plan of stages strictly one after another and
//!   aborts on the first failure (`default` and single-stage invocations).
//! - [`core`] is the pure watch-session state machine: it turns incoming
//!   events into "run the pipeline" commands and keeps session counters.
//! - [`runtime`] is the async shell around the core: it reads events from
//!   the watcher channel, drives the runner and honours shutdown.

/// Why a watch-session run was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    /// A watched source file was created, modified or removed.
    FileWatch,
    /// `watch.run_on_start` requested a run when the session began.
    Startup,
}

/// Events flowing into the watch runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// One filesystem notification touching at least one watched path.
    SourceChanged { paths: Vec<String> },
    /// An explicit request to run the pipeline.
    RunRequested,
}

impl RuntimeEvent {
    pub fn reason(&self) -> TriggerReason {
        match self {
            RuntimeEvent::SourceChanged { .. } => TriggerReason::FileWatch,
            RuntimeEvent::RunRequested => TriggerReason::Startup,
        }
    }
}

pub mod core;
pub mod runner;
pub mod runtime;

pub use self::core::{CoreCommand, CoreStep, RunOutcome, WatchCore, WatchStats};
pub use runner::PipelineRunner;
pub use runtime::Runtime;

// src/engine/core.rs

//! Pure watch-session state machine.
//!
//! The core consumes [`RuntimeEvent`]s and run outcomes and answers with
//! [`CoreCommand`]s for the async shell. It has no channels, no Tokio types
//! and does no IO, so the session rules can be tested directly:
//!
//! - every event yields exactly one run; nothing is coalesced or dropped
//! - runs never overlap: events arriving during a run wait in FIFO order
//! - a failed run is counted and the session carries on

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::engine::{RuntimeEvent, TriggerReason};

/// What the shell should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreCommand {
    RunPipeline { run_id: u64, reason: TriggerReason },
}

/// Result of feeding one input into the core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    Failed(String),
}

/// Session counters, reported when the session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchStats {
    pub runs_started: u64,
    pub runs_succeeded: u64,
    pub runs_failed: u64,
}

#[derive(Debug, Default)]
pub struct WatchCore {
    stats: WatchStats,
    /// Run currently owned by the shell.
    in_flight: Option<u64>,
    /// Triggers received while a run was in flight, oldest first.
    pending: VecDeque<TriggerReason>,
    last_outcome: Option<RunOutcome>,
}

impl WatchCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn stats(&self) -> WatchStats {
        self.stats
    }

    pub fn last_outcome(&self) -> Option<&RunOutcome> {
        self.last_outcome.as_ref()
    }

    /// Handle an incoming event.
    ///
    /// Starts a run immediately when idle; otherwise remembers the trigger
    /// so it gets its own run once the current one finishes.
    pub fn step(&mut self, event: RuntimeEvent) -> CoreStep {
        let reason = event.reason();
        if let RuntimeEvent::SourceChanged { paths } = &event {
            info!(?paths, "source change detected");
        }

        if self.in_flight.is_some() {
            self.pending.push_back(reason);
            debug!(
                pending = self.pending.len(),
                "run in progress; trigger queued"
            );
            return CoreStep::default();
        }

        self.start_run(reason)
    }

    /// Record the outcome of the in-flight run and start the next queued one,
    /// if any.
    pub fn record_outcome(&mut self, run_id: u64, outcome: RunOutcome) -> CoreStep {
        match self.in_flight {
            Some(id) if id == run_id => {}
            other => {
                warn!(run_id, in_flight = ?other, "outcome for a run that is not in flight");
            }
        }
        self.in_flight = None;

        match &outcome {
            RunOutcome::Succeeded => {
                self.stats.runs_succeeded += 1;
                info!(run_id, "run succeeded; waiting for changes");
            }
            RunOutcome::Failed(msg) => {
                self.stats.runs_failed += 1;
                warn!(run_id, error = %msg, "run failed; waiting for changes");
            }
        }
        self.last_outcome = Some(outcome);

        match self.pending.pop_front() {
            Some(reason) => self.start_run(reason),
            None => CoreStep::default(),
        }
    }

    fn start_run(&mut self, reason: TriggerReason) -> CoreStep {
        self.stats.runs_started += 1;
        let run_id = self.stats.runs_started;
        self.in_flight = Some(run_id);
        debug!(run_id, ?reason, "starting run");

        CoreStep {
            commands: vec![CoreCommand::RunPipeline { run_id, reason }],
        }
    }
}

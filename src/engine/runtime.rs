// src/engine/runtime.rs

use std::fmt;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::engine::core::{CoreCommand, CoreStep, RunOutcome, WatchCore, WatchStats};
use crate::engine::runner::PipelineRunner;
use crate::engine::{RuntimeEvent, TriggerReason};
use crate::exec::StageExecutor;
use crate::types::Invocation;

/// Async shell of a watch session.
///
/// Reads [`RuntimeEvent`]s, lets [`WatchCore`] decide what to do, and runs
/// the pipeline through a [`PipelineRunner`]. Events that arrive while a
/// run is in flight are still read (so the watcher is never blocked) and
/// handed to the core, which queues them.
///
/// The session ends when the shutdown signal flips to `true` (aborting an
/// in-flight run) or when the event channel closes and no queued run
/// remains.
pub struct Runtime<E: StageExecutor> {
    core: WatchCore,
    runner: PipelineRunner<E>,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    shutdown_rx: watch::Receiver<bool>,
    events_open: bool,
}

impl<E: StageExecutor> fmt::Debug for Runtime<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<E: StageExecutor> Runtime<E> {
    pub fn new(
        runner: PipelineRunner<E>,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            core: WatchCore::new(),
            runner,
            event_rx,
            shutdown_rx,
            events_open: true,
        }
    }

    /// Main event loop. Returns the session counters.
    pub async fn run(mut self) -> WatchStats {
        info!("watch session started");

        while self.events_open {
            let event = tokio::select! {
                biased;
                _ = wait_for_shutdown(&mut self.shutdown_rx) => {
                    info!("shutdown requested; stopping watch session");
                    break;
                }
                ev = self.event_rx.recv() => match ev {
                    Some(ev) => ev,
                    None => {
                        info!("event channel closed; stopping watch session");
                        self.events_open = false;
                        break;
                    }
                },
            };

            debug!(?event, "runtime received event");
            let step = self.core.step(event);
            if !self.drive(step).await {
                break;
            }
        }

        let stats = self.core.stats();
        info!(
            runs = stats.runs_started,
            failed = stats.runs_failed,
            "watch session ended"
        );
        stats
    }

    /// Execute the core's commands until it has nothing more to run.
    ///
    /// Returns `false` if shutdown interrupted a run.
    async fn drive(&mut self, mut step: CoreStep) -> bool {
        while let Some(CoreCommand::RunPipeline { run_id, reason }) =
            step.commands.into_iter().next()
        {
            match self.execute_run(run_id, reason).await {
                Some(outcome) => step = self.core.record_outcome(run_id, outcome),
                None => return false,
            }
        }
        true
    }

    /// Run the pipeline once, still accepting events meanwhile.
    ///
    /// Returns `None` if shutdown was requested before the run finished.
    async fn execute_run(&mut self, run_id: u64, reason: TriggerReason) -> Option<RunOutcome> {
        info!(run_id, ?reason, "re-running pipeline");

        let Self {
            core,
            runner,
            event_rx,
            shutdown_rx,
            events_open,
        } = self;

        let run = runner.run(Invocation::Watch);
        tokio::pin!(run);

        loop {
            tokio::select! {
                biased;
                _ = wait_for_shutdown(shutdown_rx) => {
                    warn!(run_id, "shutdown requested; aborting in-flight run");
                    return None;
                }
                result = &mut run => {
                    return Some(match result {
                        Ok(_) => RunOutcome::Succeeded,
                        Err(err) => RunOutcome::Failed(err.to_string()),
                    });
                }
                ev = event_rx.recv(), if *events_open => match ev {
                    Some(ev) => {
                        // The core is busy, so this only queues.
                        let queued = core.step(ev);
                        debug_assert!(queued.commands.is_empty());
                    }
                    None => *events_open = false,
                },
            }
        }
    }
}

/// Resolves once the shutdown flag is `true`. If the sender is gone the
/// flag can never flip, so this never resolves.
async fn wait_for_shutdown(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

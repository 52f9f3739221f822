// src/engine/runner.rs

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::errors::Result;
use crate::exec::{RunReport, StageExecutor};
use crate::pipeline::{Pipeline, plan_for};
use crate::types::Invocation;

/// Runs stages of a [`Pipeline`] sequentially through a [`StageExecutor`].
///
/// Each stage starts only after the previous one finished, since it reads
/// the previous stage's output from disk. The first failing stage aborts the
/// run; later stages are not started and write nothing.
pub struct PipelineRunner<E: StageExecutor> {
    pipeline: Arc<Pipeline>,
    executor: E,
}

impl<E: StageExecutor> std::fmt::Debug for PipelineRunner<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineRunner")
            .field("root", &self.pipeline.root())
            .finish_non_exhaustive()
    }
}

impl<E: StageExecutor> PipelineRunner<E> {
    pub fn new(pipeline: Arc<Pipeline>, executor: E) -> Self {
        Self { pipeline, executor }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Compile, minify and concatenate once.
    pub async fn run_default(&mut self) -> Result<RunReport> {
        self.run(Invocation::Default).await
    }

    /// Run the stages `invocation` selects.
    pub async fn run(&mut self, invocation: Invocation) -> Result<RunReport> {
        let pipeline = Arc::clone(&self.pipeline);
        let plan = plan_for(&pipeline, invocation);
        let started = Instant::now();

        info!(
            %invocation,
            stages = ?plan.iter().map(|s| s.name()).collect::<Vec<_>>(),
            "starting run"
        );

        let mut report = RunReport::default();
        for stage in plan {
            info!(stage = stage.name(), "running stage");
            match self.executor.execute(stage).await {
                Ok(stage_report) => report.stages.push(stage_report),
                Err(err) => {
                    error!(stage = stage.name(), error = %err, "stage failed; aborting run");
                    return Err(err);
                }
            }
        }

        info!(
            %invocation,
            outputs = report.outputs().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "run finished"
        );
        Ok(report)
    }
}

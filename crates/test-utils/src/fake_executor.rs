use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use stylepipe::errors::{Result, StylepipeError};
use stylepipe::exec::{StageExecutor, StageReport};
use stylepipe::pipeline::StageBinding;
use stylepipe::types::Transform;

/// A fake executor that:
/// - records which stages were "run", in order
/// - succeeds immediately (after an optional delay)
/// - fails a chosen stage for a chosen number of runs
#[derive(Clone, Default)]
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<Transform>>>,
    fail_stage: Option<Transform>,
    failures_left: Arc<Mutex<usize>>,
    delay: Option<Duration>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail `stage` the next `times` times it executes.
    pub fn failing(mut self, stage: Transform, times: usize) -> Self {
        self.fail_stage = Some(stage);
        self.failures_left = Arc::new(Mutex::new(times));
        self
    }

    /// Sleep this long inside every stage.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared log of executed stages; clones observe the same log.
    pub fn executed(&self) -> Arc<Mutex<Vec<Transform>>> {
        Arc::clone(&self.executed)
    }
}

impl StageExecutor for FakeExecutor {
    fn execute<'a>(
        &'a mut self,
        stage: &'a StageBinding,
    ) -> Pin<Box<dyn Future<Output = Result<StageReport>> + Send + 'a>> {
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            self.executed.lock().unwrap().push(stage.transform());

            if self.fail_stage == Some(stage.transform()) {
                let mut left = self.failures_left.lock().unwrap();
                if *left > 0 {
                    *left -= 1;
                    return Err(StylepipeError::SourceError {
                        path: stage.inputs().next().map(|a| a.path().to_path_buf()).unwrap_or_default(),
                        message: "injected failure".to_string(),
                    });
                }
            }

            Ok(StageReport {
                transform: stage.transform(),
                outputs: Vec::new(),
                elapsed: Duration::ZERO,
            })
        })
    }
}

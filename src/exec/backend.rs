// src/exec/backend.rs

//! Pluggable stage executor abstraction.
//!
//! The runner talks to a `StageExecutor` instead of calling the transforms
//! directly. Production code uses [`RealStageExecutor`]; tests can provide
//! an implementation that records which stages ran without touching disk.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use crate::config::loader::absolute_root;
use crate::config::model::ConfigFile;
use crate::errors::Result;
use crate::exec::compile::{CompileCommand, run_compile};
use crate::exec::concat::run_concat;
use crate::exec::minify::run_minify;
use crate::exec::report::StageReport;
use crate::fs::{FileSystem, RealFileSystem};
use crate::pipeline::StageBinding;
use crate::types::Transform;

/// Trait abstracting how a single stage is executed.
pub trait StageExecutor: Send {
    /// Execute `stage` to completion.
    ///
    /// An error means the stage failed; the runner aborts the run.
    fn execute<'a>(
        &'a mut self,
        stage: &'a StageBinding,
    ) -> Pin<Box<dyn Future<Output = Result<StageReport>> + Send + 'a>>;
}

/// Executor used in production: an external compiler plus the in-process
/// minifier and concatenator.
#[derive(Debug, Clone)]
pub struct RealStageExecutor {
    root: PathBuf,
    compiler: CompileCommand,
    fs: Arc<dyn FileSystem>,
}

impl RealStageExecutor {
    pub fn new(root: impl Into<PathBuf>, compiler: CompileCommand) -> Self {
        Self::with_fs(root, compiler, Arc::new(RealFileSystem))
    }

    pub fn with_fs(
        root: impl Into<PathBuf>,
        compiler: CompileCommand,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            root: absolute_root(&root.into()),
            compiler,
            fs,
        }
    }

    pub fn from_config(cfg: &ConfigFile, root: impl Into<PathBuf>) -> Result<Self> {
        let compiler = CompileCommand::new(cfg.compile().cmd.clone())?;
        Ok(Self::new(root, compiler))
    }
}

impl StageExecutor for RealStageExecutor {
    fn execute<'a>(
        &'a mut self,
        stage: &'a StageBinding,
    ) -> Pin<Box<dyn Future<Output = Result<StageReport>> + Send + 'a>> {
        Box::pin(async move {
            let fs = self.fs.as_ref();
            match stage.transform() {
                Transform::Compile => run_compile(&self.compiler, stage, &self.root, fs).await,
                Transform::Minify => run_minify(stage, fs),
                Transform::Concat => run_concat(stage, fs),
            }
        })
    }
}

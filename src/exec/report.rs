// src/exec/report.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::types::Transform;

/// One file written by a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReport {
    pub path: PathBuf,
    pub bytes: usize,
    /// `blake3` hex digest of the written contents.
    pub digest: String,
}

impl ArtifactReport {
    /// Describe freshly written contents and log them.
    pub fn written(stage: Transform, path: &Path, contents: &[u8]) -> Self {
        let digest = blake3::hash(contents).to_hex().to_string();
        info!(
            stage = %stage,
            path = %path.display(),
            bytes = contents.len(),
            digest = %&digest[..16],
            "wrote artifact"
        );
        Self {
            path: path.to_path_buf(),
            bytes: contents.len(),
            digest,
        }
    }
}

/// What one stage produced.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub transform: Transform,
    pub outputs: Vec<ArtifactReport>,
    pub elapsed: Duration,
}

/// What one run produced, stages in execution order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub stages: Vec<StageReport>,
}

impl RunReport {
    pub fn stage(&self, transform: Transform) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.transform == transform)
    }

    /// Every written artifact across all stages.
    pub fn outputs(&self) -> impl Iterator<Item = &ArtifactReport> {
        self.stages.iter().flat_map(|s| s.outputs.iter())
    }

    pub fn elapsed(&self) -> Duration {
        self.stages.iter().map(|s| s.elapsed).sum()
    }
}

// src/pipeline/stage.rs

use std::fmt;
use std::path::{Path, PathBuf};

use crate::types::{ArtifactRole, Transform};

/// A file the pipeline reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path as written in the config, relative to the project root.
    declared: String,
    /// `declared` resolved against the project root.
    path: PathBuf,
    role: ArtifactRole,
}

impl Artifact {
    pub fn new(root: &Path, declared: &str, role: ArtifactRole) -> Self {
        Self {
            declared: declared.to_string(),
            path: root.join(declared),
            role,
        }
    }

    pub fn declared(&self) -> &str {
        &self.declared
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn role(&self) -> ArtifactRole {
        self.role
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.declared)
    }
}

/// Ordered sources feeding one destination.
///
/// Compile and minify mappings have a single source; the concatenate
/// mapping lists its sources in bundle order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
    pub sources: Vec<Artifact>,
    pub dest: Artifact,
}

/// One stage: a transformation plus the files it maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageBinding {
    transform: Transform,
    files: Vec<FileMapping>,
}

impl StageBinding {
    pub fn new(transform: Transform, files: Vec<FileMapping>) -> Self {
        Self { transform, files }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn name(&self) -> &'static str {
        self.transform.as_str()
    }

    pub fn files(&self) -> &[FileMapping] {
        &self.files
    }

    /// Every source artifact, in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = &Artifact> {
        self.files.iter().flat_map(|m| m.sources.iter())
    }

    /// Every destination artifact, in declaration order.
    pub fn outputs(&self) -> impl Iterator<Item = &Artifact> {
        self.files.iter().map(|m| &m.dest)
    }
}

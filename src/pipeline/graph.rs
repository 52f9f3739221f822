// src/pipeline/graph.rs

use std::path::{Path, PathBuf};

use crate::config::loader::absolute_root;
use crate::config::model::ConfigFile;
use crate::errors::Result;
use crate::pipeline::stage::{Artifact, FileMapping, StageBinding};
use crate::types::{ArtifactRole, Transform};
use crate::watch::patterns::WatchProfile;

/// What the watch session observes and what it re-runs.
#[derive(Debug, Clone)]
pub struct WatchBinding {
    /// Directory observed recursively.
    pub dir: PathBuf,
    /// Filter applied to root-relative changed paths.
    pub profile: WatchProfile,
    /// Stages re-run per change; always the full sequence from compile on.
    pub stages: Vec<Transform>,
    pub run_on_start: bool,
}

/// The ordered stage sequence plus the watch binding.
///
/// Built once from a validated [`ConfigFile`] and never mutated; the
/// config's validation already guarantees a single producer per output and
/// an acyclic artifact graph.
#[derive(Debug, Clone)]
pub struct Pipeline {
    root: PathBuf,
    stages: Vec<StageBinding>,
    watch: WatchBinding,
}

impl Pipeline {
    /// Build the pipeline for a project rooted at `root`.
    ///
    /// A relative `root` is resolved against the working directory once,
    /// here, so every artifact path is absolute.
    pub fn from_config(cfg: &ConfigFile, root: impl Into<PathBuf>) -> Result<Self> {
        let root = absolute_root(&root.into());

        let compile = cfg.compile();
        let compile_stage = StageBinding::new(
            Transform::Compile,
            vec![FileMapping {
                sources: vec![Artifact::new(&root, &compile.src, ArtifactRole::StyleSource)],
                dest: Artifact::new(&root, &compile.dest, ArtifactRole::Intermediate),
            }],
        );

        let minify = cfg.minify();
        let minify_files: Vec<FileMapping> = minify
            .entries()
            .into_iter()
            .map(|(label, entry)| {
                let role = if label == "site" {
                    ArtifactRole::Intermediate
                } else {
                    ArtifactRole::VendorCss
                };
                FileMapping {
                    sources: vec![Artifact::new(&root, &entry.src, role)],
                    dest: Artifact::new(&root, &entry.dest, ArtifactRole::Intermediate),
                }
            })
            .collect();

        // Bundle order follows the minify entries: vendor base, vendor grid, site.
        let concat_sources: Vec<Artifact> =
            minify_files.iter().map(|m| m.dest.clone()).collect();
        let minify_stage = StageBinding::new(Transform::Minify, minify_files);

        let concat_stage = StageBinding::new(
            Transform::Concat,
            vec![FileMapping {
                sources: concat_sources,
                dest: Artifact::new(&root, &cfg.concat().dest, ArtifactRole::Distributable),
            }],
        );

        let watch_cfg = cfg.watch();
        let watch = WatchBinding {
            dir: root.join(&watch_cfg.dir),
            profile: WatchProfile::from_section(watch_cfg)?,
            stages: Transform::ORDER.to_vec(),
            run_on_start: watch_cfg.run_on_start,
        };

        Ok(Self {
            root,
            stages: vec![compile_stage, minify_stage, concat_stage],
            watch,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All stages in execution order.
    pub fn stages(&self) -> &[StageBinding] {
        &self.stages
    }

    pub fn stage(&self, transform: Transform) -> Option<&StageBinding> {
        self.stages.iter().find(|s| s.transform() == transform)
    }

    pub fn watch(&self) -> &WatchBinding {
        &self.watch
    }

    /// Every artifact written by some stage, in execution order.
    pub fn outputs(&self) -> impl Iterator<Item = &Artifact> {
        self.stages.iter().flat_map(|s| s.outputs())
    }

    /// The stage that writes `path`, if any.
    pub fn producer_of(&self, path: &Path) -> Option<Transform> {
        self.stages
            .iter()
            .find(|s| s.outputs().any(|a| a.path() == path))
            .map(|s| s.transform())
    }
}

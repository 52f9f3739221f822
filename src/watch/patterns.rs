// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::model::WatchSection;

/// Compiled watch/exclude glob patterns for the watch binding.
///
/// The patterns are relative to the project root. The watcher passes
/// relative, forward-slash paths (e.g. `"styles/less/nav/menu.less"`) into
/// [`WatchProfile::matches`].
#[derive(Clone)]
pub struct WatchProfile {
    patterns: Vec<String>,
    watch_set: GlobSet,
    exclude_set: Option<GlobSet>,
}

impl fmt::Debug for WatchProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchProfile")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl WatchProfile {
    /// Compile the `[watch]` section's globs.
    pub fn from_section(section: &WatchSection) -> Result<Self> {
        Self::new(&section.patterns, &section.exclude)
    }

    pub fn new(patterns: &[String], exclude: &[String]) -> Result<Self> {
        let watch_set = build_globset(patterns).context("building watch globset")?;

        let exclude_set = if exclude.is_empty() {
            None
        } else {
            Some(build_globset(exclude).context("building exclude globset")?)
        };

        Ok(Self {
            patterns: patterns.to_vec(),
            watch_set,
            exclude_set,
        })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns true if a change to `rel_path` should re-run the pipeline.
    pub fn matches(&self, rel_path: &str) -> bool {
        if !self.watch_set.is_match(rel_path) {
            return false;
        }
        if let Some(exclude) = &self.exclude_set {
            if exclude.is_match(rel_path) {
                return false;
            }
        }
        true
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

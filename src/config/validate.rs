// src/config/validate.rs

use std::collections::HashMap;
use std::path::Path;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use regex::Regex;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, StylepipeError};
use crate::watch::patterns::WatchProfile;

/// Placeholders understood by the compile command template.
pub const INPUT_PLACEHOLDER: &str = "input";
pub const OUTPUT_PLACEHOLDER: &str = "output";

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = StylepipeError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_paths_non_empty(cfg)?;
    validate_compile_command(&cfg.compile.cmd)?;
    validate_unique_outputs(cfg)?;
    validate_site_source(cfg)?;
    validate_artifact_graph(cfg)?;
    validate_watch(cfg)?;
    Ok(())
}

/// Normalise a declared path for comparisons: forward slashes, no leading
/// `./`.
pub(crate) fn normalize(path: &str) -> String {
    let mut s = path.trim().replace('\\', "/");
    while let Some(rest) = s.strip_prefix("./") {
        s = rest.to_string();
    }
    s
}

fn ensure_paths_non_empty(cfg: &RawConfigFile) -> Result<()> {
    let mut declared = vec![
        ("compile.src", &cfg.compile.src),
        ("compile.dest", &cfg.compile.dest),
        ("concat.dest", &cfg.concat.dest),
        ("watch.dir", &cfg.watch.dir),
    ];
    for (label, entry) in cfg.minify.entries() {
        declared.push((label, &entry.src));
        declared.push((label, &entry.dest));
    }

    for (label, path) in declared {
        if normalize(path).is_empty() {
            return Err(StylepipeError::config(format!("{label} must not be empty")));
        }
    }
    Ok(())
}

/// `{input}` is required; `{output}` is optional; nothing else is allowed.
pub(crate) fn validate_compile_command(cmd: &str) -> Result<()> {
    let placeholder = placeholder_regex()?;
    let mut has_input = false;

    for caps in placeholder.captures_iter(cmd) {
        match &caps[1] {
            INPUT_PLACEHOLDER => has_input = true,
            OUTPUT_PLACEHOLDER => {}
            other => {
                return Err(StylepipeError::config(format!(
                    "compile.cmd uses unknown placeholder {{{other}}} (expected {{input}} or {{output}})"
                )));
            }
        }
    }

    if !has_input {
        return Err(StylepipeError::config(format!(
            "compile.cmd must reference {{input}} (got {cmd:?})"
        )));
    }
    Ok(())
}

pub(crate) fn placeholder_regex() -> Result<Regex> {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| StylepipeError::Other(e.into()))
}

/// Each output artifact has exactly one producing stage, and no output
/// overwrites a declared external source.
fn validate_unique_outputs(cfg: &RawConfigFile) -> Result<()> {
    let mut producers: HashMap<String, &str> = HashMap::new();

    let mut outputs = vec![("compile", cfg.compile.dest.as_str())];
    for (label, entry) in cfg.minify.entries() {
        outputs.push((label, entry.dest.as_str()));
    }
    outputs.push(("concat", cfg.concat.dest.as_str()));

    for (producer, dest) in outputs {
        if let Some(previous) = producers.insert(normalize(dest), producer) {
            return Err(StylepipeError::config(format!(
                "output '{dest}' is produced by both '{previous}' and '{producer}'"
            )));
        }
    }

    let externals = [
        ("compile.src", cfg.compile.src.as_str()),
        ("minify.vendor_base.src", cfg.minify.vendor_base.src.as_str()),
        ("minify.vendor_grid.src", cfg.minify.vendor_grid.src.as_str()),
    ];
    for (label, src) in externals {
        if let Some(producer) = producers.get(&normalize(src)) {
            return Err(StylepipeError::config(format!(
                "{label} '{src}' would be overwritten by output of '{producer}'"
            )));
        }
    }

    Ok(())
}

fn validate_site_source(cfg: &RawConfigFile) -> Result<()> {
    if normalize(&cfg.minify.site.src) != normalize(&cfg.compile.dest) {
        return Err(StylepipeError::config(format!(
            "minify.site.src '{}' must be the compile output '{}'",
            cfg.minify.site.src, cfg.compile.dest
        )));
    }
    Ok(())
}

fn validate_artifact_graph(cfg: &RawConfigFile) -> Result<()> {
    // Nodes are normalised artifact paths; edges run source -> destination.
    let mut edges = vec![(normalize(&cfg.compile.src), normalize(&cfg.compile.dest))];
    let concat_dest = normalize(&cfg.concat.dest);
    for (_, entry) in cfg.minify.entries() {
        let dest = normalize(&entry.dest);
        edges.push((normalize(&entry.src), dest.clone()));
        edges.push((dest, concat_dest.clone()));
    }

    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for (src, dest) in edges.iter() {
        graph.add_edge(src.as_str(), dest.as_str(), ());
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(StylepipeError::config(format!(
            "cycle detected in artifact graph involving '{}'",
            cycle.node_id()
        ))),
    }
}

/// The watch binding must see changes to the structured source, otherwise
/// it could never reproduce the pipeline from the compile stage forward:
/// the observed directory has to contain it and the globs have to match it.
fn validate_watch(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.patterns.is_empty() {
        return Err(StylepipeError::config(
            "watch.patterns must contain at least one glob",
        ));
    }

    let profile = WatchProfile::from_section(&cfg.watch)
        .map_err(|e| StylepipeError::config(format!("invalid watch globs: {e:#}")))?;

    let src = normalize(&cfg.compile.src);
    let dir = normalize(&cfg.watch.dir);
    let dir = dir.trim_end_matches('/');
    if dir != "." && !Path::new(&src).starts_with(dir) {
        return Err(StylepipeError::config(format!(
            "watch.dir '{}' does not contain compile.src '{}'",
            cfg.watch.dir, src
        )));
    }

    if !profile.matches(&src) {
        return Err(StylepipeError::config(format!(
            "watch patterns {:?} (exclude {:?}) do not cover compile.src '{}'",
            cfg.watch.patterns, cfg.watch.exclude, src
        )));
    }
    Ok(())
}

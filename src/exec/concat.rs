// src/exec/concat.rs

use std::time::Instant;

use tracing::debug;

use crate::errors::Result;
use crate::exec::report::{ArtifactReport, StageReport};
use crate::fs::FileSystem;
use crate::pipeline::StageBinding;
use crate::types::Transform;

/// Join `parts` in order with no separator.
pub fn concat_bytes<I, B>(parts: I) -> Vec<u8>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut out = Vec::new();
    for part in parts {
        out.extend_from_slice(part.as_ref());
    }
    out
}

/// Run the concatenate stage.
///
/// Sources are read in their declared order before anything is written;
/// the destination's length is the sum of the sources' lengths.
pub fn run_concat(stage: &StageBinding, fs: &dyn FileSystem) -> Result<StageReport> {
    let started = Instant::now();
    let mut outputs = Vec::with_capacity(stage.files().len());

    for mapping in stage.files() {
        let mut parts = Vec::with_capacity(mapping.sources.len());
        for source in &mapping.sources {
            let bytes = fs.read(source.path())?;
            debug!(input = %source, bytes = bytes.len(), "concat part");
            parts.push(bytes);
        }

        let combined = concat_bytes(&parts);
        fs.write(mapping.dest.path(), &combined)?;
        outputs.push(ArtifactReport::written(
            Transform::Concat,
            mapping.dest.path(),
            &combined,
        ));
    }

    Ok(StageReport {
        transform: Transform::Concat,
        outputs,
        elapsed: started.elapsed(),
    })
}

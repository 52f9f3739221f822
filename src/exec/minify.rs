// src/exec/minify.rs

use std::path::Path;
use std::time::Instant;

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use tracing::debug;

use crate::errors::{Result, StylepipeError};
use crate::exec::report::{ArtifactReport, StageReport};
use crate::fs::FileSystem;
use crate::pipeline::StageBinding;
use crate::types::Transform;

/// Minify one plain stylesheet.
///
/// Parse errors are returned as text so callers can attach the file they
/// came from. Identical input always yields identical output.
pub fn minify_css(source: &str, filename: &str) -> std::result::Result<String, String> {
    let options = ParserOptions {
        filename: filename.to_string(),
        ..ParserOptions::default()
    };

    let mut sheet = StyleSheet::parse(source, options).map_err(|e| e.to_string())?;
    sheet
        .minify(MinifyOptions::default())
        .map_err(|e| e.to_string())?;

    let printed = sheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| e.to_string())?;

    Ok(printed.code)
}

/// Run the minify stage.
///
/// All inputs are read and minified before the first output is written, so
/// a missing or malformed input leaves every destination untouched.
pub fn run_minify(stage: &StageBinding, fs: &dyn FileSystem) -> Result<StageReport> {
    let started = Instant::now();

    let mut minified = Vec::with_capacity(stage.files().len());
    for mapping in stage.files() {
        for source in &mapping.sources {
            let text = read_utf8(fs, source.path())?;
            let css = minify_css(&text, source.declared()).map_err(|message| {
                StylepipeError::SourceError {
                    path: source.path().to_path_buf(),
                    message,
                }
            })?;
            debug!(
                input = %source,
                before = text.len(),
                after = css.len(),
                "minified stylesheet"
            );
            minified.push((mapping.dest.path(), css));
        }
    }

    let mut outputs = Vec::with_capacity(minified.len());
    for (dest, css) in minified {
        fs.write(dest, css.as_bytes())?;
        outputs.push(ArtifactReport::written(Transform::Minify, dest, css.as_bytes()));
    }

    Ok(StageReport {
        transform: Transform::Minify,
        outputs,
        elapsed: started.elapsed(),
    })
}

fn read_utf8(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    let bytes = fs.read(path)?;
    String::from_utf8(bytes).map_err(|e| StylepipeError::SourceError {
        path: path.to_path_buf(),
        message: format!("stylesheet is not valid UTF-8: {e}"),
    })
}

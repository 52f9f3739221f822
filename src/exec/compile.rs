// src/exec/compile.rs

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use anyhow::Context;
use regex::Captures;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::validate::{
    INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER, placeholder_regex, validate_compile_command,
};
use crate::errors::{Result, StylepipeError};
use crate::exec::report::{ArtifactReport, StageReport};
use crate::fs::FileSystem;
use crate::pipeline::StageBinding;
use crate::types::Transform;

/// The external compiler invocation, e.g. `lessc {input}`.
#[derive(Debug, Clone)]
pub struct CompileCommand {
    template: String,
    writes_output: bool,
}

impl CompileCommand {
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        validate_compile_command(&template)?;

        let writes_output = placeholder_regex()?
            .captures_iter(&template)
            .any(|caps| &caps[1] == OUTPUT_PLACEHOLDER);

        Ok(Self {
            template,
            writes_output,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// True when the compiler writes the destination itself (`{output}`).
    pub fn writes_output(&self) -> bool {
        self.writes_output
    }

    /// Expand the template with shell-quoted paths.
    pub fn render(&self, input: &Path, output: &Path) -> Result<String> {
        let rendered = placeholder_regex()?.replace_all(&self.template, |caps: &Captures| {
            match &caps[1] {
                INPUT_PLACEHOLDER => shell_quote(input),
                OUTPUT_PLACEHOLDER => shell_quote(output),
                other => format!("{{{other}}}"),
            }
        });
        Ok(rendered.into_owned())
    }
}

/// Where a compiler that writes its own output is pointed: a hidden
/// sibling of `dest`, so a stale destination is never mistaken for fresh
/// output.
pub fn staging_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dest.with_file_name(format!(".{name}.partial"))
}

fn shell_quote(path: &Path) -> String {
    let s = path.to_string_lossy();
    if cfg!(windows) {
        format!("\"{}\"", s.replace('"', "\\\""))
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// Run the compile stage: one structured source into one plain stylesheet.
///
/// A missing source is reported before anything is spawned. A non-zero
/// exit is a source error carrying the compiler's stderr; the destination
/// is left untouched in that case, and likewise when an `{output}`
/// compiler exits cleanly without writing anything.
pub async fn run_compile(
    compiler: &CompileCommand,
    stage: &StageBinding,
    root: &Path,
    fs: &dyn FileSystem,
) -> Result<StageReport> {
    let started = Instant::now();
    let mut outputs = Vec::with_capacity(stage.files().len());

    for mapping in stage.files() {
        let Some(source) = mapping.sources.first() else {
            continue;
        };
        let (input, output) = (source.path(), mapping.dest.path());

        if !fs.is_file(input) {
            return Err(StylepipeError::MissingInput(input.to_path_buf()));
        }

        // With `{output}` the compiler writes a staging file next to the
        // destination; the destination itself only changes once that file
        // exists after a successful exit.
        let staging = compiler.writes_output().then(|| staging_path(output));
        if let Some(staging) = &staging {
            fs.remove(staging)?;
        }

        let script = compiler.render(input, staging.as_deref().unwrap_or(output))?;
        info!(input = %source, output = %mapping.dest, cmd = %script, "compiling stylesheet");

        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&script);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&script);
            c
        };
        if !root.as_os_str().is_empty() {
            cmd.current_dir(root);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let result = cmd
            .output()
            .await
            .with_context(|| format!("spawning compiler for {}", source))?;

        let stderr = String::from_utf8_lossy(&result.stderr);
        if !result.status.success() {
            if let Some(staging) = &staging {
                if let Err(err) = fs.remove(staging) {
                    warn!(path = %staging.display(), error = %err, "could not remove staging file");
                }
            }
            let code = result.status.code().unwrap_or(-1);
            return Err(StylepipeError::SourceError {
                path: input.to_path_buf(),
                message: format!("compiler exited with code {code}: {}", stderr.trim()),
            });
        }
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            warn!(input = %source, "compiler: {}", line);
        }

        let contents = if let Some(staging) = &staging {
            debug!(output = %mapping.dest, staging = %staging.display(), "compiler wrote its own output");
            let bytes = fs.read(staging).map_err(|e| match e {
                StylepipeError::MissingInput(_) => StylepipeError::SourceError {
                    path: input.to_path_buf(),
                    message: format!(
                        "compiler exited successfully but did not write {}",
                        mapping.dest
                    ),
                },
                other => other,
            })?;
            fs.write(output, &bytes)?;
            fs.remove(staging)?;
            bytes
        } else {
            fs.write(output, &result.stdout)?;
            result.stdout
        };

        outputs.push(ArtifactReport::written(Transform::Compile, output, &contents));
    }

    Ok(StageReport {
        transform: Transform::Compile,
        outputs,
        elapsed: started.elapsed(),
    })
}

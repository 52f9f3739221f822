// src/types.rs

//! Small value types shared by config, pipeline, exec and engine.

use std::fmt;

use clap::ValueEnum;

/// The transformation a stage applies to its inputs.
///
/// Each transform appears exactly once in the pipeline, so it doubles as
/// the stage's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Transform {
    /// Structured stylesheet -> plain stylesheet, via an external compiler.
    Compile,
    /// Plain stylesheet -> minified stylesheet, one output per input.
    Minify,
    /// Ordered minified stylesheets -> one distributable file.
    Concat,
}

impl Transform {
    /// All transforms in pipeline order.
    pub const ORDER: [Transform; 3] = [Transform::Compile, Transform::Minify, Transform::Concat];

    pub fn as_str(self) -> &'static str {
        match self {
            Transform::Compile => "compile",
            Transform::Minify => "minify",
            Transform::Concat => "concat",
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of file an artifact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    /// Hand-written structured stylesheet (the compile input).
    StyleSource,
    /// Third-party plain stylesheet bundled as-is apart from minification.
    VendorCss,
    /// Written by one stage and read by a later one.
    Intermediate,
    /// The final combined stylesheet.
    Distributable,
}

impl ArtifactRole {
    /// True for artifacts the pipeline reads but never writes.
    pub fn is_external(self) -> bool {
        matches!(self, ArtifactRole::StyleSource | ArtifactRole::VendorCss)
    }
}

impl fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactRole::StyleSource => "style-source",
            ArtifactRole::VendorCss => "vendor-css",
            ArtifactRole::Intermediate => "intermediate",
            ArtifactRole::Distributable => "distributable",
        };
        f.write_str(s)
    }
}

/// A named invocation selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Invocation {
    /// Compile, minify and concatenate once.
    Default,
    /// Re-run the default sequence on every source change until interrupted.
    Watch,
    /// Run only the compile stage.
    Compile,
    /// Run only the minify stage.
    Minify,
    /// Run only the concatenate stage.
    Concat,
}

impl Invocation {
    /// The single stage this invocation is restricted to, if any.
    pub fn single_stage(self) -> Option<Transform> {
        match self {
            Invocation::Default | Invocation::Watch => None,
            Invocation::Compile => Some(Transform::Compile),
            Invocation::Minify => Some(Transform::Minify),
            Invocation::Concat => Some(Transform::Concat),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.single_stage() {
            Some(t) => t.fmt(f),
            None => match self {
                Invocation::Watch => f.write_str("watch"),
                _ => f.write_str("default"),
            },
        }
    }
}

// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from `Stylepipe.toml`.
///
/// Every key is optional; an empty file describes the stock layout:
///
/// ```toml
/// [compile]
/// src = "styles/less/main.less"
/// dest = "styles/css/main.css"
/// cmd = "lessc {input}"
///
/// [minify]
/// vendor_base = { src = "node_modules/purecss/build/pure.css", dest = "styles/mincss/pure.css" }
/// vendor_grid = { src = "node_modules/purecss/build/grids-responsive.css", dest = "styles/mincss/grids-responsive-min.css" }
/// site = { src = "styles/css/main.css", dest = "styles/mincss/main.css" }
///
/// [concat]
/// dest = "styles/dist/style.css"
///
/// [watch]
/// dir = "styles/less"
/// patterns = ["styles/less/**/*.less"]
/// ```
///
/// This is the unvalidated form; use [`ConfigFile`] (via `TryFrom`) for
/// anything that runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub compile: CompileSection,

    #[serde(default)]
    pub minify: MinifySection,

    #[serde(default)]
    pub concat: ConcatSection,

    #[serde(default)]
    pub watch: WatchSection,
}

/// `[compile]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompileSection {
    /// Structured stylesheet to compile.
    #[serde(default = "default_compile_src")]
    pub src: String,

    /// Plain stylesheet written by the compile stage.
    #[serde(default = "default_compile_dest")]
    pub dest: String,

    /// Compiler command template.
    ///
    /// `{input}` expands to the quoted source path. The compiled CSS is read
    /// from stdout unless the template also uses `{output}`, in which case
    /// the command is expected to write the destination itself.
    #[serde(default = "default_compile_cmd")]
    pub cmd: String,
}

impl Default for CompileSection {
    fn default() -> Self {
        Self {
            src: default_compile_src(),
            dest: default_compile_dest(),
            cmd: default_compile_cmd(),
        }
    }
}

fn default_compile_src() -> String {
    "styles/less/main.less".to_string()
}

fn default_compile_dest() -> String {
    "styles/css/main.css".to_string()
}

fn default_compile_cmd() -> String {
    "lessc {input}".to_string()
}

/// One `src -> dest` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileMappingConfig {
    pub src: String,
    pub dest: String,
}

impl FileMappingConfig {
    pub fn new(src: impl Into<String>, dest: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dest: dest.into(),
        }
    }
}

/// `[minify]` section.
///
/// The three entries are named rather than listed: their order in the
/// concatenated bundle is fixed (vendor base, vendor grid, site) because
/// later rules override earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MinifySection {
    #[serde(default = "default_vendor_base")]
    pub vendor_base: FileMappingConfig,

    #[serde(default = "default_vendor_grid")]
    pub vendor_grid: FileMappingConfig,

    /// Site-specific styles; `src` must be the compile stage's `dest`.
    #[serde(default = "default_site")]
    pub site: FileMappingConfig,
}

impl MinifySection {
    /// Entries in bundle order, labelled for diagnostics.
    pub fn entries(&self) -> [(&'static str, &FileMappingConfig); 3] {
        [
            ("vendor_base", &self.vendor_base),
            ("vendor_grid", &self.vendor_grid),
            ("site", &self.site),
        ]
    }
}

impl Default for MinifySection {
    fn default() -> Self {
        Self {
            vendor_base: default_vendor_base(),
            vendor_grid: default_vendor_grid(),
            site: default_site(),
        }
    }
}

fn default_vendor_base() -> FileMappingConfig {
    FileMappingConfig::new(
        "node_modules/purecss/build/pure.css",
        "styles/mincss/pure.css",
    )
}

fn default_vendor_grid() -> FileMappingConfig {
    FileMappingConfig::new(
        "node_modules/purecss/build/grids-responsive.css",
        "styles/mincss/grids-responsive-min.css",
    )
}

fn default_site() -> FileMappingConfig {
    FileMappingConfig::new("styles/css/main.css", "styles/mincss/main.css")
}

/// `[concat]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConcatSection {
    /// The combined distributable stylesheet.
    #[serde(default = "default_concat_dest")]
    pub dest: String,
}

impl Default for ConcatSection {
    fn default() -> Self {
        Self {
            dest: default_concat_dest(),
        }
    }
}

fn default_concat_dest() -> String {
    "styles/dist/style.css".to_string()
}

/// `[watch]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchSection {
    /// Directory observed recursively, relative to the project root.
    #[serde(default = "default_watch_dir")]
    pub dir: String,

    /// Globs (relative to the project root) that count as source changes.
    #[serde(default = "default_watch_patterns")]
    pub patterns: Vec<String>,

    /// Globs that never count, even if matched by `patterns`.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Run the pipeline once when the watch session starts.
    #[serde(default)]
    pub run_on_start: bool,
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            dir: default_watch_dir(),
            patterns: default_watch_patterns(),
            exclude: Vec::new(),
            run_on_start: false,
        }
    }
}

fn default_watch_dir() -> String {
    "styles/less".to_string()
}

fn default_watch_patterns() -> Vec<String> {
    vec!["styles/less/**/*.less".to_string()]
}

/// A validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// `Default`, so holders can rely on the file contract being sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    compile: CompileSection,
    minify: MinifySection,
    concat: ConcatSection,
    watch: WatchSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            compile: raw.compile,
            minify: raw.minify,
            concat: raw.concat,
            watch: raw.watch,
        }
    }

    pub fn compile(&self) -> &CompileSection {
        &self.compile
    }

    pub fn minify(&self) -> &MinifySection {
        &self.minify
    }

    pub fn concat(&self) -> &ConcatSection {
        &self.concat
    }

    pub fn watch(&self) -> &WatchSection {
        &self.watch
    }
}

impl Default for ConfigFile {
    /// The built-in layout, which always passes validation.
    fn default() -> Self {
        Self::new_unchecked(RawConfigFile::default())
    }
}

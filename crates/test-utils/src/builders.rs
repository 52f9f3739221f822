#![allow(dead_code)]

use stylepipe::config::{ConfigFile, FileMappingConfig, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
///
/// Starts from the built-in layout; every setter overrides one key.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn compile_cmd(mut self, cmd: &str) -> Self {
        self.config.compile.cmd = cmd.to_string();
        self
    }

    pub fn compile(mut self, src: &str, dest: &str) -> Self {
        self.config.compile.src = src.to_string();
        self.config.compile.dest = dest.to_string();
        self
    }

    pub fn vendor_base(mut self, src: &str, dest: &str) -> Self {
        self.config.minify.vendor_base = FileMappingConfig::new(src, dest);
        self
    }

    pub fn vendor_grid(mut self, src: &str, dest: &str) -> Self {
        self.config.minify.vendor_grid = FileMappingConfig::new(src, dest);
        self
    }

    pub fn site(mut self, src: &str, dest: &str) -> Self {
        self.config.minify.site = FileMappingConfig::new(src, dest);
        self
    }

    pub fn concat_dest(mut self, dest: &str) -> Self {
        self.config.concat.dest = dest.to_string();
        self
    }

    pub fn watch_dir(mut self, dir: &str) -> Self {
        self.config.watch.dir = dir.to_string();
        self
    }

    pub fn watch_patterns(mut self, patterns: &[&str]) -> Self {
        self.config.watch.patterns = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn watch_exclude(mut self, patterns: &[&str]) -> Self {
        self.config.watch.exclude = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn run_on_start(mut self, val: bool) -> Self {
        self.config.watch.run_on_start = val;
        self
    }

    /// The unvalidated config, for tests that expect validation to fail.
    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

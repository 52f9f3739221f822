// src/config/mod.rs

//! Configuration loading and validation for stylepipe.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, or fall back to the built-in layout
//!   (`loader.rs`).
//! - Validate the file contract before anything runs (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    DEFAULT_CONFIG_FILE, LoadedConfig, absolute_root, config_root_dir, load_and_validate,
    load_from_path, resolve_config,
};
pub use model::{
    CompileSection, ConcatSection, ConfigFile, FileMappingConfig, MinifySection, RawConfigFile,
    WatchSection,
};

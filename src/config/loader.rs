// src/config/loader.rs

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, StylepipeError};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "Stylepipe.toml";

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** check the file
/// contract. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            StylepipeError::config(format!("config file not found: {}", path.display()))
        }
        _ => StylepipeError::IoError(e),
    })?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    ConfigFile::try_from(raw_config)
}

/// A validated config plus the directory its paths are relative to.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ConfigFile,
    /// Project root: every declared path is resolved against this.
    pub root: PathBuf,
    /// The file the config came from; `None` for the built-in layout.
    pub source: Option<PathBuf>,
}

/// Resolve the config for a run.
///
/// - An explicit path must exist and validate.
/// - Otherwise `Stylepipe.toml` in the working directory is used when
///   present, and the built-in layout (rooted at the working directory)
///   when not.
pub fn resolve_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default_path.is_file() {
                info!(
                    "no {} in working directory; using built-in layout",
                    DEFAULT_CONFIG_FILE
                );
                return Ok(LoadedConfig {
                    config: ConfigFile::default(),
                    root: working_dir(),
                    source: None,
                });
            }
            default_path
        }
    };

    let config = load_and_validate(&path)?;
    info!(config = %path.display(), "loaded config");

    Ok(LoadedConfig {
        root: config_root_dir(&path),
        config,
        source: Some(path),
    })
}

/// Figure out the project root for a config file.
///
/// - If the config path has a non-empty parent (e.g. "site/Stylepipe.toml"),
///   we use that directory, made absolute against the working directory.
/// - If it's just a bare filename (parent = ""), we fall back to the current
///   working directory.
///
/// The root is always absolute: declared paths are joined onto it and the
/// compiler runs with it as its working directory, so a relative root would
/// be applied twice.
pub fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => absolute_root(parent),
        _ => working_dir(),
    }
}

/// `path` made absolute against the working directory, without resolving
/// symlinks.
pub fn absolute_root(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| working_dir().join(path))
}

fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylepipeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The compiler rejected the source, or a stylesheet failed to parse.
    #[error("Source error in {}: {message}", path.display())]
    SourceError { path: PathBuf, message: String },

    #[error("Missing input file: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StylepipeError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        StylepipeError::ConfigError(msg.into())
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, StylepipeError>;

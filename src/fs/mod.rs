// src/fs/mod.rs

//! Filesystem access for the in-process stages.
//!
//! The minify and concatenate stages read and write through [`FileSystem`]
//! so they can be exercised against [`mock::MockFileSystem`]. Errors are
//! already classified: a missing input is [`StylepipeError::MissingInput`],
//! a failed write is [`StylepipeError::WriteError`].

use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::errors::{Result, StylepipeError};

pub mod mock;

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    /// Read a whole file.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Create or truncate `path` (and its parent directories) and write
    /// `contents`.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Delete `path`; a file that does not exist is not an error.
    fn remove(&self, path: &Path) -> Result<()>;

    fn is_file(&self, path: &Path) -> bool;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StylepipeError::MissingInput(path.to_path_buf()),
            _ => StylepipeError::IoError(e),
        })
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let write_err = |source| StylepipeError::WriteError {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        fs::write(path, contents).map_err(write_err)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StylepipeError::WriteError {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

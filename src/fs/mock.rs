// src/fs/mock.rs

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::FileSystem;
use crate::errors::{Result, StylepipeError};

/// In-memory filesystem for stage tests.
///
/// Clones share the same storage, so a test can keep a handle while the
/// executor owns another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    read_only: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.lock_files()
            .insert(path.as_ref().to_path_buf(), content.into());
    }

    pub fn remove_file(&self, path: impl AsRef<Path>) {
        self.lock_files().remove(path.as_ref());
    }

    /// Make every later write to `path` fail with `PermissionDenied`.
    pub fn deny_writes_to(&self, path: impl AsRef<Path>) {
        self.lock_read_only().insert(path.as_ref().to_path_buf());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock_files().get(path.as_ref()).cloned()
    }

    fn lock_files(&self) -> MutexGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        // A poisoned lock only means another test thread panicked.
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_read_only(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        self.read_only.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.lock_files()
            .get(path)
            .cloned()
            .ok_or_else(|| StylepipeError::MissingInput(path.to_path_buf()))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if self.lock_read_only().contains(path) {
            return Err(StylepipeError::WriteError {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only in mock"),
            });
        }
        self.lock_files().insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        self.lock_files().remove(path);
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        self.lock_files().contains_key(path)
    }
}

// file: src/models/target.rs
// description: resolved backup destination path

use crate::error::{Result, SyncError};
use std::path::{Path, PathBuf};

/// Backup destination. Construction resolves the path and fails when it does
/// not exist, so every `Target` names a real directory for the whole run.
#[derive(Debug, Clone)]
pub struct Target {
    path: PathBuf,
}

impl Target {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let raw = path.as_ref();
        let path = raw.canonicalize().map_err(|_| {
            SyncError::Config(format!("Target dir {} does not exist", raw.display()))
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when `other` is the target path itself or lies underneath it.
    /// Used to detect a backup that targets its own source tree.
    pub fn contains(&self, other: &Path) -> bool {
        other.starts_with(&self.path)
    }
}

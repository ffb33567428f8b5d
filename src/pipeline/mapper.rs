// file: src/pipeline/mapper.rs
// description: maps a source repository path to its destination counterpart

use crate::error::{Result, SyncError};
use crate::models::Target;
use std::path::{Path, PathBuf};

/// Destination path for a repository: the target joined with the repository's
/// path relative to the source root. A repository outside the source root
/// breaks the scanner invariant and surfaces as a `PathMapping` error.
pub fn map_to_target(repo_path: &Path, source_root: &Path, target: &Target) -> Result<PathBuf> {
    let relative = repo_path
        .strip_prefix(source_root)
        .map_err(|_| SyncError::PathMapping {
            path: repo_path.to_path_buf(),
            root: source_root.to_path_buf(),
        })?;
    Ok(target.path().join(relative))
}

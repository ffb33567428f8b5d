// file: src/mirror.rs
// description: bulk file mirroring via rsync, excluding repository subtrees
// reference: rsync(1)

use crate::error::{Result, SyncError};
use crate::models::{BackupFolder, Target};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

// --modify-window=2 tolerates FAT's 2-second timestamp resolution.
const RSYNC_OPTIONS: &[&str] = &[
    "-a",
    "-v",
    "--whole-file",
    "--delete",
    "--stats",
    "--progress",
    "--modify-window=2",
];

/// Thin wrapper around rsync. One invocation per backup folder, with every
/// discovered repository excluded — those are synchronized by their backend,
/// not by raw copy. Arguments are passed as a vector, never through a shell.
pub struct Mirror<'a> {
    home: &'a Path,
    target: &'a Target,
}

impl<'a> Mirror<'a> {
    pub fn new(home: &'a Path, target: &'a Target) -> Self {
        Self { home, target }
    }

    pub fn sync(&self, backup_folders: &[BackupFolder], dry_run: bool) -> Result<()> {
        for folder in backup_folders {
            let excludes = folder.relative_repo_paths();
            info!(
                "{} repositories to exclude in {}",
                excludes.len(),
                folder.path().display()
            );

            let args = build_args(&excludes, dry_run, &folder.path(), self.target.path());
            debug!("Running rsync {:?} in {}", args, self.home.display());

            let status = Command::new("rsync")
                .args(&args)
                .current_dir(self.home)
                .status()
                .map_err(|e| SyncError::Mirror(format!("Failed to run rsync: {e}")))?;

            if !status.success() {
                return Err(SyncError::Mirror(format!(
                    "rsync exited with {} for {}",
                    status,
                    folder.path().display()
                )));
            }
        }
        Ok(())
    }
}

fn build_args(
    excludes: &[std::path::PathBuf],
    dry_run: bool,
    source: &Path,
    dest: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = RSYNC_OPTIONS.iter().map(OsString::from).collect();
    if dry_run {
        args.push(OsString::from("-n"));
    }
    for path in excludes {
        let mut exclude = OsString::from("--exclude=");
        exclude.push(path);
        args.push(exclude);
    }
    args.push(source.into());
    args.push(dest.into());
    args
}

// file: src/pipeline/orchestrator.rs
// description: coordinates scanning, staleness filtering and repository updates

use crate::error::Result;
use crate::models::{BackupFolder, Target};
use crate::pipeline::executor::{UpdateAction, UpdateExecutor};
use crate::pipeline::staleness::filter_stale;
use crate::repository::{RepoDescriptor, RepoScanner};
use std::path::PathBuf;
use tracing::{info, warn};

/// Counters for the final run report, plus whether the caller should skip
/// the bulk mirror step.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub discovered: usize,
    pub stale: usize,
    pub pulled: usize,
    pub cloned: usize,
    pub skip_mirror: bool,
}

pub struct SyncOrchestrator {
    home: PathBuf,
}

impl SyncOrchestrator {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// One full repository pass: scan every backup folder, flatten the
    /// discoveries, drop everything at or before the cutoff, then update the
    /// survivors in discovery order. Updates run strictly sequentially and
    /// the first failure aborts the run.
    pub fn run(
        &self,
        backup_folders: &mut [BackupFolder],
        target: &Target,
        cutoff: i64,
        dry_run: bool,
    ) -> Result<RunSummary> {
        for folder in backup_folders.iter_mut() {
            RepoScanner::scan(folder)?;
        }

        let all_repos: Vec<RepoDescriptor> = backup_folders
            .iter()
            .flat_map(|folder| folder.repos().iter().cloned())
            .collect();
        let discovered = all_repos.len();
        info!("{} repositories found across all backup folders", discovered);

        // A destination at or above the source root would back the tree up
        // into itself. Update the source repositories in place instead and
        // tell the caller to skip the mirror pass.
        let in_place_target;
        let (target, skip_mirror) = if target.contains(&self.home) {
            warn!(
                "Target {} contains the source root {}; updating repositories in place",
                target.path().display(),
                self.home.display()
            );
            in_place_target = Target::new(&self.home)?;
            (&in_place_target, true)
        } else {
            (target, false)
        };

        let stale = filter_stale(all_repos, cutoff)?;
        info!(
            "{} repositories need updating on {}",
            stale.len(),
            target.path().display()
        );

        let executor = UpdateExecutor::new(&self.home, target, dry_run);
        let mut summary = RunSummary {
            discovered,
            stale: stale.len(),
            skip_mirror,
            ..RunSummary::default()
        };
        for repo in &stale {
            match executor.update(repo)? {
                UpdateAction::Pulled => summary.pulled += 1,
                UpdateAction::Cloned => summary.cloned += 1,
            }
        }

        Ok(summary)
    }
}

// file: src/pipeline/executor.rs
// description: per-repository pull-vs-clone decision and execution

use crate::error::Result;
use crate::models::Target;
use crate::pipeline::mapper::map_to_target;
use crate::repository::RepoDescriptor;
use std::path::Path;
use tracing::info;

/// Terminal state of one repository update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    Pulled,
    Cloned,
}

pub struct UpdateExecutor<'a> {
    source_root: &'a Path,
    target: &'a Target,
    dry_run: bool,
}

impl<'a> UpdateExecutor<'a> {
    pub fn new(source_root: &'a Path, target: &'a Target, dry_run: bool) -> Self {
        Self {
            source_root,
            target,
            dry_run,
        }
    }

    /// Update one repository on the target: pull when the mapped destination
    /// already exists, clone from the source's remote when it does not.
    ///
    /// In dry-run mode the decision is still computed and logged — including
    /// the remote-URL lookup the clone report depends on, which is a local
    /// query — but the mutating step is skipped.
    pub fn update(&self, repo: &RepoDescriptor) -> Result<UpdateAction> {
        let dest = map_to_target(repo.path(), self.source_root, self.target)?;

        if dest.exists() {
            info!(
                "{} repository {} found on target — pull into {}",
                repo.kind().name(),
                repo.path().display(),
                dest.display()
            );
            if self.dry_run {
                info!("Dry run: pull skipped for {}", dest.display());
            } else {
                repo.pull_or_reset(&dest)?;
            }
            Ok(UpdateAction::Pulled)
        } else {
            let url = repo.resolve_remote_url()?;
            info!(
                "{} repository {} not on target — clone from {} into {}",
                repo.kind().name(),
                repo.path().display(),
                url,
                dest.display()
            );
            if self.dry_run {
                info!("Dry run: clone skipped for {}", dest.display());
            } else {
                repo.clone_to(&url, &dest)?;
            }
            Ok(UpdateAction::Cloned)
        }
    }
}

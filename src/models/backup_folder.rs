// file: src/models/backup_folder.rs
// description: one configured source subtree and the repositories found in it

use crate::repository::RepoDescriptor;
use std::path::{Path, PathBuf};

/// A subtree of the source root selected for backup. `repos` is empty until
/// the scanner has run and only ever holds descriptors located underneath
/// this folder's path.
#[derive(Debug, Clone)]
pub struct BackupFolder {
    root: PathBuf,
    relative_path: PathBuf,
    repos: Vec<RepoDescriptor>,
}

impl BackupFolder {
    pub fn new(root: impl Into<PathBuf>, relative_path: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            relative_path: relative_path.into(),
            repos: Vec::new(),
        }
    }

    /// Absolute path of this folder on the source side.
    pub fn path(&self) -> PathBuf {
        self.root.join(&self.relative_path)
    }

    pub fn repos(&self) -> &[RepoDescriptor] {
        &self.repos
    }

    pub fn has_repos(&self) -> bool {
        !self.repos.is_empty()
    }

    /// Repository paths relative to this folder, the exclusion set handed to
    /// the bulk mirror step.
    pub fn relative_repo_paths(&self) -> Vec<PathBuf> {
        let base = self.path();
        self.repos
            .iter()
            .filter_map(|repo| repo.path().strip_prefix(&base).ok())
            .map(Path::to_path_buf)
            .collect()
    }

    pub(crate) fn push_repo(&mut self, repo: RepoDescriptor) {
        self.repos.push(repo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::BackendKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn path_joins_root_and_relative() {
        let folder = BackupFolder::new("/home/user", "Development");
        assert_eq!(folder.path(), PathBuf::from("/home/user/Development"));
        assert!(!folder.has_repos());
    }

    #[test]
    fn relative_repo_paths_strip_the_folder_prefix() {
        let mut folder = BackupFolder::new("/home/user", "Development");
        folder.push_repo(RepoDescriptor::new(
            PathBuf::from("/home/user/Development/tools/repo"),
            BackendKind::Git,
        ));

        assert_eq!(
            folder.relative_repo_paths(),
            vec![PathBuf::from("tools/repo")]
        );
    }

    #[test]
    fn relative_repo_paths_empty_without_repos() {
        let folder = BackupFolder::new("/home/user", "Pictures");
        assert!(folder.relative_repo_paths().is_empty());
    }
}

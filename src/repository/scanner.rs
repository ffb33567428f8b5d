// file: src/repository/scanner.rs
// description: directory walking and repository root classification
// reference: https://docs.rs/walkdir

use crate::error::{Result, SyncError};
use crate::models::BackupFolder;
use crate::repository::backend::{BackendKind, RepoDescriptor};
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

const SVN_MARKER: &str = ".svn";

pub struct RepoScanner;

impl RepoScanner {
    /// Walk the folder's subtree top-down and record every repository root.
    /// Entries are visited in lexicographic order so discovery order is
    /// deterministic. Once a repository root is found its subtree is never
    /// descended into, so repositories cannot nest.
    pub fn scan(folder: &mut BackupFolder) -> Result<()> {
        let root = folder.path();
        info!("Scanning {} for repositories", root.display());

        let mut walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|e| SyncError::Discovery {
                path: e.path().unwrap_or(&root).to_path_buf(),
                source: e,
            })?;

            if !entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            if let Some(kind) = classify(path) {
                debug!("Found {} repository at {}", kind.name(), path.display());
                folder.push_repo(RepoDescriptor::new(path.to_path_buf(), kind));
                walker.skip_current_dir();
            } else if path.join(SVN_MARKER).is_dir() {
                // Subversion checkouts are recognized but unsupported: prune
                // the subtree without recording a descriptor.
                debug!(
                    "Skipping unsupported Subversion checkout at {}",
                    path.display()
                );
                walker.skip_current_dir();
            }
        }

        info!(
            "Found {} repositories in {}",
            folder.repos().len(),
            root.display()
        );
        Ok(())
    }
}

fn classify(dir: &Path) -> Option<BackendKind> {
    for kind in [BackendKind::Git, BackendKind::Mercurial] {
        if dir.join(kind.marker()).is_dir() {
            return Some(kind);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn mark_repo(base: &Path, rel: &str, marker: &str) {
        fs::create_dir_all(base.join(rel).join(marker)).unwrap();
    }

    fn scan_folder(root: &Path, rel: &str) -> BackupFolder {
        let mut folder = BackupFolder::new(root, rel);
        RepoScanner::scan(&mut folder).unwrap();
        folder
    }

    #[test]
    fn finds_git_and_hg_repositories() {
        let temp = TempDir::new().unwrap();
        mark_repo(temp.path(), "dev/alpha", ".git");
        mark_repo(temp.path(), "dev/beta", ".hg");

        let folder = scan_folder(temp.path(), "dev");

        let kinds: Vec<BackendKind> = folder.repos().iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec![BackendKind::Git, BackendKind::Mercurial]);
        assert_eq!(
            folder.relative_repo_paths(),
            vec![PathBuf::from("alpha"), PathBuf::from("beta")]
        );
    }

    #[test]
    fn never_records_nested_repositories() {
        let temp = TempDir::new().unwrap();
        mark_repo(temp.path(), "dev/outer", ".git");
        mark_repo(temp.path(), "dev/outer/vendored/inner", ".git");

        let folder = scan_folder(temp.path(), "dev");

        assert_eq!(folder.repos().len(), 1);
        assert_eq!(folder.repos()[0].path(), temp.path().join("dev/outer"));
    }

    #[test]
    fn folder_root_itself_can_be_a_repository() {
        let temp = TempDir::new().unwrap();
        mark_repo(temp.path(), "dev", ".git");
        mark_repo(temp.path(), "dev/sub", ".git");

        let folder = scan_folder(temp.path(), "dev");

        assert_eq!(folder.repos().len(), 1);
        assert_eq!(folder.repos()[0].path(), temp.path().join("dev"));
    }

    #[test]
    fn svn_checkouts_are_skipped_without_a_descriptor() {
        let temp = TempDir::new().unwrap();
        mark_repo(temp.path(), "dev/legacy", ".svn");
        mark_repo(temp.path(), "dev/legacy/sub", ".git");
        mark_repo(temp.path(), "dev/current", ".git");

        let folder = scan_folder(temp.path(), "dev");

        assert_eq!(folder.repos().len(), 1);
        assert_eq!(folder.repos()[0].path(), temp.path().join("dev/current"));
    }

    #[test]
    fn discovery_order_is_lexicographic() {
        let temp = TempDir::new().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            mark_repo(temp.path(), &format!("dev/{name}"), ".git");
        }

        let folder = scan_folder(temp.path(), "dev");

        assert_eq!(
            folder.relative_repo_paths(),
            vec![
                PathBuf::from("alpha"),
                PathBuf::from("mid"),
                PathBuf::from("zeta")
            ]
        );
    }

    #[test]
    fn empty_tree_yields_no_repositories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("dev/just/files")).unwrap();
        fs::write(temp.path().join("dev/just/files/note.txt"), "hi").unwrap();

        let folder = scan_folder(temp.path(), "dev");

        assert!(!folder.has_repos());
    }
}

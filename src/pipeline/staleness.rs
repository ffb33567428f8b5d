// file: src/pipeline/staleness.rs
// description: partitions discovered repositories by last-activity cutoff

use crate::error::Result;
use crate::repository::RepoDescriptor;
use tracing::debug;

/// Keep every repository whose latest local activity is strictly newer than
/// `cutoff`. Equality means the repository was already synchronized at the
/// cutoff instant. Every repository is queried; staleness cannot be decided
/// without reading its commit metadata.
pub fn filter_stale(repos: Vec<RepoDescriptor>, cutoff: i64) -> Result<Vec<RepoDescriptor>> {
    filter_with(repos, cutoff, RepoDescriptor::latest_activity_timestamp)
}

fn filter_with<F>(repos: Vec<RepoDescriptor>, cutoff: i64, probe: F) -> Result<Vec<RepoDescriptor>>
where
    F: Fn(&RepoDescriptor) -> Result<i64>,
{
    let mut stale = Vec::new();
    for repo in repos {
        let last_activity = probe(&repo)?;
        if last_activity > cutoff {
            debug!(
                "{} repository {} last active at {} — needs update",
                repo.kind().name(),
                repo.path().display(),
                last_activity
            );
            stale.push(repo);
        } else {
            debug!(
                "{} repository {} up to date (last activity {} <= cutoff {})",
                repo.kind().name(),
                repo.path().display(),
                last_activity,
                cutoff
            );
        }
    }
    Ok(stale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::repository::BackendKind;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn repo(name: &str) -> RepoDescriptor {
        RepoDescriptor::new(PathBuf::from("/src").join(name), BackendKind::Git)
    }

    #[test]
    fn strictly_newer_activity_is_stale() {
        let repos = vec![repo("old"), repo("fresh")];
        let stale = filter_with(repos, 100, |r| {
            Ok(if r.path().ends_with("fresh") { 101 } else { 99 })
        })
        .unwrap();

        assert_eq!(stale.len(), 1);
        assert!(stale[0].path().ends_with("fresh"));
    }

    #[test]
    fn activity_equal_to_cutoff_is_already_synchronized() {
        let stale = filter_with(vec![repo("boundary")], 100, |_| Ok(100)).unwrap();
        assert!(stale.is_empty());
    }

    #[test]
    fn query_failure_aborts_the_filter() {
        let result = filter_with(vec![repo("broken")], 0, |_| {
            Err(SyncError::BackendQuery("no heads".into()))
        });
        assert!(matches!(result, Err(SyncError::BackendQuery(_))));
    }

    #[test]
    fn order_of_survivors_is_preserved() {
        let repos = vec![repo("a"), repo("b"), repo("c")];
        let stale = filter_with(repos, 0, |_| Ok(1)).unwrap();

        let names: Vec<_> = stale
            .iter()
            .map(|r| r.path().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}

// file: src/repository/backend.rs
// description: Git and Mercurial backend operations via external clients
// reference: git-remote(1), git-for-each-ref(1), hg(1) templates

use crate::error::{Result, SyncError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use tracing::debug;

const GIT_FALLBACK_BRANCH: &str = "master";

static HEAD_BRANCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HEAD branch:\s*(\S+)").expect("valid head-branch pattern"));

/// Version-control system governing a repository. A closed set: adding a
/// backend means adding a variant and extending every match below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Git,
    Mercurial,
}

impl BackendKind {
    /// Directory marker that identifies a repository root of this kind.
    pub fn marker(self) -> &'static str {
        match self {
            BackendKind::Git => ".git",
            BackendKind::Mercurial => ".hg",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Git => "Git",
            BackendKind::Mercurial => "Mercurial",
        }
    }
}

/// Discovered identity of one repository: where it lives on the source side
/// and which backend drives it. Immutable after discovery.
#[derive(Debug, Clone)]
pub struct RepoDescriptor {
    path: PathBuf,
    kind: BackendKind,
}

impl RepoDescriptor {
    pub fn new(path: PathBuf, kind: BackendKind) -> Self {
        Self { path, kind }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Most recent commit time across all local heads, as a unix timestamp.
    /// Reads only locally known history; never touches the network.
    pub fn latest_activity_timestamp(&self) -> Result<i64> {
        match self.kind {
            BackendKind::Git => {
                let out = query(
                    &self.path,
                    "git",
                    &["for-each-ref", "--format=%(committerdate:unix)", "refs/heads"],
                )?;
                max_unix_timestamp(&out).ok_or_else(|| {
                    SyncError::BackendQuery(format!(
                        "No local heads in Git repository {}",
                        self.path.display()
                    ))
                })
            }
            BackendKind::Mercurial => {
                let out = query(&self.path, "hg", &["heads", "--template", "{date|hgdate}\n"])?;
                max_hgdate_timestamp(&out).ok_or_else(|| {
                    SyncError::BackendQuery(format!(
                        "No heads in Mercurial repository {}",
                        self.path.display()
                    ))
                })
            }
        }
    }

    /// Fetch URL of the default remote: `origin` for Git, the `default` path
    /// entry for Mercurial. A repository without one cannot be cloned to the
    /// destination, so this fails rather than returning an empty string.
    pub fn resolve_remote_url(&self) -> Result<String> {
        let out = match self.kind {
            BackendKind::Git => query(&self.path, "git", &["remote", "get-url", "origin"])?,
            BackendKind::Mercurial => query(&self.path, "hg", &["paths", "default"])?,
        };
        let url = out.lines().next().unwrap_or("").trim();
        if url.is_empty() {
            return Err(SyncError::BackendQuery(format!(
                "No default remote configured for {} repository {}",
                self.kind.name(),
                self.path.display()
            )));
        }
        Ok(url.to_string())
    }

    /// Create a fresh repository at `dest` by cloning from `url`.
    pub fn clone_to(&self, url: &str, dest: &Path) -> Result<()> {
        match self.kind {
            BackendKind::Git => {
                let dest_arg = dest.to_string_lossy();
                mutate(None, "git", &["clone", url, &*dest_arg])
            }
            BackendKind::Mercurial => {
                // hg addresses the clone target relative to its parent.
                let parent = dest.parent().ok_or_else(|| {
                    SyncError::BackendMutation(format!(
                        "Clone destination {} has no parent directory",
                        dest.display()
                    ))
                })?;
                let name = dest.file_name().ok_or_else(|| {
                    SyncError::BackendMutation(format!(
                        "Clone destination {} has no directory name",
                        dest.display()
                    ))
                })?;
                std::fs::create_dir_all(parent)?;
                let name_arg = name.to_string_lossy();
                mutate(Some(parent), "hg", &["clone", url, &*name_arg])
            }
        }
    }

    /// Bring the existing repository at `dest` in line with its remote's
    /// current default branch. Destructive: local changes at the destination
    /// are discarded, never merged.
    pub fn pull_or_reset(&self, dest: &Path) -> Result<()> {
        match self.kind {
            BackendKind::Git => {
                mutate(Some(dest), "git", &["fetch", "--all", "--prune"])?;
                let branch = git_default_branch(dest);
                debug!("Resetting {} to origin/{}", dest.display(), branch);
                mutate(
                    Some(dest),
                    "git",
                    &["reset", "--hard", &format!("origin/{branch}")],
                )
            }
            BackendKind::Mercurial => {
                mutate(Some(dest), "hg", &["pull"])?;
                mutate(Some(dest), "hg", &["update"])
            }
        }
    }
}

/// Default branch of the destination's origin remote, parsed from
/// `git remote show origin`. Falls back to `master` when the query fails or
/// the output carries no `HEAD branch:` line.
fn git_default_branch(dest: &Path) -> String {
    let output = Command::new("git")
        .args(["remote", "show", "origin"])
        .env("LANG", "en_US.UTF-8")
        .current_dir(dest)
        .output();

    match output {
        Ok(out) if out.status.success() => {
            parse_default_branch(&String::from_utf8_lossy(&out.stdout))
        }
        _ => GIT_FALLBACK_BRANCH.to_string(),
    }
}

fn parse_default_branch(remote_info: &str) -> String {
    HEAD_BRANCH_RE
        .captures(remote_info)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| GIT_FALLBACK_BRANCH.to_string(), |m| m.as_str().to_string())
}

/// Max over lines of plain unix timestamps (`for-each-ref` output).
fn max_unix_timestamp(out: &str) -> Option<i64> {
    out.lines().filter_map(|line| line.trim().parse::<i64>().ok()).max()
}

/// Max over hgdate lines, which look like `1700000000 -3600`: unix time
/// followed by the timezone offset.
fn max_hgdate_timestamp(out: &str) -> Option<i64> {
    out.lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter_map(|token| token.parse::<f64>().ok())
        .map(|secs| secs as i64)
        .max()
}

/// Run a metadata query, capturing stdout. Non-zero exit is a query failure.
fn query(cwd: &Path, program: &str, args: &[&str]) -> Result<String> {
    debug!("Querying: {} {} in {}", program, args.join(" "), cwd.display());
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| SyncError::BackendQuery(format!("Failed to run {program}: {e}")))?;

    if !output.status.success() {
        return Err(SyncError::BackendQuery(format!(
            "{} {} exited with {} in {}",
            program,
            args.join(" "),
            output.status,
            cwd.display()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a mutating command with inherited stdio so the external client's
/// progress output stays visible.
fn mutate(cwd: Option<&Path>, program: &str, args: &[&str]) -> Result<()> {
    debug!("Running: {} {}", program, args.join(" "));
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(cwd) = cwd {
        cmd.current_dir(cwd);
    }

    let status = cmd
        .status()
        .map_err(|e| SyncError::BackendMutation(format!("Failed to run {program}: {e}")))?;

    if !status.success() {
        return Err(SyncError::BackendMutation(format!(
            "{} {} exited with {}",
            program,
            args.join(" "),
            status
        )));
    }
    Ok(())
}

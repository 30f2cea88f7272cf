//! Git plumbing: fork-point resolution, change listing, and content
//! retrieval at a revision.
//!
//! Thin subprocess wrappers with no retries. Every failure carries the
//! git stderr so the user sees the underlying cause.

use std::path::{Path, PathBuf};
use std::process::Command;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// Git failure taxonomy for user-visible reporting.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("git executable not found in PATH")]
    NotFound,

    #[error("unexpected git version output: {0}")]
    BadVersion(String),

    #[error("no common history between {parent} and {current}: {stderr}")]
    NoForkPoint {
        parent: String,
        current: String,
        stderr: String,
    },

    #[error("{path} did not exist at revision {revision}: {stderr}")]
    MissingAtRevision {
        path: Utf8PathBuf,
        revision: String,
        stderr: String,
    },

    #[error("git {command} failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git produced non-UTF-8 output")]
    BadEncoding,
}

/// Handle on the repository at a fixed root directory.
pub struct Repo {
    root: PathBuf,
}

impl Repo {
    /// Open the repository at `root`, verifying a usable git executable.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, GitError> {
        detect_git_executable()?;
        Ok(Self { root: root.into() })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The common ancestor of `parent` and `current`.
    pub fn merge_base(&self, parent: &str, current: &str) -> Result<String, GitError> {
        let output = self.git(&["merge-base", parent, current])?;
        if !output.status.success() {
            return Err(GitError::NoForkPoint {
                parent: parent.to_owned(),
                current: current.to_owned(),
                stderr: stderr_of(&output),
            });
        }

        let hash = stdout_of(&output)?.trim().to_owned();
        debug!("fork point of {parent}..{current} is {hash}");
        Ok(hash)
    }

    /// Paths that differ between two revisions, in git's reported order.
    ///
    /// Output is CRLF-normalized and empty lines are discarded.
    pub fn changed_paths(&self, from: &str, to: &str) -> Result<Vec<Utf8PathBuf>, GitError> {
        let output = self.git(&["diff", "--name-only", from, to])?;
        if !output.status.success() {
            return Err(GitError::Command {
                command: format!("diff --name-only {from} {to}"),
                stderr: stderr_of(&output),
            });
        }

        let paths = stdout_of(&output)?
            .replace("\r\n", "\n")
            .lines()
            .filter(|line| !line.is_empty())
            .map(Utf8PathBuf::from)
            .collect();
        Ok(paths)
    }

    /// File content as it existed at `revision`.
    pub fn show_at(&self, revision: &str, path: &Utf8Path) -> Result<String, GitError> {
        let spec = format!("{revision}:{path}");
        let output = self.git(&["show", &spec])?;
        if !output.status.success() {
            return Err(GitError::MissingAtRevision {
                path: path.to_owned(),
                revision: revision.to_owned(),
                stderr: stderr_of(&output),
            });
        }

        stdout_of(&output)
    }

    fn git(&self, args: &[&str]) -> Result<std::process::Output, GitError> {
        debug!("git {}", args.join(" "));
        Ok(Command::new("git")
            .current_dir(&self.root)
            .args(args)
            .output()?)
    }
}

/// Verify a git executable is reachable and plausible.
fn detect_git_executable() -> Result<(), GitError> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .map_err(|_| GitError::NotFound)?;

    if !output.status.success() {
        return Err(GitError::BadVersion(stderr_of(&output)));
    }

    let version = String::from_utf8_lossy(&output.stdout);
    if !version.contains("git version") {
        return Err(GitError::BadVersion(version.into_owned()));
    }

    Ok(())
}

fn stdout_of(output: &std::process::Output) -> Result<String, GitError> {
    String::from_utf8(output.stdout.clone()).map_err(|_| GitError::BadEncoding)
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_owned()
}

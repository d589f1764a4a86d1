//! Git operations for publishing the update branch.
//!
//! Commands are built as argument vectors and run with the working
//! directory as their cwd; nothing here goes through a shell.

mod error;
mod status;

pub use error::GitError;
pub use status::{changed_paths, select_tracked};

use crate::request::CREDENTIAL_ENV_VARS;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Author name used when no identity is configured.
pub const DEFAULT_AUTHOR_NAME: &str = "github-actions[bot]";

/// Author email used when no identity is configured.
pub const DEFAULT_AUTHOR_EMAIL: &str = "41898282+github-actions[bot]@users.noreply.github.com";

/// Remote pushed to when none is configured.
pub const DEFAULT_REMOTE: &str = "origin";

/// Commit identity of the automation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    /// Author and committer name.
    pub name: String,
    /// Author and committer email.
    pub email: String,
}

impl Default for CommitIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_AUTHOR_NAME.to_string(),
            email: DEFAULT_AUTHOR_EMAIL.to_string(),
        }
    }
}

/// The version-control operations the publisher needs.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Returns the short-form status of exactly `paths`.
    async fn status(&self, paths: &[&str], cwd: &Path) -> Result<String, GitError>;

    /// Sets the commit identity in the local repository configuration.
    async fn configure_identity(&self, identity: &CommitIdentity, cwd: &Path)
        -> Result<(), GitError>;

    /// Creates `name` from the current checkout, resetting it if it exists.
    async fn create_branch(&self, name: &str, cwd: &Path) -> Result<(), GitError>;

    /// Stages exactly `paths`.
    async fn stage(&self, paths: &[&str], cwd: &Path) -> Result<(), GitError>;

    /// Commits the staged changes.
    async fn commit(&self, message: &str, cwd: &Path) -> Result<(), GitError>;

    /// Pushes the current HEAD to `branch` on the remote.
    async fn push(&self, branch: &str, force: bool, cwd: &Path) -> Result<(), GitError>;
}

/// [`VersionControl`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    remote: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(DEFAULT_REMOTE)
    }
}

impl GitCli {
    /// Creates a git runner pushing to `remote`.
    pub fn new(remote: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
        }
    }

    /// Returns the remote pushed to.
    #[must_use]
    pub fn remote(&self) -> &str {
        &self.remote
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn status(&self, paths: &[&str], cwd: &Path) -> Result<String, GitError> {
        let mut args = vec!["status", "--porcelain", "--"];
        args.extend_from_slice(paths);
        run_git_command(cwd, &args).await
    }

    async fn configure_identity(
        &self,
        identity: &CommitIdentity,
        cwd: &Path,
    ) -> Result<(), GitError> {
        run_git_command(cwd, &["config", "--local", "user.name", &identity.name]).await?;
        run_git_command(cwd, &["config", "--local", "user.email", &identity.email]).await?;
        Ok(())
    }

    async fn create_branch(&self, name: &str, cwd: &Path) -> Result<(), GitError> {
        run_git_command(cwd, &["checkout", "-B", name]).await?;
        Ok(())
    }

    async fn stage(&self, paths: &[&str], cwd: &Path) -> Result<(), GitError> {
        let mut args = vec!["add", "--"];
        args.extend_from_slice(paths);
        run_git_command(cwd, &args).await?;
        Ok(())
    }

    async fn commit(&self, message: &str, cwd: &Path) -> Result<(), GitError> {
        run_git_command(cwd, &["commit", "-m", message]).await?;
        Ok(())
    }

    async fn push(&self, branch: &str, force: bool, cwd: &Path) -> Result<(), GitError> {
        let refspec = format!("HEAD:refs/heads/{branch}");
        let mut args = vec!["push"];
        if force {
            args.push("--force");
        }
        args.push(&self.remote);
        args.push(&refspec);
        run_git_command(cwd, &args).await?;
        Ok(())
    }
}

/// Runs a git command and returns its stdout.
async fn run_git_command(cwd: &Path, args: &[&str]) -> Result<String, GitError> {
    debug!(args = %args.join(" "), cwd = %cwd.display(), "Running git");

    let mut command = Command::new("git");
    command
        .args(args)
        .current_dir(cwd)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    for name in CREDENTIAL_ENV_VARS {
        command.env_remove(name);
    }

    let output = command
        .output()
        .await
        .map_err(|source| GitError::Spawn {
            command: args.join(" "),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::Failed {
            command: args.join(" "),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

//! Dependency update command execution.
//!
//! The update command is an opaque step: it may rewrite the manifest and
//! lockfile in place, and only its exit status is interpreted.

mod error;
mod package_manager;

pub use error::UpdateError;
pub use package_manager::{PackageManager, UnknownPackageManager, MANIFEST};

use crate::request::CREDENTIAL_ENV_VARS;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

/// Default limit for the update command.
pub const DEFAULT_UPDATE_TIMEOUT_SECS: u64 = 300;

/// Longest stderr excerpt carried in an [`UpdateError`].
const STDERR_EXCERPT_CHARS: usize = 2000;

/// Runs the dependency update for a working directory.
#[async_trait]
pub trait DependencyUpdater: Send + Sync {
    /// Runs the update command with `working_directory` as its cwd.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError`] if the command cannot start, exits
    /// unsuccessfully, or exceeds its time limit.
    async fn update(&self, working_directory: &Path) -> Result<(), UpdateError>;
}

/// Runs the update command as a child process.
///
/// The command is an argument vector and is never handed to a shell.
#[derive(Debug, Clone)]
pub struct ProcessUpdater {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessUpdater {
    /// Creates an updater running `package_manager`'s update command.
    #[must_use]
    pub fn for_package_manager(package_manager: PackageManager, timeout: Duration) -> Self {
        Self {
            program: package_manager.program().to_string(),
            args: package_manager
                .update_args()
                .iter()
                .map(ToString::to_string)
                .collect(),
            timeout,
        }
    }

    /// Creates an updater running an explicit command.
    ///
    /// Returns `None` if `command` is empty.
    #[must_use]
    pub fn from_command(command: &[String], timeout: Duration) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }

    /// Returns the executable name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the command arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl DependencyUpdater for ProcessUpdater {
    async fn update(&self, working_directory: &Path) -> Result<(), UpdateError> {
        info!(
            program = %self.program,
            args = %self.args.join(" "),
            cwd = %working_directory.display(),
            "Running dependency update"
        );

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .current_dir(working_directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        for name in CREDENTIAL_ENV_VARS {
            command.env_remove(name);
        }

        let child = command
            .spawn()
            .map_err(|source| UpdateError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| UpdateError::Timeout {
                program: self.program.clone(),
                timeout_secs: self.timeout.as_secs(),
            })?
            .map_err(|source| UpdateError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            debug!(target: "updater", "{line}");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(UpdateError::Failed {
                program: self.program.clone(),
                exit_code: output.status.code(),
                stderr: excerpt(stderr.trim()),
            });
        }

        Ok(())
    }
}

/// Keeps the tail of long command output, where the actual error usually is.
fn excerpt(text: &str) -> String {
    let count = text.chars().count();
    if count <= STDERR_EXCERPT_CHARS {
        return text.to_string();
    }
    let tail: String = text.chars().skip(count - STDERR_EXCERPT_CHARS).collect();
    format!("...{tail}")
}

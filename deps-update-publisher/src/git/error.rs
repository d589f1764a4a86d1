//! Git command error types.

use thiserror::Error;

/// Errors that can occur while running git.
#[derive(Debug, Error)]
pub enum GitError {
    /// git could not be started.
    #[error("Failed to execute git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// git exited unsuccessfully.
    #[error("git {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}

//! Dependency update error types.

use thiserror::Error;

/// Errors that can occur while running the dependency update command.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The command could not be started.
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The command exited unsuccessfully.
    #[error("'{program}' exited with {}: {stderr}", describe_exit(.exit_code))]
    Failed {
        program: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The command did not finish in time and was killed.
    #[error("'{program}' timed out after {timeout_secs} seconds")]
    Timeout { program: String, timeout_secs: u64 },
}

impl UpdateError {
    /// Returns the process exit code, if the process exited on its own.
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Failed { exit_code, .. } => *exit_code,
            Self::Spawn { .. } | Self::Timeout { .. } => None,
        }
    }
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    }
}

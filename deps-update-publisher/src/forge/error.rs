//! Forge error types.

use thiserror::Error;

/// Errors that can occur while opening a pull request.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// A pull request between the same branches is already open.
    #[error("A pull request from '{head}' into '{base}' already exists")]
    AlreadyExists { head: String, base: String },

    /// The credential cannot open pull requests on the repository.
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    /// The API did not answer in time.
    #[error("GitHub API did not respond within {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Any other GitHub API or transport error.
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),
}

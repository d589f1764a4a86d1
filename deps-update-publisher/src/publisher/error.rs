//! Publish cycle error types.

use crate::request::InvalidInput;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that end a publish cycle.
///
/// Every variant is terminal for the run; none is retried.
#[derive(Debug, Error)]
pub enum PublishError {
    /// An input failed validation; nothing external ran.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// The dependency update command failed; no git or network side effects.
    #[error("Dependency update failed: {reason}")]
    UpdateCommandFailed {
        exit_code: Option<i32>,
        reason: String,
    },

    /// A git step failed.
    #[error("git {step} failed: {message}")]
    Git { step: &'static str, message: String },

    /// A commit or pull request template failed to render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The branch was pushed but the pull request could not be opened.
    #[error("Failed to create pull request: {reason}")]
    PublishFailed { reason: String },
}

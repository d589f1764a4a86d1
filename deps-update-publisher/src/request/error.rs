//! Request validation error types.

use std::fmt;
use thiserror::Error;

/// The action input that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// `base-branch`
    BaseBranch,
    /// `target-branch`
    TargetBranch,
    /// `working-directory`
    WorkingDirectory,
    /// `github-token`
    GithubToken,
}

impl InputField {
    /// Returns the input name as declared by the action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BaseBranch => "base-branch",
            Self::TargetBranch => "target-branch",
            Self::WorkingDirectory => "working-directory",
            Self::GithubToken => "github-token",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request input was rejected before any external command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid input: {field}")]
pub struct InvalidInput {
    /// The offending input.
    pub field: InputField,
}

impl From<InputField> for InvalidInput {
    fn from(field: InputField) -> Self {
        Self { field }
    }
}

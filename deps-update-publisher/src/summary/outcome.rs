//! Terminal outcome of a successful run.

use serde::Serialize;

/// How a publish cycle finished when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The update left the manifest and lockfile untouched.
    NoChanges,

    /// The update was committed, pushed, and proposed.
    PullRequestCreated {
        /// Pull request number.
        number: u64,
        /// Pull request URL.
        url: String,
    },

    /// Dry run: changes were found but nothing was published.
    ChangesDetected {
        /// Paths reported by the status check.
        changed_files: Vec<String>,
    },
}

impl Outcome {
    /// Returns the status as a string for outputs and summaries.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoChanges => "no_changes",
            Self::PullRequestCreated { .. } => "pull_request_created",
            Self::ChangesDetected { .. } => "changes_detected",
        }
    }

    /// Returns true if the update changed the manifest or lockfile.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !matches!(self, Self::NoChanges)
    }

    /// Returns the pull request URL if one was created.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::PullRequestCreated { url, .. } => Some(url),
            _ => None,
        }
    }
}

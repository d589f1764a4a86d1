//! Update request model and input validation.
//!
//! Every value in an [`UpdateRequest`] eventually lands in a process argument
//! list or a working directory, so validation runs before anything external
//! is touched and rejects the first bad input it meets.

mod error;
mod secret;

pub use error::{InputField, InvalidInput};
pub use secret::{Secret, CREDENTIAL_ENV_VARS, REDACTED};

use bstr::ByteSlice;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Characters allowed in branch names and the working directory.
static SAFE_INPUT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_./-]+$").expect("safe input pattern is valid")
});

/// One update-and-publish cycle, as supplied by the caller.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    /// Branch the update is based on and the pull request targets.
    pub base_branch: String,

    /// Branch that receives the update commit.
    pub target_branch: String,

    /// Directory holding the manifest, relative to the checkout root.
    pub working_directory: String,

    /// Token used only to open the pull request.
    pub credential: Secret,

    /// Whether fine-grained trace lines are emitted.
    pub verbose: bool,
}

impl UpdateRequest {
    /// Creates a request with the default working directory (`.`).
    pub fn new(
        base_branch: impl Into<String>,
        target_branch: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            base_branch: base_branch.into(),
            target_branch: target_branch.into(),
            working_directory: ".".to_string(),
            credential: Secret::new(credential),
            verbose: false,
        }
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_working_directory(mut self, working_directory: impl Into<String>) -> Self {
        self.working_directory = working_directory.into();
        self
    }

    /// Sets verbose tracing.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Validates every input against `checkout_root`.
    ///
    /// Checks run in a fixed order (base branch, target branch, working
    /// directory, token) and the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] naming the first rejected field.
    pub fn validate(self, checkout_root: &Path) -> Result<ValidatedRequest, InvalidInput> {
        if !is_valid_branch(&self.base_branch) {
            return Err(InputField::BaseBranch.into());
        }
        if !is_valid_branch(&self.target_branch) {
            return Err(InputField::TargetBranch.into());
        }
        let working_directory = resolve_working_directory(checkout_root, &self.working_directory)
            .ok_or(InvalidInput::from(InputField::WorkingDirectory))?;
        if self.credential.is_blank() {
            return Err(InputField::GithubToken.into());
        }

        debug!(
            base = %self.base_branch,
            target = %self.target_branch,
            cwd = %working_directory.display(),
            "Request validated"
        );

        Ok(ValidatedRequest {
            base_branch: self.base_branch,
            target_branch: self.target_branch,
            working_directory,
            credential: self.credential,
            verbose: self.verbose,
        })
    }
}

/// A request whose inputs passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    /// Branch the pull request targets.
    pub base_branch: String,

    /// Branch that receives the update commit.
    pub target_branch: String,

    /// Canonical working directory inside the checkout.
    pub working_directory: PathBuf,

    /// Token used only to open the pull request.
    pub credential: Secret,

    /// Whether fine-grained trace lines are emitted.
    pub verbose: bool,
}

/// Returns true if `value` only holds characters that are inert in an argument list.
///
/// A leading `-` is refused as well so the value can never be read as an option.
#[must_use]
pub fn is_safe_input(value: &str) -> bool {
    SAFE_INPUT.is_match(value) && !value.starts_with('-')
}

/// Returns true if `name` is a safe input and a well-formed git branch name.
#[must_use]
pub fn is_valid_branch(name: &str) -> bool {
    is_safe_input(name) && gix_validate::reference::name_partial(name.as_bytes().as_bstr()).is_ok()
}

/// Resolves `working_directory` against `checkout_root`.
///
/// Returns the canonical directory if it exists and stays inside the checkout.
fn resolve_working_directory(checkout_root: &Path, working_directory: &str) -> Option<PathBuf> {
    if !is_safe_input(working_directory) {
        return None;
    }
    let root = checkout_root.canonicalize().ok()?;
    let candidate = root.join(working_directory).canonicalize().ok()?;
    (candidate.is_dir() && candidate.starts_with(&root)).then_some(candidate)
}

//! Commit message and pull request templates.
//!
//! Formats are Handlebars templates rendered against a [`MessageContext`].

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, MessageContext, TemplateRenderer};

/// Default commit message format.
pub const DEFAULT_COMMIT_MESSAGE_FORMAT: &str = "Updated dependencies for {{base_branch}}";

/// Default pull request title format.
pub const DEFAULT_PR_TITLE_FORMAT: &str = "Update dependencies for {{base_branch}}";

/// Default pull request body format.
pub const DEFAULT_PR_BODY_FORMAT: &str = "\
This pull request was opened automatically after running the {{package_manager}} \
dependency update against `{{base_branch}}`.

Only `{{manifest}}` and `{{lockfile}}` are changed.

The `{{target_branch}}` branch is owned by the automation and is force-pushed on \
every run; push follow-up fixes to a separate branch.";

/// Checks that `format` is a well-formed template.
///
/// # Errors
///
/// Returns [`TemplateError::SyntaxError`] if the template does not parse.
pub fn check_syntax(format: &str) -> Result<(), TemplateError> {
    handlebars::Template::compile(format)?;
    Ok(())
}

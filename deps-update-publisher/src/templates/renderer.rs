//! Template renderer.

use crate::updater::PackageManager;
use handlebars::{no_escape, Handlebars};
use serde::Serialize;

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (commit messages and markdown are plain text)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);

    hbs
}

/// Variables available to commit message and pull request templates.
#[derive(Debug, Clone, Serialize)]
pub struct MessageContext {
    /// Branch the pull request targets.
    pub base_branch: String,
    /// Branch holding the update commit.
    pub target_branch: String,
    /// Package manager that ran the update.
    pub package_manager: String,
    /// Manifest file name.
    pub manifest: String,
    /// Lockfile name.
    pub lockfile: String,
}

impl MessageContext {
    /// Builds the context for one publish cycle.
    pub fn new(
        base_branch: impl Into<String>,
        target_branch: impl Into<String>,
        package_manager: PackageManager,
    ) -> Self {
        Self {
            base_branch: base_branch.into(),
            target_branch: target_branch.into(),
            package_manager: package_manager.to_string(),
            manifest: package_manager.manifest().to_string(),
            lockfile: package_manager.lockfile().to_string(),
        }
    }
}

/// Renders commit and pull request templates.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders `template` against `context`.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is malformed or references an
    /// unknown variable.
    pub fn render(
        &self,
        template: &str,
        context: &MessageContext,
    ) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render_template(template, context)?)
    }
}

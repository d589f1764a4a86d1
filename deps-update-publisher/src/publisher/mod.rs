//! The update-and-publish cycle.
//!
//! [`UpdatePublisher::publish`] is one linear procedure: validate, update,
//! check the manifest and lockfile, and either stop or branch, commit, push
//! and open a pull request. Each collaborator call is awaited before the
//! next begins and none is retried.

mod error;

pub use error::PublishError;

use crate::forge::{Forge, PullRequestRequest, RepositorySlug};
use crate::git::{changed_paths, select_tracked, CommitIdentity, GitError, VersionControl};
use crate::logging::LogSink;
use crate::request::{UpdateRequest, ValidatedRequest};
use crate::summary::Outcome;
use crate::templates::{
    MessageContext, TemplateRenderer, DEFAULT_COMMIT_MESSAGE_FORMAT, DEFAULT_PR_BODY_FORMAT,
    DEFAULT_PR_TITLE_FORMAT,
};
use crate::updater::{DependencyUpdater, PackageManager};
use std::path::PathBuf;
use tracing::{info_span, Instrument};

/// Handlebars formats for the generated commit and pull request.
#[derive(Debug, Clone)]
pub struct MessageFormats {
    /// Commit message format.
    pub commit_message: String,
    /// Pull request title format.
    pub pr_title: String,
    /// Pull request body format.
    pub pr_body: String,
}

impl Default for MessageFormats {
    fn default() -> Self {
        Self {
            commit_message: DEFAULT_COMMIT_MESSAGE_FORMAT.to_string(),
            pr_title: DEFAULT_PR_TITLE_FORMAT.to_string(),
            pr_body: DEFAULT_PR_BODY_FORMAT.to_string(),
        }
    }
}

/// Fixed settings for every cycle a publisher runs.
#[derive(Debug, Clone)]
pub struct PublishSettings {
    /// Root of the repository checkout; working directories must stay inside it.
    pub checkout_root: PathBuf,
    /// Repository the pull request is opened on; only a dry run may leave it unset.
    pub repository: Option<RepositorySlug>,
    /// Decides which manifest and lockfile are tracked.
    pub package_manager: PackageManager,
    /// Commit identity, written to the local repository config only.
    pub identity: CommitIdentity,
    /// Commit and pull request wording.
    pub formats: MessageFormats,
    /// Detect changes without publishing them.
    pub dry_run: bool,
}

impl PublishSettings {
    /// Creates settings with npm, the default identity and the default wording.
    pub fn new(checkout_root: impl Into<PathBuf>, repository: RepositorySlug) -> Self {
        Self {
            checkout_root: checkout_root.into(),
            repository: Some(repository),
            package_manager: PackageManager::default(),
            identity: CommitIdentity::default(),
            formats: MessageFormats::default(),
            dry_run: false,
        }
    }
}

/// Runs update-and-publish cycles against a set of collaborators.
pub struct UpdatePublisher<'a> {
    settings: PublishSettings,
    updater: &'a dyn DependencyUpdater,
    vcs: &'a dyn VersionControl,
    forge: &'a dyn Forge,
    log: &'a dyn LogSink,
    renderer: TemplateRenderer,
}

impl<'a> UpdatePublisher<'a> {
    /// Creates a publisher.
    pub fn new(
        settings: PublishSettings,
        updater: &'a dyn DependencyUpdater,
        vcs: &'a dyn VersionControl,
        forge: &'a dyn Forge,
        log: &'a dyn LogSink,
    ) -> Self {
        Self {
            settings,
            updater,
            vcs,
            forge,
            log,
            renderer: TemplateRenderer::new(),
        }
    }

    /// Returns the settings in use.
    #[must_use]
    pub fn settings(&self) -> &PublishSettings {
        &self.settings
    }

    /// Executes one complete update-and-publish cycle.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] for invalid input, a failed update command, a
    /// failed git step, a template error, or a pull request that could not
    /// be opened. A failed pull request leaves the pushed branch in place.
    pub async fn publish(&self, request: UpdateRequest) -> Result<Outcome, PublishError> {
        let request = request.validate(&self.settings.checkout_root)?;
        self.log.mark_secret(request.credential.expose());

        let span = info_span!(
            "publish",
            base = %request.base_branch,
            target = %request.target_branch,
            package_manager = %self.settings.package_manager
        );
        self.run_cycle(&request).instrument(span).await
    }

    async fn run_cycle(&self, request: &ValidatedRequest) -> Result<Outcome, PublishError> {
        let cwd = request.working_directory.as_path();
        let package_manager = self.settings.package_manager;
        let tracked = package_manager.tracked_files();

        self.log.info(&format!(
            "Updating {package_manager} dependencies in {}",
            cwd.display()
        ));
        if let Err(e) = self.updater.update(cwd).await {
            return Err(PublishError::UpdateCommandFailed {
                exit_code: e.exit_code(),
                reason: request.credential.redact(&e.to_string()),
            });
        }

        let status = self
            .vcs
            .status(&tracked, cwd)
            .await
            .map_err(|e| git_failure(request, "status", &e))?;

        if status.trim().is_empty() {
            self.log
                .info("No changes to the manifest or lockfile; nothing to publish");
            return Ok(Outcome::NoChanges);
        }

        let changed_files = changed_paths(&status);
        self.trace(
            request,
            &format!("Changes detected in: {}", changed_files.join(", ")),
        );

        // Rendered up front so a template error cannot leave a half-published branch.
        let context = MessageContext::new(
            &request.base_branch,
            &request.target_branch,
            package_manager,
        );
        let formats = &self.settings.formats;
        let message = self.renderer.render(&formats.commit_message, &context)?;
        let title = self.renderer.render(&formats.pr_title, &context)?;
        let body = self.renderer.render(&formats.pr_body, &context)?;

        if self.settings.dry_run {
            self.log.info(&format!(
                "Dry run: would commit \"{message}\" to '{}' and open \"{title}\" against '{}'",
                request.target_branch, request.base_branch
            ));
            return Ok(Outcome::ChangesDetected { changed_files });
        }

        let Some(repository) = self.settings.repository.as_ref() else {
            return Err(PublishError::PublishFailed {
                reason: "no repository is configured for the pull request".to_string(),
            });
        };

        // A gitignored or absent lockfile is never reported by status and cannot be staged.
        let staged = select_tracked(&tracked, &changed_files);
        self.commit_and_push(request, &staged, &message).await?;

        let pr_request = PullRequestRequest::new(
            repository,
            title,
            body,
            &request.base_branch,
            &request.target_branch,
        );
        self.trace(
            request,
            &format!(
                "Opening pull request on {repository} ({} <- {})",
                pr_request.base, pr_request.head
            ),
        );

        match self
            .forge
            .create_pull_request(&request.credential, &pr_request)
            .await
        {
            Ok(created) => {
                self.log
                    .info(&format!("Pull request created: {}", created.url));
                Ok(Outcome::PullRequestCreated {
                    number: created.number,
                    url: created.url,
                })
            }
            Err(e) => {
                let reason = request.credential.redact(&e.to_string());
                self.log.warn(&format!(
                    "Branch '{}' was pushed but the pull request could not be opened: {reason}",
                    request.target_branch
                ));
                Err(PublishError::PublishFailed { reason })
            }
        }
    }

    /// Branches, stages exactly `staged`, commits, and force-pushes.
    async fn commit_and_push(
        &self,
        request: &ValidatedRequest,
        staged: &[&str],
        message: &str,
    ) -> Result<(), PublishError> {
        let cwd = request.working_directory.as_path();
        let branch = request.target_branch.as_str();

        self.trace(request, "Configuring commit identity");
        self.vcs
            .configure_identity(&self.settings.identity, cwd)
            .await
            .map_err(|e| git_failure(request, "config", &e))?;

        self.trace(request, &format!("Creating branch '{branch}'"));
        self.vcs
            .create_branch(branch, cwd)
            .await
            .map_err(|e| git_failure(request, "checkout", &e))?;

        self.trace(request, &format!("Staging {}", staged.join(", ")));
        self.vcs
            .stage(staged, cwd)
            .await
            .map_err(|e| git_failure(request, "add", &e))?;

        self.vcs
            .commit(message, cwd)
            .await
            .map_err(|e| git_failure(request, "commit", &e))?;

        // The branch belongs to the automation and is recreated on every run.
        self.vcs
            .push(branch, true, cwd)
            .await
            .map_err(|e| git_failure(request, "push", &e))?;

        self.log.info(&format!("Pushed '{branch}'"));
        Ok(())
    }

    fn trace(&self, request: &ValidatedRequest, message: &str) {
        if request.verbose {
            self.log.debug(message);
        }
    }
}

fn git_failure(request: &ValidatedRequest, step: &'static str, error: &GitError) -> PublishError {
    PublishError::Git {
        step,
        message: request.credential.redact(&error.to_string()),
    }
}

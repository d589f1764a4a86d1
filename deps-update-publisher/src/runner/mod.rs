//! Wires the real collaborators to the publisher.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::config::{load_config, parse_api_url, ConfigError};
use crate::forge::{GitHubForge, RepositorySlug};
use crate::git::GitCli;
use crate::logging::ActionsLog;
use crate::publisher::{MessageFormats, PublishError, PublishSettings, UpdatePublisher};
use crate::request::UpdateRequest;
use crate::summary::Outcome;
use crate::updater::ProcessUpdater;
use tracing::info;

/// A fully assembled run: config loaded, collaborators built.
pub struct Runner {
    settings: PublishSettings,
    updater: ProcessUpdater,
    git: GitCli,
    forge: GitHubForge,
    log: ActionsLog,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the config file, repository, or API URL is invalid.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let file = load_config(config.config_path())?;
        let repository = parse_repository(config.repository(), config.dry_run())?;
        let api_url = parse_api_url(config.api_url())?;

        let package_manager = config
            .package_manager()
            .unwrap_or(file.update.package_manager);
        let update_timeout = file.update.timeout();
        let pr_timeout = file.pull_request.timeout();
        let updater = file
            .update
            .command
            .as_deref()
            .and_then(|command| ProcessUpdater::from_command(command, update_timeout))
            .unwrap_or_else(|| ProcessUpdater::for_package_manager(package_manager, update_timeout));

        info!(
            repository = config.repository(),
            package_manager = %package_manager,
            program = %updater.program(),
            dry_run = config.dry_run(),
            "Runner configured"
        );

        let settings = PublishSettings {
            checkout_root: config.checkout_root().to_path_buf(),
            repository,
            package_manager,
            identity: file.commit.identity(),
            formats: MessageFormats {
                commit_message: file.commit.message_format,
                pr_title: file.pull_request.title_format,
                pr_body: file.pull_request.body_format,
            },
            dry_run: config.dry_run(),
        };

        Ok(Self {
            settings,
            updater,
            git: GitCli::new(file.commit.remote),
            forge: GitHubForge::new(api_url, pr_timeout),
            log: ActionsLog::new(config.workflow_commands()),
        })
    }

    /// Returns the log sink, which masks every secret marked during the run.
    pub fn log(&self) -> &ActionsLog {
        &self.log
    }

    /// Returns the forge pull requests are opened on.
    pub fn forge(&self) -> &GitHubForge {
        &self.forge
    }

    /// Returns the publish settings.
    pub fn settings(&self) -> &PublishSettings {
        &self.settings
    }

    /// Executes one update-and-publish cycle.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] if any step of the cycle fails.
    pub async fn run(&self, request: UpdateRequest) -> Result<Outcome, PublishError> {
        let publisher = UpdatePublisher::new(
            self.settings.clone(),
            &self.updater,
            &self.git,
            &self.forge,
            &self.log,
        );
        publisher.publish(request).await
    }
}

/// Parses the repository slug. A dry run never opens a pull request, so it
/// may run without one.
fn parse_repository(value: &str, dry_run: bool) -> Result<Option<RepositorySlug>, ConfigError> {
    if dry_run && value.trim().is_empty() {
        return Ok(None);
    }
    value.parse().map(Some)
}

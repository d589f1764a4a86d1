//! Runner configuration.

use crate::forge::DEFAULT_API_URL;
use crate::updater::PackageManager;
use std::path::{Path, PathBuf};

/// Everything a run needs besides the [`UpdateRequest`](crate::UpdateRequest).
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Root of the repository checkout.
    checkout_root: PathBuf,
    /// Repository in `owner/name` form.
    repository: String,
    /// GitHub REST base URL.
    api_url: String,
    /// Optional config file.
    config_path: Option<PathBuf>,
    /// Package manager chosen by input; overrides the config file.
    package_manager: Option<PackageManager>,
    /// Whether to detect changes without publishing.
    dry_run: bool,
    /// Whether to emit GitHub Actions workflow commands.
    workflow_commands: bool,
}

impl RunnerConfig {
    /// Creates a configuration for a run.
    pub fn new(checkout_root: PathBuf, repository: impl Into<String>) -> Self {
        Self {
            checkout_root,
            repository: repository.into(),
            api_url: DEFAULT_API_URL.to_string(),
            config_path: None,
            package_manager: None,
            dry_run: false,
            workflow_commands: false,
        }
    }

    /// Sets the GitHub REST base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Sets the config file path.
    pub fn with_config_path(mut self, config_path: Option<PathBuf>) -> Self {
        self.config_path = config_path;
        self
    }

    /// Overrides the package manager from the config file.
    pub fn with_package_manager(mut self, package_manager: Option<PackageManager>) -> Self {
        self.package_manager = package_manager;
        self
    }

    /// Sets dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enables GitHub Actions workflow commands in the log.
    pub fn with_workflow_commands(mut self, workflow_commands: bool) -> Self {
        self.workflow_commands = workflow_commands;
        self
    }

    /// Returns the checkout root.
    pub fn checkout_root(&self) -> &Path {
        &self.checkout_root
    }

    /// Returns the repository slug as given.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the GitHub REST base URL as given.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the config file path.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Returns the package manager override.
    pub fn package_manager(&self) -> Option<PackageManager> {
        self.package_manager
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns whether workflow commands are emitted.
    pub fn workflow_commands(&self) -> bool {
        self.workflow_commands
    }
}

//! Config file deserialization.

use crate::config::ConfigError;
use crate::forge::DEFAULT_PR_TIMEOUT_SECS;
use crate::git::{CommitIdentity, DEFAULT_AUTHOR_EMAIL, DEFAULT_AUTHOR_NAME, DEFAULT_REMOTE};
use crate::templates::{
    check_syntax, DEFAULT_COMMIT_MESSAGE_FORMAT, DEFAULT_PR_BODY_FORMAT, DEFAULT_PR_TITLE_FORMAT,
};
use crate::updater::{PackageManager, DEFAULT_UPDATE_TIMEOUT_SECS};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Parsed contents of the optional config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PublisherConfig {
    /// `[update]` section.
    #[serde(default)]
    pub update: UpdateSection,

    /// `[commit]` section.
    #[serde(default)]
    pub commit: CommitSection,

    /// `[pull-request]` section.
    #[serde(default)]
    pub pull_request: PullRequestSection,
}

/// How the dependency update runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct UpdateSection {
    /// Package manager; decides the update command and lockfile.
    #[serde(default)]
    pub package_manager: PackageManager,

    /// Explicit update command as an argument vector.
    pub command: Option<Vec<String>>,

    /// Seconds before the update command is killed.
    #[serde(default = "default_update_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpdateSection {
    fn default() -> Self {
        Self {
            package_manager: PackageManager::default(),
            command: None,
            timeout_secs: default_update_timeout_secs(),
        }
    }
}

impl UpdateSection {
    /// Returns the update command time limit.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// How the update commit is authored and pushed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CommitSection {
    /// Commit author name.
    #[serde(default = "default_author_name")]
    pub author_name: String,

    /// Commit author email.
    #[serde(default = "default_author_email")]
    pub author_email: String,

    /// Handlebars format for the commit message.
    #[serde(default = "default_message_format")]
    pub message_format: String,

    /// Remote the branch is pushed to.
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for CommitSection {
    fn default() -> Self {
        Self {
            author_name: default_author_name(),
            author_email: default_author_email(),
            message_format: default_message_format(),
            remote: default_remote(),
        }
    }
}

impl CommitSection {
    /// Returns the configured commit identity.
    #[must_use]
    pub fn identity(&self) -> CommitIdentity {
        CommitIdentity {
            name: self.author_name.clone(),
            email: self.author_email.clone(),
        }
    }
}

/// How the pull request is worded and how long the API call may take.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PullRequestSection {
    /// Handlebars format for the title.
    #[serde(default = "default_title_format")]
    pub title_format: String,

    /// Handlebars format for the body.
    #[serde(default = "default_body_format")]
    pub body_format: String,

    /// Seconds before the API call is abandoned.
    #[serde(default = "default_pr_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PullRequestSection {
    fn default() -> Self {
        Self {
            title_format: default_title_format(),
            body_format: default_body_format(),
            timeout_secs: default_pr_timeout_secs(),
        }
    }
}

impl PullRequestSection {
    /// Returns the API call time limit.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PublisherConfig {
    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is unreadable, malformed, or invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        config.validate(path)?;
        Ok(config)
    }

    /// Validates value ranges and template syntax.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first invalid key.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: String| ConfigError::ValidationError {
            path: path.display().to_string(),
            message,
        };

        if self.update.timeout_secs == 0 {
            return Err(fail("update.timeout-secs must be greater than 0".to_string()));
        }
        if self.pull_request.timeout_secs == 0 {
            return Err(fail(
                "pull-request.timeout-secs must be greater than 0".to_string(),
            ));
        }
        if let Some(command) = &self.update.command {
            if command.first().is_none_or(|program| program.trim().is_empty()) {
                return Err(fail("update.command must name a program".to_string()));
            }
        }
        if self.commit.author_name.trim().is_empty() {
            return Err(fail("commit.author-name cannot be empty".to_string()));
        }
        if self.commit.author_email.trim().is_empty() {
            return Err(fail("commit.author-email cannot be empty".to_string()));
        }
        if self.commit.remote.trim().is_empty() || self.commit.remote.starts_with('-') {
            return Err(fail("commit.remote must be a remote name".to_string()));
        }

        for (key, format) in [
            ("commit.message-format", &self.commit.message_format),
            ("pull-request.title-format", &self.pull_request.title_format),
            ("pull-request.body-format", &self.pull_request.body_format),
        ] {
            if format.trim().is_empty() {
                return Err(fail(format!("{key} cannot be empty")));
            }
            check_syntax(format).map_err(|e| fail(format!("{key}: {e}")))?;
        }

        Ok(())
    }
}

fn default_update_timeout_secs() -> u64 {
    DEFAULT_UPDATE_TIMEOUT_SECS
}

fn default_pr_timeout_secs() -> u64 {
    DEFAULT_PR_TIMEOUT_SECS
}

fn default_author_name() -> String {
    DEFAULT_AUTHOR_NAME.to_string()
}

fn default_author_email() -> String {
    DEFAULT_AUTHOR_EMAIL.to_string()
}

fn default_remote() -> String {
    DEFAULT_REMOTE.to_string()
}

fn default_message_format() -> String {
    DEFAULT_COMMIT_MESSAGE_FORMAT.to_string()
}

fn default_title_format() -> String {
    DEFAULT_PR_TITLE_FORMAT.to_string()
}

fn default_body_format() -> String {
    DEFAULT_PR_BODY_FORMAT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = temp.path().join("deps-update.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn empty_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "");

        let config = PublisherConfig::load(&path).unwrap();

        assert_eq!(config.update.package_manager, PackageManager::Npm);
        assert!(config.update.command.is_none());
        assert_eq!(config.commit.identity(), CommitIdentity::default());
        assert_eq!(config.commit.remote, "origin");
        assert_eq!(
            config.commit.message_format,
            "Updated dependencies for {{base_branch}}"
        );
    }

    #[test]
    fn parses_all_sections() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            r#"
[update]
package-manager = "pnpm"
command = ["pnpm", "update", "--latest"]
timeout-secs = 600

[commit]
author-name = "deps-bot"
author-email = "deps-bot@example.com"
message-format = "chore(deps): refresh {{lockfile}}"
remote = "upstream"

[pull-request]
title-format = "chore(deps): {{base_branch}}"
body-format = "Automated update of {{manifest}}"
timeout-secs = 10
"#,
        );

        let config = PublisherConfig::load(&path).unwrap();

        assert_eq!(config.update.package_manager, PackageManager::Pnpm);
        assert_eq!(
            config.update.command,
            Some(vec![
                "pnpm".to_string(),
                "update".to_string(),
                "--latest".to_string()
            ])
        );
        assert_eq!(config.update.timeout(), Duration::from_secs(600));
        assert_eq!(config.commit.identity().name, "deps-bot");
        assert_eq!(config.commit.remote, "upstream");
        assert_eq!(config.pull_request.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "[update]\nretries = 3\n");

        let result = PublisherConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn rejects_zero_timeout() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "[pull-request]\ntimeout-secs = 0\n");

        let result = PublisherConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_empty_command() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "[update]\ncommand = []\n");

        let result = PublisherConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_malformed_template() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "[commit]\nmessage-format = \"{{#if x}}\"\n");

        let err = PublisherConfig::load(&path).unwrap_err();

        assert!(err.to_string().contains("commit.message-format"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = PublisherConfig::load(&temp.path().join("missing.toml"));

        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}

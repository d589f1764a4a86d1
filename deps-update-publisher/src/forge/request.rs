//! Pull request payloads and repository coordinates.

use crate::config::ConfigError;
use std::fmt;
use std::str::FromStr;

/// A repository in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepositorySlug {
    /// Creates a slug from its parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RepositorySlug {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidRepository {
            value: s.to_string(),
        };
        let (owner, name) = s.trim().split_once('/').ok_or_else(invalid)?;
        let valid_part = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        };
        if !valid_part(owner) || !valid_part(name) {
            return Err(invalid());
        }
        Ok(Self::new(owner, name))
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything needed to open one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRequest {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Pull request title.
    pub title: String,
    /// Pull request body.
    pub body: String,
    /// Branch the changes are merged into.
    pub base: String,
    /// Branch holding the changes.
    pub head: String,
}

impl PullRequestRequest {
    /// Creates a request against `repository`.
    pub fn new(
        repository: &RepositorySlug,
        title: impl Into<String>,
        body: impl Into<String>,
        base: impl Into<String>,
        head: impl Into<String>,
    ) -> Self {
        Self {
            owner: repository.owner.clone(),
            repo: repository.name.clone(),
            title: title.into(),
            body: body.into(),
            base: base.into(),
            head: head.into(),
        }
    }
}

/// A pull request that was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPullRequest {
    /// Pull request number.
    pub number: u64,
    /// Browser URL of the pull request.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_slug() {
        let slug: RepositorySlug = "octo-org/web.app".parse().unwrap();
        assert_eq!(slug, RepositorySlug::new("octo-org", "web.app"));
        assert_eq!(slug.to_string(), "octo-org/web.app");
    }

    #[test]
    fn rejects_malformed_slugs() {
        for bad in ["", "octo", "/repo", "owner/", "a/b/c", "own er/repo"] {
            assert!(
                matches!(
                    bad.parse::<RepositorySlug>(),
                    Err(ConfigError::InvalidRepository { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn request_targets_repository() {
        let slug = RepositorySlug::new("octo", "web");
        let request = PullRequestRequest::new(&slug, "title", "body", "main", "auto/deps");
        assert_eq!(request.owner, "octo");
        assert_eq!(request.repo, "web");
        assert_eq!(request.base, "main");
        assert_eq!(request.head, "auto/deps");
    }
}

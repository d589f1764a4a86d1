//! Pull request creation on the forge.

mod error;
mod request;

pub use error::ForgeError;
pub use request::{CreatedPullRequest, PullRequestRequest, RepositorySlug};

use crate::request::Secret;
use async_trait::async_trait;
use octocrab::Octocrab;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Default public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default limit for the pull request call.
pub const DEFAULT_PR_TIMEOUT_SECS: u64 = 30;

/// Opens pull requests.
#[async_trait]
pub trait Forge: Send + Sync {
    /// Opens the pull request described by `request`, authenticating with `credential`.
    ///
    /// # Errors
    ///
    /// Returns [`ForgeError`] if the pull request could not be opened.
    async fn create_pull_request(
        &self,
        credential: &Secret,
        request: &PullRequestRequest,
    ) -> Result<CreatedPullRequest, ForgeError>;
}

/// [`Forge`] backed by the GitHub REST API.
///
/// The client is built per call so the credential never outlives the request
/// that carries it.
#[derive(Debug, Clone)]
pub struct GitHubForge {
    api_url: Url,
    timeout: Duration,
}

impl GitHubForge {
    /// Creates a forge talking to `api_url`.
    #[must_use]
    pub fn new(api_url: Url, timeout: Duration) -> Self {
        Self { api_url, timeout }
    }

    /// Returns the time limit for one pull request call.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the REST base URL.
    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
}

#[async_trait]
impl Forge for GitHubForge {
    async fn create_pull_request(
        &self,
        credential: &Secret,
        request: &PullRequestRequest,
    ) -> Result<CreatedPullRequest, ForgeError> {
        debug!(
            owner = %request.owner,
            repo = %request.repo,
            head = %request.head,
            base = %request.base,
            "Creating pull request"
        );

        let octocrab = Octocrab::builder()
            .personal_token(credential.expose().to_string())
            .base_uri(self.api_url.as_str())?
            .build()?;

        let pulls = octocrab.pulls(&request.owner, &request.repo);
        let send = pulls
            .create(&request.title, &request.head, &request.base)
            .body(request.body.as_str())
            .send();

        let pr = tokio::time::timeout(self.timeout, send)
            .await
            .map_err(|_| ForgeError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            })?
            .map_err(|e| classify_error(e, request))?;

        let url = pr.html_url.as_ref().map_or_else(
            || {
                format!(
                    "https://github.com/{}/{}/pull/{}",
                    request.owner, request.repo, pr.number
                )
            },
            ToString::to_string,
        );

        info!(pr_number = pr.number, url = %url, "Pull request created");
        Ok(CreatedPullRequest {
            number: pr.number,
            url,
        })
    }
}

/// Maps GitHub's error responses onto the cases callers care about.
fn classify_error(error: octocrab::Error, request: &PullRequestRequest) -> ForgeError {
    if let octocrab::Error::GitHub { source, .. } = &error {
        let details = format!("{} {:?}", source.message, source.errors);
        if let Some(classified) = classify_response(
            source.status_code.as_u16(),
            &source.message,
            &details,
            request,
        ) {
            return classified;
        }
    }
    ForgeError::Api(error)
}

/// Classifies an error response by status and message; `None` keeps the raw API error.
fn classify_response(
    status: u16,
    message: &str,
    details: &str,
    request: &PullRequestRequest,
) -> Option<ForgeError> {
    let details = details.to_lowercase();
    if status == 422 && details.contains("already exists") {
        return Some(ForgeError::AlreadyExists {
            head: request.head.clone(),
            base: request.base.clone(),
        });
    }
    if is_permission_denied(status, &details) {
        return Some(ForgeError::PermissionDenied {
            message: message.to_string(),
        });
    }
    None
}

fn is_permission_denied(status: u16, details: &str) -> bool {
    status == 401
        || status == 403
        || details.contains("resource not accessible")
        || details.contains("bad credentials")
}

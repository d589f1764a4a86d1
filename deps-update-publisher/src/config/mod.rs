//! Configuration file loading.
//!
//! Everything here is optional: without a config file the publisher runs
//! npm with the default identity, templates and timeouts.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{CommitSection, PublisherConfig, PullRequestSection, UpdateSection};

use std::path::Path;
use tracing::info;
use url::Url;

/// Loads the config file at `path`, or the defaults when no path is given.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&Path>) -> Result<PublisherConfig, ConfigError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Loading config file");
            PublisherConfig::load(path)
        }
        None => Ok(PublisherConfig::default()),
    }
}

/// Parses the REST API base URL.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidApiUrl`] if `value` is not an absolute URL.
pub fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|source| ConfigError::InvalidApiUrl {
        value: value.to_string(),
        source,
    })
}

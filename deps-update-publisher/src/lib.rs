#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod forge;
pub mod git;
pub mod logging;
pub mod publisher;
pub mod request;
pub mod runner;
pub mod summary;
pub mod templates;
pub mod updater;

pub use config::{load_config, ConfigError, PublisherConfig};
pub use forge::{CreatedPullRequest, Forge, ForgeError, GitHubForge, PullRequestRequest, RepositorySlug};
pub use git::{CommitIdentity, GitCli, GitError, VersionControl};
pub use logging::{ActionsLog, LogSink};
pub use publisher::{MessageFormats, PublishError, PublishSettings, UpdatePublisher};
pub use request::{InputField, InvalidInput, Secret, UpdateRequest, ValidatedRequest};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::{write_outputs, write_step_summary, Outcome};
pub use templates::{MessageContext, TemplateError, TemplateRenderer};
pub use updater::{DependencyUpdater, PackageManager, ProcessUpdater, UpdateError};

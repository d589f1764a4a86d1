#![allow(dead_code)]

use async_trait::async_trait;
use deps_update_publisher::forge::{CreatedPullRequest, Forge, ForgeError, PullRequestRequest};
use deps_update_publisher::git::{CommitIdentity, GitError, VersionControl};
use deps_update_publisher::logging::LogSink;
use deps_update_publisher::request::Secret;
use deps_update_publisher::updater::{DependencyUpdater, UpdateError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One collaborator call, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Update { cwd: PathBuf },
    Status { paths: Vec<String> },
    ConfigureIdentity { name: String },
    CreateBranch { name: String },
    Stage { paths: Vec<String> },
    Commit { message: String },
    Push { branch: String, force: bool },
    CreatePullRequest { base: String, head: String, title: String },
}

impl Call {
    /// Returns true for calls that change the repository or the remote.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::ConfigureIdentity { .. }
                | Self::CreateBranch { .. }
                | Self::Stage { .. }
                | Self::Commit { .. }
                | Self::Push { .. }
                | Self::CreatePullRequest { .. }
        )
    }
}

/// Call log shared by every fake in a test.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Call>>>);

impl Journal {
    pub fn record(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }
}

/// Updater that succeeds or fails with a fixed exit code.
pub struct FakeUpdater {
    journal: Journal,
    exit_code: Option<i32>,
}

impl FakeUpdater {
    pub fn succeeding(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            exit_code: None,
        }
    }

    pub fn failing(journal: &Journal, exit_code: i32) -> Self {
        Self {
            journal: journal.clone(),
            exit_code: Some(exit_code),
        }
    }
}

#[async_trait]
impl DependencyUpdater for FakeUpdater {
    async fn update(&self, working_directory: &Path) -> Result<(), UpdateError> {
        self.journal.record(Call::Update {
            cwd: working_directory.to_path_buf(),
        });
        match self.exit_code {
            None => Ok(()),
            Some(code) => Err(UpdateError::Failed {
                program: "npm".to_string(),
                exit_code: Some(code),
                stderr: "npm ERR! network".to_string(),
            }),
        }
    }
}

/// Version control that reports a fixed status and records every call.
pub struct FakeVcs {
    journal: Journal,
    status: String,
    failing_step: Option<&'static str>,
}

impl FakeVcs {
    pub fn with_status(journal: &Journal, status: &str) -> Self {
        Self {
            journal: journal.clone(),
            status: status.to_string(),
            failing_step: None,
        }
    }

    pub fn clean(journal: &Journal) -> Self {
        Self::with_status(journal, "")
    }

    pub fn failing_at(mut self, step: &'static str) -> Self {
        self.failing_step = Some(step);
        self
    }

    fn result(&self, step: &str) -> Result<(), GitError> {
        if self.failing_step == Some(step) {
            return Err(GitError::Failed {
                command: step.to_string(),
                stderr: "fatal: unable to access remote".to_string(),
            });
        }
        Ok(())
    }
}

fn owned(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|path| (*path).to_string()).collect()
}

#[async_trait]
impl VersionControl for FakeVcs {
    async fn status(&self, paths: &[&str], _cwd: &Path) -> Result<String, GitError> {
        self.journal.record(Call::Status {
            paths: owned(paths),
        });
        self.result("status")?;
        Ok(self.status.clone())
    }

    async fn configure_identity(
        &self,
        identity: &CommitIdentity,
        _cwd: &Path,
    ) -> Result<(), GitError> {
        self.journal.record(Call::ConfigureIdentity {
            name: identity.name.clone(),
        });
        self.result("config")
    }

    async fn create_branch(&self, name: &str, _cwd: &Path) -> Result<(), GitError> {
        self.journal.record(Call::CreateBranch {
            name: name.to_string(),
        });
        self.result("checkout")
    }

    async fn stage(&self, paths: &[&str], _cwd: &Path) -> Result<(), GitError> {
        self.journal.record(Call::Stage {
            paths: owned(paths),
        });
        self.result("add")
    }

    async fn commit(&self, message: &str, _cwd: &Path) -> Result<(), GitError> {
        self.journal.record(Call::Commit {
            message: message.to_string(),
        });
        self.result("commit")
    }

    async fn push(&self, branch: &str, force: bool, _cwd: &Path) -> Result<(), GitError> {
        self.journal.record(Call::Push {
            branch: branch.to_string(),
            force,
        });
        self.result("push")
    }
}

/// Forge that opens pull request 7, or fails with a fixed message or a timeout.
pub struct FakeForge {
    journal: Journal,
    denial: Option<String>,
    times_out: bool,
    seen_credentials: Mutex<Vec<String>>,
}

impl FakeForge {
    pub fn accepting(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            denial: None,
            times_out: false,
            seen_credentials: Mutex::new(Vec::new()),
        }
    }

    pub fn denying(journal: &Journal, message: &str) -> Self {
        Self {
            denial: Some(message.to_string()),
            ..Self::accepting(journal)
        }
    }

    pub fn timing_out(journal: &Journal) -> Self {
        Self {
            times_out: true,
            ..Self::accepting(journal)
        }
    }

    pub fn seen_credentials(&self) -> Vec<String> {
        self.seen_credentials.lock().unwrap().clone()
    }
}

#[async_trait]
impl Forge for FakeForge {
    async fn create_pull_request(
        &self,
        credential: &Secret,
        request: &PullRequestRequest,
    ) -> Result<CreatedPullRequest, ForgeError> {
        self.seen_credentials
            .lock()
            .unwrap()
            .push(credential.expose().to_string());
        self.journal.record(Call::CreatePullRequest {
            base: request.base.clone(),
            head: request.head.clone(),
            title: request.title.clone(),
        });
        if self.times_out {
            return Err(ForgeError::Timeout { timeout_secs: 30 });
        }
        match &self.denial {
            None => Ok(CreatedPullRequest {
                number: 7,
                url: format!(
                    "https://github.com/{}/{}/pull/7",
                    request.owner, request.repo
                ),
            }),
            Some(message) => Err(ForgeError::PermissionDenied {
                message: message.clone(),
            }),
        }
    }
}

/// Level a [`RecordingSink`] line was emitted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Debug,
    Warn,
    Error,
}

/// Sink that keeps every line exactly as the publisher emitted it.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<(Level, String)>>,
    secrets: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(line_level, _)| *line_level == level)
            .map(|(_, line)| line)
            .collect()
    }

    pub fn secrets(&self) -> Vec<String> {
        self.secrets.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, line)| line.contains(needle))
    }

    fn push(&self, level: Level, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

impl LogSink for RecordingSink {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn debug(&self, message: &str) {
        self.push(Level::Debug, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }

    fn mark_secret(&self, value: &str) {
        self.secrets.lock().unwrap().push(value.to_string());
    }
}

/// Porcelain output for a changed manifest and lockfile.
pub const CHANGED_STATUS: &str = " M package.json\n M package-lock.json\n";

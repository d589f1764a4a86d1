//! Log sink with secret masking.
//!
//! The publisher reports progress through a [`LogSink`] rather than calling
//! `tracing` directly, so every line passes through redaction and tests can
//! capture exactly what was emitted.

use crate::request::REDACTED;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, info, warn};

/// Destination for the publisher's human-readable log lines.
pub trait LogSink: Send + Sync {
    /// Emits a progress line.
    fn info(&self, message: &str);

    /// Emits a fine-grained trace line.
    fn debug(&self, message: &str);

    /// Emits a warning.
    fn warn(&self, message: &str);

    /// Emits a failure line.
    fn error(&self, message: &str);

    /// Registers `value` so it is masked in every later line.
    fn mark_secret(&self, value: &str);
}

/// [`LogSink`] for GitHub Actions runners.
///
/// Lines are emitted as `tracing` events. With workflow commands enabled the
/// sink also issues `::add-mask::` for secrets and annotates warnings and
/// errors with `::warning::` / `::error::`.
#[derive(Debug, Default)]
pub struct ActionsLog {
    secrets: Mutex<Vec<String>>,
    workflow_commands: bool,
}

impl ActionsLog {
    /// Creates a sink; `workflow_commands` should be true on an Actions runner.
    #[must_use]
    pub fn new(workflow_commands: bool) -> Self {
        Self {
            secrets: Mutex::new(Vec::new()),
            workflow_commands,
        }
    }

    /// Masks every registered secret in `message`.
    #[must_use]
    pub fn redact(&self, message: &str) -> String {
        let secrets = self.secrets.lock().unwrap_or_else(PoisonError::into_inner);
        secrets
            .iter()
            .fold(message.to_string(), |text, secret| {
                text.replace(secret.as_str(), REDACTED)
            })
    }

    fn annotate(&self, command: &str, message: &str) {
        if self.workflow_commands {
            println!("::{command}::{}", escape_data(message));
        }
    }
}

impl LogSink for ActionsLog {
    fn info(&self, message: &str) {
        info!("{}", self.redact(message));
    }

    fn debug(&self, message: &str) {
        debug!("{}", self.redact(message));
    }

    fn warn(&self, message: &str) {
        let message = self.redact(message);
        warn!("{message}");
        self.annotate("warning", &message);
    }

    fn error(&self, message: &str) {
        let message = self.redact(message);
        error!("{message}");
        self.annotate("error", &message);
    }

    fn mark_secret(&self, value: &str) {
        if value.trim().is_empty() {
            return;
        }
        {
            let mut secrets = self.secrets.lock().unwrap_or_else(PoisonError::into_inner);
            if secrets.iter().any(|known| known == value) {
                return;
            }
            secrets.push(value.to_string());
        }
        // The runner consumes this line and masks the value in its own log.
        if self.workflow_commands {
            println!("::add-mask::{}", escape_data(value));
        }
    }
}

/// Escapes a workflow command payload.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

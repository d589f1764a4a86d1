//! Redacted credential wrapper.

use std::fmt;

/// Placeholder written wherever a secret would otherwise appear.
pub const REDACTED: &str = "***";

/// Environment variables that may carry the credential on a runner.
///
/// Child processes are started without them so the token only reaches the
/// pull request call.
pub const CREDENTIAL_ENV_VARS: [&str; 2] = ["INPUT_GITHUB-TOKEN", "GITHUB_TOKEN"];

/// An opaque credential that never prints its value.
///
/// The raw token is only reachable through [`Secret::expose`], which keeps
/// every use of it greppable.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a raw credential value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw credential.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if the credential is empty or only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Replaces every occurrence of the credential in `text`.
    #[must_use]
    pub fn redact(&self, text: &str) -> String {
        if self.is_blank() {
            return text.to_string();
        }
        text.replace(self.0.as_str(), REDACTED)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({REDACTED})")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_hide_value() {
        let secret = Secret::new("ghp_abc123");
        assert_eq!(format!("{secret:?}"), "Secret(***)");
        assert_eq!(secret.to_string(), "***");
    }

    #[test]
    fn redacts_every_occurrence() {
        let secret = Secret::new("ghp_abc123");
        let text = "token ghp_abc123 rejected; retry with ghp_abc123";
        assert_eq!(secret.redact(text), "token *** rejected; retry with ***");
    }

    #[test]
    fn blank_secret_leaves_text_alone() {
        let secret = Secret::new("  ");
        assert!(secret.is_blank());
        assert_eq!(secret.redact("a  b"), "a  b");
    }
}

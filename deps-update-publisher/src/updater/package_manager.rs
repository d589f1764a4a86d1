//! Supported JavaScript package managers.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Manifest file shared by every supported package manager.
pub const MANIFEST: &str = "package.json";

/// A package manager whose update command and lockfile are known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    /// npm, writing `package-lock.json`.
    #[default]
    Npm,
    /// Yarn, writing `yarn.lock`.
    Yarn,
    /// pnpm, writing `pnpm-lock.yaml`.
    Pnpm,
}

impl PackageManager {
    /// Returns the executable name.
    #[must_use]
    pub fn program(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Returns the arguments of the dependency update command.
    #[must_use]
    pub fn update_args(self) -> &'static [&'static str] {
        match self {
            Self::Npm | Self::Pnpm => &["update"],
            Self::Yarn => &["upgrade"],
        }
    }

    /// Returns the manifest file name.
    #[must_use]
    pub fn manifest(self) -> &'static str {
        MANIFEST
    }

    /// Returns the lockfile name.
    #[must_use]
    pub fn lockfile(self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
            Self::Pnpm => "pnpm-lock.yaml",
        }
    }

    /// Returns the only paths the publisher may inspect, stage, or commit.
    #[must_use]
    pub fn tracked_files(self) -> [&'static str; 2] {
        [self.manifest(), self.lockfile()]
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// An unrecognised package manager name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown package manager '{0}', expected one of: npm, yarn, pnpm")]
pub struct UnknownPackageManager(pub String);

impl FromStr for PackageManager {
    type Err = UnknownPackageManager;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            _ => Err(UnknownPackageManager(s.to_string())),
        }
    }
}

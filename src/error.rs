//! Error types for gover
//!
//! All modules use `GoverResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for gover operations
pub type GoverResult<T> = Result<T, GoverError>;

/// All errors that can occur in gover
#[derive(Error, Debug)]
pub enum GoverError {
    // Specification errors
    #[error("{0}")]
    InvalidVersion(String),

    #[error("a default version cannot be used here")]
    UnresolvedDefault,

    // Resolution errors
    #[error("release version {0} not found")]
    ReleaseNotFound(String),

    #[error("no latest version found for fake version: {0}")]
    NoLatestRelease(String),

    #[error("release branch {0} not found")]
    ReleaseBranchNotFound(String),

    #[error("{kind} {name} not found in the repository")]
    RefNotFound { kind: &'static str, name: String },

    // Repository errors
    #[error("git {operation} failed: {reason}")]
    Vcs { operation: String, reason: String },

    #[error("toolchain repository is not available at {0}")]
    RepositoryMissing(PathBuf),

    // Build errors
    #[error("building {version} failed (exit code {code})\n{output}")]
    BuildFailed {
        version: String,
        code: i32,
        output: String,
    },

    #[error("build of {version} did not produce {path}")]
    MissingArtifact { version: String, path: PathBuf },

    #[error("bootstrap chain for {0} is cyclic")]
    BootstrapCycle(String),

    #[error("unable to determine how to build toolchain {0}")]
    BootstrapUndetermined(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    User(String),
}

impl GoverError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a VCS error
    pub fn vcs(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Vcs {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ReleaseNotFound(_) | Self::ReleaseBranchNotFound(_) => {
                Some("Run: gover fetch-versions")
            }
            Self::NoLatestRelease(_) => Some("Run: gover list-versions"),
            Self::BootstrapUndetermined(_) => {
                Some("Set GOROOT_BOOTSTRAP to an installed Go toolchain")
            }
            Self::CommandFailed { command, .. } if command.starts_with("git ") => {
                Some("Is git installed and on PATH?")
            }
            _ => None,
        }
    }
}

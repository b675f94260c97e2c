//! Error types for Sashimono
//!
//! Every fatal condition of a build invocation funnels through [`Error`].
//! None of them are retried: the bridge only performs local filesystem work,
//! so running it again without operator intervention gives the same outcome.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Sashimono error type
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Task pipeline
    // ========================================================================
    /// A consumer asked for a result kind that no task published.
    #[error("Missing result: no task published a `{kind}` result")]
    MissingResult { kind: String },

    #[error("Packaging failed for {}: {source}", path.display())]
    PackagingFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ========================================================================
    // Lifecycle / manifest
    // ========================================================================
    /// Required host phases have not run yet. `command` is what the operator
    /// should run instead.
    #[error("{message}")]
    ActionableUnmetPrecondition { message: String, command: String },

    #[error("Failed to write manifest {}: {source}", path.display())]
    ManifestWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ========================================================================
    // General
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Nothing in the bridge is transient.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Errors the operator can act on without reading a backtrace
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::ActionableUnmetPrecondition { .. } | Error::InvalidInput(_) | Error::Config(_)
        )
    }

    /// Corrective command carried by an unmet precondition
    pub fn corrective_command(&self) -> Option<&str> {
        match self {
            Error::ActionableUnmetPrecondition { command, .. } => Some(command),
            _ => None,
        }
    }

    pub fn missing_result(kind: impl Into<String>) -> Self {
        Error::MissingResult { kind: kind.into() }
    }

    pub fn packaging_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::PackagingFailed {
            path: path.into(),
            source,
        }
    }

    pub fn manifest_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::ManifestWriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn unmet_precondition(message: impl Into<String>, command: impl Into<String>) -> Self {
        Error::ActionableUnmetPrecondition {
            message: message.into(),
            command: command.into(),
        }
    }
}

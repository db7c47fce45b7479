//! Logging error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the log facade.
#[derive(Debug, Error)]
pub enum LogError {
    /// The facade was used before a backend was attached.
    #[error("log facade has no backend attached")]
    NotInitialized,

    /// The backend rejected its configuration.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Static misconfiguration found while (re)binding an output target.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("target not found: {0}")]
    TargetNotFound(String),

    #[error("failed to open target file {}: {source}", path.display())]
    OpenTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure while writing a single log line.
///
/// Never leaves the facade: `LogFacade::write_line` discards it.
#[derive(Debug, Error)]
pub enum WriteFailure {
    #[error("no output target is bound")]
    NoActiveTarget,

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

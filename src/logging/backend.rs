//! Log backends.
//!
//! # Responsibilities
//! - Dispatch a line to the sink matching its severity
//! - Resolve a named output target and rebind its file path
//!
//! # Design Decisions
//! - `TracingBackend` owns a private `tracing` dispatcher; it never touches
//!   the process-wide subscriber
//! - Unmapped severities are dropped without output and without error
//! - Sink io errors come back as `WriteFailure::Io` instead of being printed
//!   by tracing-subscriber

use std::fmt;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::Dispatch;

use crate::config::{LogFormat, LoggingConfig, TargetConfig};
use crate::logging::error::{ConfigurationError, WriteFailure};
use crate::logging::level::{LogLevel, Severity};
use crate::logging::writer::TargetWriter;

/// A pluggable sink behind the log facade.
pub trait LogBackend: Send + Sync {
    /// Rebind the output target named `target` to `dir/file`.
    fn initialize(&self, dir: &Path, file: &Path, target: &str) -> Result<(), ConfigurationError>;

    /// Write one line at `severity`.
    fn write_line(&self, severity: Severity, args: fmt::Arguments<'_>) -> Result<(), WriteFailure>;
}

/// Backend writing through a private `tracing` dispatcher into the file of
/// the active target.
#[derive(Debug)]
pub struct TracingBackend {
    dispatch: Dispatch,
    writer: TargetWriter,
    targets: DashMap<String, TargetConfig>,
}

impl TracingBackend {
    /// Build the backend from a logging configuration.
    ///
    /// If the default target already names a file, it is opened and becomes
    /// the active target.
    pub fn new(config: LoggingConfig) -> Result<Self, ConfigurationError> {
        let writer = TargetWriter::new();
        let dispatch = build_dispatch(config.format, writer.clone());

        if let Some(path) = config
            .targets
            .get(&config.default_target)
            .and_then(|target| target.file.clone())
        {
            writer
                .rebind(&config.default_target, &path)
                .map_err(|source| ConfigurationError::OpenTarget { path, source })?;
        }

        Ok(Self {
            dispatch,
            writer,
            targets: config.targets.into_iter().collect(),
        })
    }

    /// File currently configured for `target`.
    pub fn target_path(&self, target: &str) -> Option<PathBuf> {
        self.targets
            .get(target)
            .and_then(|entry| entry.file.clone())
    }

    /// Name of the target receiving writes.
    pub fn active_target(&self) -> Option<String> {
        self.writer.bound_target()
    }

    pub fn target_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.targets.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

impl LogBackend for TracingBackend {
    fn initialize(&self, dir: &Path, file: &Path, target: &str) -> Result<(), ConfigurationError> {
        let path = dir.join(file);

        let mut entry = self
            .targets
            .get_mut(target)
            .ok_or_else(|| ConfigurationError::TargetNotFound(target.to_string()))?;

        self.writer
            .rebind(target, &path)
            .map_err(|source| ConfigurationError::OpenTarget {
                path: path.clone(),
                source,
            })?;
        entry.file = Some(path.clone());
        drop(entry);

        tracing::debug!(target_name = target, path = %path.display(), "Log target rebound");
        Ok(())
    }

    fn write_line(&self, severity: Severity, args: fmt::Arguments<'_>) -> Result<(), WriteFailure> {
        let Some(level) = severity.level() else {
            metrics::counter!("log_lines_dropped_total", "reason" => "unmapped_level").increment(1);
            return Ok(());
        };

        if !self.writer.is_bound() {
            return Err(WriteFailure::NoActiveTarget);
        }

        // Clear anything a previous line left behind on this thread.
        let _ = TargetWriter::take_error();

        tracing::dispatcher::with_default(&self.dispatch, || match level {
            LogLevel::Debug => tracing::debug!("{}", args),
            LogLevel::Info => tracing::info!("{}", args),
            LogLevel::Warning => tracing::warn!("{}", args),
            LogLevel::Error => tracing::error!("{}", args),
        });

        match TargetWriter::take_error() {
            Some(err) => Err(WriteFailure::Io(err)),
            None => Ok(()),
        }
    }
}

fn build_dispatch(format: LogFormat, writer: TargetWriter) -> Dispatch {
    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .log_internal_errors(false)
        .with_max_level(tracing::Level::DEBUG);

    match format {
        LogFormat::Full => Dispatch::new(builder.finish()),
        LogFormat::Json => Dispatch::new(builder.json().finish()),
    }
}

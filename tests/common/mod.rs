//! Shared backends and fixtures for integration tests.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use netgame_diagnostics::config::{LoggingConfig, TargetConfig};
use netgame_diagnostics::logging::{ConfigurationError, LogBackend, Severity, WriteFailure};

/// Backend whose behaviour is decided per call by closures.
pub struct ProgrammableBackend<I, W>
where
    I: Fn(&str) -> Result<(), ConfigurationError> + Send + Sync,
    W: Fn(Severity, &str) -> Result<(), WriteFailure> + Send + Sync,
{
    on_initialize: I,
    on_write: W,
    pub writes: AtomicUsize,
    pub lines: Mutex<Vec<String>>,
}

impl<I, W> ProgrammableBackend<I, W>
where
    I: Fn(&str) -> Result<(), ConfigurationError> + Send + Sync,
    W: Fn(Severity, &str) -> Result<(), WriteFailure> + Send + Sync,
{
    pub fn new(on_initialize: I, on_write: W) -> Self {
        Self {
            on_initialize,
            on_write,
            writes: AtomicUsize::new(0),
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl<I, W> LogBackend for ProgrammableBackend<I, W>
where
    I: Fn(&str) -> Result<(), ConfigurationError> + Send + Sync,
    W: Fn(Severity, &str) -> Result<(), WriteFailure> + Send + Sync,
{
    fn initialize(&self, _dir: &Path, _file: &Path, target: &str) -> Result<(), ConfigurationError> {
        (self.on_initialize)(target)
    }

    fn write_line(&self, severity: Severity, args: fmt::Arguments<'_>) -> Result<(), WriteFailure> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let line = args.to_string();
        self.lines.lock().unwrap().push(line.clone());
        (self.on_write)(severity, &line)
    }
}

/// Logging config with the default target plus a named `chat` target.
pub fn two_target_config() -> LoggingConfig {
    let mut config = LoggingConfig::default();
    config
        .targets
        .insert("chat".to_string(), TargetConfig::default());
    config
}

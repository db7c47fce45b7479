//! Process-wide log facade.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::config::DEFAULT_TARGET;
use crate::logging::backend::LogBackend;
use crate::logging::error::LogError;
use crate::logging::level::Severity;

static DEFAULT: OnceLock<LogFacade> = OnceLock::new();

/// Gate in front of a replaceable [`LogBackend`].
///
/// Configuration failures from the backend propagate to the caller. Write
/// failures, including panics inside the backend, are swallowed: logging
/// never interrupts the code doing the logging.
#[derive(Default)]
pub struct LogFacade {
    backend: RwLock<Option<Arc<dyn LogBackend>>>,
}

impl fmt::Debug for LogFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFacade")
            .field("has_backend", &self.has_backend())
            .finish()
    }
}

impl LogFacade {
    /// A detached facade with no backend attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide facade, constructed on first access.
    pub fn global() -> &'static LogFacade {
        DEFAULT.get_or_init(LogFacade::new)
    }

    /// Attach `backend`, replacing any previous one.
    pub fn set_backend(&self, backend: Arc<dyn LogBackend>) {
        *self.backend.write().unwrap_or_else(PoisonError::into_inner) = Some(backend);
    }

    /// Detach the current backend, returning it.
    pub fn clear_backend(&self) -> Option<Arc<dyn LogBackend>> {
        self.backend
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn has_backend(&self) -> bool {
        self.backend
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Bind the default `"logfile"` target to `dir/file`.
    pub fn initialize(&self, dir: impl AsRef<Path>, file: impl AsRef<Path>) -> Result<(), LogError> {
        self.initialize_target(dir, file, DEFAULT_TARGET)
    }

    /// Bind the output target named `target` to `dir/file`.
    pub fn initialize_target(
        &self,
        dir: impl AsRef<Path>,
        file: impl AsRef<Path>,
        target: &str,
    ) -> Result<(), LogError> {
        let backend = self.backend()?;
        backend.initialize(dir.as_ref(), file.as_ref(), target)?;
        Ok(())
    }

    /// Write one line through the backend.
    ///
    /// Only a missing backend is reported. Anything the backend raises while
    /// writing is discarded.
    pub fn write_line(&self, level: impl Into<Severity>, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        let backend = self.backend()?;
        let severity = level.into();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| backend.write_line(severity, args)));
        if !matches!(outcome, Ok(Ok(()))) {
            metrics::counter!("log_write_failures_total").increment(1);
        }
        Ok(())
    }

    fn backend(&self) -> Result<Arc<dyn LogBackend>, LogError> {
        self.backend
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(LogError::NotInitialized)
    }
}

/// Write a formatted line through [`LogFacade::global`].
///
/// The result is ignored: a missing backend is as silent as a failed write.
///
/// ```
/// use netgame_diagnostics::{log_line, LogLevel};
///
/// log_line!(LogLevel::Info, "player {} joined", 3);
/// ```
#[macro_export]
macro_rules! log_line {
    ($level:expr, $($arg:tt)+) => {{
        let _ = $crate::logging::LogFacade::global()
            .write_line($level, ::std::format_args!($($arg)+));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::error::{ConfigurationError, WriteFailure};
    use crate::logging::level::LogLevel;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingBackend {
        lines: Mutex<Vec<(Severity, String)>>,
        initialized: Mutex<Vec<(String, String)>>,
    }

    impl LogBackend for RecordingBackend {
        fn initialize(&self, dir: &Path, file: &Path, target: &str) -> Result<(), ConfigurationError> {
            self.initialized
                .lock()
                .unwrap()
                .push((dir.join(file).display().to_string(), target.to_string()));
            Ok(())
        }

        fn write_line(&self, severity: Severity, args: fmt::Arguments<'_>) -> Result<(), WriteFailure> {
            self.lines.lock().unwrap().push((severity, args.to_string()));
            Ok(())
        }
    }

    struct FailingBackend {
        writes: AtomicUsize,
    }

    impl LogBackend for FailingBackend {
        fn initialize(&self, _dir: &Path, _file: &Path, target: &str) -> Result<(), ConfigurationError> {
            Err(ConfigurationError::TargetNotFound(target.to_string()))
        }

        fn write_line(&self, _severity: Severity, _args: fmt::Arguments<'_>) -> Result<(), WriteFailure> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Err(WriteFailure::Other("disk full".into()))
        }
    }

    #[test]
    fn test_no_backend() {
        let facade = LogFacade::new();
        assert!(!facade.has_backend());
        assert!(matches!(
            facade.write_line(LogLevel::Info, format_args!("x")),
            Err(LogError::NotInitialized)
        ));
        assert!(matches!(
            facade.initialize("/tmp", "x.log"),
            Err(LogError::NotInitialized)
        ));
    }

    #[test]
    fn test_delegates_to_backend() {
        let facade = LogFacade::new();
        let backend = Arc::new(RecordingBackend::default());
        facade.set_backend(backend.clone());

        facade.initialize("logs", "game.log").unwrap();
        facade
            .initialize_target("logs", "chat.log", "chat")
            .unwrap();
        facade
            .write_line(LogLevel::Warning, format_args!("seat {} empty", 2))
            .unwrap();

        let initialized = backend.initialized.lock().unwrap();
        assert_eq!(initialized[0].1, "logfile");
        assert_eq!(initialized[1].1, "chat");
        assert!(initialized[1].0.ends_with("chat.log"));

        let lines = backend.lines.lock().unwrap();
        assert_eq!(
            lines.as_slice(),
            &[(Severity::from(LogLevel::Warning), "seat 2 empty".to_string())]
        );
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        let facade = LogFacade::new();
        let backend = Arc::new(FailingBackend {
            writes: AtomicUsize::new(0),
        });
        facade.set_backend(backend.clone());

        for code in 0..8u8 {
            assert!(facade
                .write_line(Severity::from_code(code), format_args!("line {}", code))
                .is_ok());
        }
        assert_eq!(backend.writes.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn test_initialize_errors_propagate() {
        let facade = LogFacade::new();
        facade.set_backend(Arc::new(FailingBackend {
            writes: AtomicUsize::new(0),
        }));

        let err = facade.initialize_target("logs", "x.log", "audit").unwrap_err();
        assert!(matches!(
            err,
            LogError::Configuration(ConfigurationError::TargetNotFound(ref t)) if t == "audit"
        ));
    }

    #[test]
    fn test_clear_backend() {
        let facade = LogFacade::new();
        facade.set_backend(Arc::new(RecordingBackend::default()));
        assert!(facade.clear_backend().is_some());
        assert!(matches!(
            facade.write_line(LogLevel::Debug, format_args!("x")),
            Err(LogError::NotInitialized)
        ));
    }
}

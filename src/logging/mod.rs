//! Logging subsystem.
//!
//! # Data Flow
//! ```text
//! game / test code
//!     → LogFacade::global() (facade.rs, lazily constructed)
//!     → Arc<dyn LogBackend> (backend.rs)
//!     → private tracing dispatcher
//!     → TargetWriter (writer.rs) → active target file
//! ```
//!
//! # Design Decisions
//! - `initialize` errors propagate: a misconfigured target is a static
//!   problem the caller must see immediately
//! - `write_line` errors and panics are swallowed and only counted
//!   (`log_write_failures_total`)
//! - The crate's own diagnostics go through plain `tracing` macros to
//!   whatever global subscriber the host installed

pub mod backend;
pub mod error;
pub mod facade;
pub mod level;
pub mod writer;

pub use backend::{LogBackend, TracingBackend};
pub use error::{ConfigurationError, LogError, WriteFailure};
pub use facade::LogFacade;
pub use level::{LogLevel, Severity};
pub use writer::TargetWriter;

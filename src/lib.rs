//! Diagnostics and test substrate for the networked game services.
//!
//! - [`logging`]: process-wide log facade over a pluggable backend
//! - [`random`]: process-wide pseudo-random source
//! - [`events`]: event channels and the wiring checker used by tests
//! - [`config`]: TOML configuration for the above

pub mod config;
pub mod events;
pub mod logging;
pub mod random;

pub use config::DiagnosticsConfig;
pub use events::{check_events, EventChannel, Observable};
pub use logging::{LogBackend, LogError, LogFacade, LogLevel, TracingBackend};
pub use random::PrngService;

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DiagnosticsConfig (validated)
//!     → LoggingConfig handed to the log backend
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The target table is read-only after load, except for the file path
//!   the backend rebinds on `initialize`

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::DiagnosticsConfig;
pub use schema::LogFormat;
pub use schema::LoggingConfig;
pub use schema::RandomConfig;
pub use schema::TargetConfig;
pub use schema::DEFAULT_TARGET;

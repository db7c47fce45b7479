//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default target names an existing target)
//! - Reject empty target names and empty file paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DiagnosticsConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::DiagnosticsConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("default target '{0}' is not defined")]
    UnknownDefaultTarget(String),

    #[error("target names must not be empty")]
    EmptyTargetName,

    #[error("target '{0}' has an empty file path")]
    EmptyFilePath(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &DiagnosticsConfig) -> Result<(), Vec<ValidationError>> {
    let logging = &config.logging;
    let mut errors = Vec::new();

    if !logging.targets.contains_key(&logging.default_target) {
        errors.push(ValidationError::UnknownDefaultTarget(
            logging.default_target.clone(),
        ));
    }

    for (name, target) in &logging.targets {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyTargetName);
        }
        if target
            .file
            .as_ref()
            .is_some_and(|file| file.as_os_str().is_empty())
        {
            errors.push(ValidationError::EmptyFilePath(name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

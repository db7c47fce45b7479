//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the diagnostics layer.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name of the output target used when callers do not pick one.
pub const DEFAULT_TARGET: &str = "logfile";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Output targets for the log backend.
    pub logging: LoggingConfig,

    /// Random source settings.
    pub random: RandomConfig,
}

/// Logging configuration: a named set of output targets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Target bound at backend construction when it already has a file.
    pub default_target: String,

    /// Line format written to target files.
    pub format: LogFormat,

    /// Named output targets.
    pub targets: BTreeMap<String, TargetConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let mut targets = BTreeMap::new();
        targets.insert(DEFAULT_TARGET.to_string(), TargetConfig::default());

        Self {
            default_target: DEFAULT_TARGET.to_string(),
            format: LogFormat::default(),
            targets,
        }
    }
}

/// Output format of a target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines, no ANSI colours.
    #[default]
    Full,
    /// One JSON object per line.
    Json,
}

/// A single file output target.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TargetConfig {
    /// File the target writes to. Unset until rebound by `initialize`.
    pub file: Option<PathBuf>,
}

impl TargetConfig {
    /// Target writing to `file`.
    pub fn with_file(file: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(file.into()),
        }
    }
}

/// Random source configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RandomConfig {
    /// Fixed seed for reproducible draws (replays, tests).
    pub seed: Option<u64>,
}

//! Log levels and raw severity codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a log line.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
}

impl LogLevel {
    /// Map a numeric severity code onto a level, if it names one.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LogLevel::Debug),
            1 => Some(LogLevel::Info),
            2 => Some(LogLevel::Warning),
            3 => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Severity handed to a backend.
///
/// Carries the raw code so that severities relayed from elsewhere can fall
/// outside the four known levels. Backends drop such lines silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Severity(u8);

impl Severity {
    pub const fn from_code(code: u8) -> Self {
        Self(code)
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    /// The level this severity maps to, `None` when unmapped.
    pub fn level(self) -> Option<LogLevel> {
        LogLevel::from_code(self.0)
    }
}

impl From<LogLevel> for Severity {
    fn from(level: LogLevel) -> Self {
        Self(level as u8)
    }
}

impl From<u8> for Severity {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

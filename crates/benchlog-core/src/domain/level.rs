//! Log severity levels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Log level, ordered from most to least verbose.
///
/// Numeric values follow the conventional 10/20/30/40/50 scale so that
/// level names and numbers line up with other tooling reading these files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug = 10,
    Info = 20,
    Warning = 30,
    Error = 40,
    Critical = 50,
}

impl LogLevel {
    /// Level used when nothing (or nothing valid) is configured
    pub const DEFAULT: LogLevel = LogLevel::Debug;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Parse a level name, case-insensitively.
    ///
    /// Accepts `warn` and `fatal` as aliases. `notset`, empty and unknown
    /// names return `None`, as do names with surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARNING" | "WARN" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            "CRITICAL" | "FATAL" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Parse a level name, falling back to [`LogLevel::DEFAULT`].
    pub fn resolve(s: Option<&str>) -> Self {
        s.and_then(Self::parse).unwrap_or(Self::DEFAULT)
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Severity levels that decide which messages reach the log file.

use crate::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so the logger can compare a message's level against the configured minimum.
///
/// The discriminants are the integer values accepted from configuration data.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Development-time diagnostics that are too noisy for normal operation.
    Debug = 0,
    /// Normal operational milestones.
    #[default]
    Info = 1,
    /// Non-fatal anomalies that may need attention.
    Warn = 2,
    /// Failures that prevented an operation from completing.
    Error = 3,
    /// Failures that threaten the whole process.
    Critical = 4,
}

impl Level {
    /// Uppercase tag written into every log line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// All levels in ascending severity.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::Critical,
        ]
    }

    /// Integer value used by configuration data.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Maps a configuration integer onto a level; only the five defined values are accepted.
    ///
    /// # Errors
    /// `Error::InvalidLevel` for anything outside `0..=4`.
    pub fn validate(value: i64) -> Result<Self, Error> {
        match value {
            0 => Ok(Self::Debug),
            1 => Ok(Self::Info),
            2 => Ok(Self::Warn),
            3 => Ok(Self::Error),
            4 => Ok(Self::Critical),
            _ => Err(Error::InvalidLevel(value.to_string())),
        }
    }

    /// Configuration data carries the level either as its integer value or as a name.
    ///
    /// # Errors
    /// `Error::InvalidLevel` for out-of-range integers, unknown names, and any other JSON type.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| Error::InvalidLevel(n.to_string()))
                .and_then(Self::validate),
            Value::String(s) => s
                .parse()
                .map_err(|_| Error::InvalidLevel(format!("{s:?}"))),
            other => Err(Error::InvalidLevel(other.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            "critical" | "crit" | "fatal" => Ok(Self::Critical),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

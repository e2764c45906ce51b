//! Unified error type for all rotalog operations.

use crate::config::ConfigLoadError;
use std::path::PathBuf;

/// Error type for rotalog operations.
///
/// Validation variants are raised before any I/O happens; the remaining variants come from the
/// file system boundary.
#[derive(Debug)]
pub enum Error {
    /// Level value outside the five defined severities.
    InvalidLevel(String),
    /// Size below the 1 KiB floor, or a time threshold that is not a named interval.
    InvalidThreshold(String),
    /// File prefix that is empty or cannot be part of a file name.
    InvalidPrefix(String),
    /// Log directory that is not a usable path.
    InvalidPath(String),
    /// The configuration source could not produce a key-value map.
    ConfigLoad(ConfigLoadError),
    /// A new log file could not be opened.
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Appending a line to the open log file failed.
    Write(std::io::Error),
    /// Closing the old file or opening its replacement failed during a roll.
    Rotation(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(v) => write!(f, "invalid log level: {v}"),
            Self::InvalidThreshold(v) => write!(f, "invalid rolling threshold: {v}"),
            Self::InvalidPrefix(v) => write!(f, "invalid file prefix: {v}"),
            Self::InvalidPath(v) => write!(f, "invalid path: {v}"),
            Self::ConfigLoad(e) => write!(f, "config load error: {e}"),
            Self::FileOpen { path, source } => {
                write!(f, "cannot open log file {}: {source}", path.display())
            }
            Self::Write(e) => write!(f, "write error: {e}"),
            Self::Rotation(e) => write!(f, "rotation failed: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigLoad(e) => Some(e),
            Self::FileOpen { source, .. } => Some(source),
            Self::Write(e) | Self::Rotation(e) => Some(e),
            Self::InvalidLevel(_)
            | Self::InvalidThreshold(_)
            | Self::InvalidPrefix(_)
            | Self::InvalidPath(_) => None,
        }
    }
}

impl From<ConfigLoadError> for Error {
    fn from(e: ConfigLoadError) -> Self {
        Self::ConfigLoad(e)
    }
}

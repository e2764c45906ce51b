//! Failures of a configuration source, kept apart from validation errors so callers can tell
//! "the file is broken" from "the file asks for something invalid".

use std::path::PathBuf;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigLoadError {
    /// Reading the config file failed (missing, unreadable).
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// JSON parsing error.
    Json(serde_json::Error),
    /// TOML parsing error.
    Toml(toml::de::Error),
    /// The document parsed, but its root is not a key-value map.
    NotAnObject(&'static str),
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::NotAnObject(kind) => write!(f, "expected a key-value map at the root, got {kind}"),
        }
    }
}

impl std::error::Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::NotAnObject(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigLoadError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<toml::de::Error> for ConfigLoadError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

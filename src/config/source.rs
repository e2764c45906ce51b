//! Where configuration data comes from. Each source produces the untyped key-value map that
//! [`LoggerConfig::from_map`](super::LoggerConfig::from_map) validates.

use super::ConfigLoadError;
use crate::internal;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Produces the raw key-value map for a logger configuration.
pub trait ConfigSource {
    /// # Errors
    /// Any failure to read or parse the underlying data.
    fn load(&self) -> Result<Map<String, Value>, ConfigLoadError>;

    /// Short label used in diagnostics.
    fn describe(&self) -> String {
        "config source".to_string()
    }
}

/// Already-parsed data needs no loading.
impl ConfigSource for Map<String, Value> {
    fn load(&self) -> Result<Map<String, Value>, ConfigLoadError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        "in-memory map".to_string()
    }
}

/// On-disk document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

/// A configuration file on disk. `~` in the path is expanded when loading.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    format: ConfigFormat,
}

impl ConfigFile {
    /// Picks TOML for a `.toml` extension and JSON for everything else.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        };
        Self { path, format }
    }

    /// Overrides the extension-based format guess.
    #[must_use]
    pub const fn format(mut self, format: ConfigFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn resolved_path(&self) -> PathBuf {
        let raw = self.path.to_string_lossy();
        PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
    }
}

impl ConfigSource for ConfigFile {
    fn load(&self) -> Result<Map<String, Value>, ConfigLoadError> {
        let path = self.resolved_path();
        internal::debug("CONFIG", &format!("Reading {}", path.display()));

        let content = fs::read_to_string(&path).map_err(|source| {
            internal::warn(
                "CONFIG",
                &format!("Cannot read {}: {source}", path.display()),
            );
            ConfigLoadError::Io {
                path: path.clone(),
                source,
            }
        })?;

        let value: Value = match self.format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };
        root_object(value)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A JSON document held in memory, e.g. from an environment variable.
#[derive(Debug, Clone)]
pub struct InlineJson(pub String);

impl ConfigSource for InlineJson {
    fn load(&self) -> Result<Map<String, Value>, ConfigLoadError> {
        root_object(serde_json::from_str(&self.0)?)
    }

    fn describe(&self) -> String {
        "inline JSON".to_string()
    }
}

fn root_object(value: Value) -> Result<Map<String, Value>, ConfigLoadError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(ConfigLoadError::NotAnObject("null")),
        Value::Bool(_) => Err(ConfigLoadError::NotAnObject("a boolean")),
        Value::Number(_) => Err(ConfigLoadError::NotAnObject("a number")),
        Value::String(_) => Err(ConfigLoadError::NotAnObject("a string")),
        Value::Array(_) => Err(ConfigLoadError::NotAnObject("an array")),
    }
}

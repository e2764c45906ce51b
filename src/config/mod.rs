//! Logger configuration: minimum level, rolling policy, file naming, and where the
//! configuration comes from.
//!
//! A config is a plain value. Every mutator consumes it and hands back the updated
//! value, so a half-applied change is never observable.

mod error;
mod partial;
mod source;

pub use error::ConfigLoadError;
pub use partial::{PartialConfig, RollingOverride};
pub use source::{ConfigFile, ConfigFormat, ConfigSource, InlineJson};

use crate::Error;
use crate::internal;
use crate::level::Level;
use crate::policy::{RollingPolicy, TimeThreshold};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Used when no prefix is configured.
pub const DEFAULT_FILE_PREFIX: &str = "Rotalog_";
/// Relative to the working directory unless configured otherwise.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Everything a [`RollingLogger`](crate::RollingLogger) needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerConfig {
    level: Level,
    /// `None` means the file is never rolled.
    rolling_policy: Option<RollingPolicy>,
    file_prefix: String,
    log_dir: PathBuf,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            rolling_policy: Some(RollingPolicy::default()),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl LoggerConfig {
    /// Info level, 5 MiB / hourly rolling, `Rotalog_` prefix, `logs/` directory.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_log_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// # Errors
    /// `Error::InvalidPrefix` when the prefix is empty or contains a path separator or NUL.
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Result<Self, Error> {
        let prefix = prefix.into();
        validate_prefix(&prefix)?;
        self.file_prefix = prefix;
        Ok(self)
    }

    #[must_use]
    pub const fn with_rolling_policy(mut self, policy: RollingPolicy) -> Self {
        self.rolling_policy = Some(policy);
        self
    }

    /// Builds the rolling policy from untyped data, starting from the policy defaults.
    ///
    /// # Errors
    /// `Error::InvalidThreshold` for an unusable `size_threshold` or `time_threshold`.
    pub fn with_rolling_map(self, map: &Map<String, Value>) -> Result<Self, Error> {
        Ok(self.with_rolling_policy(RollingPolicy::from_map(map)?))
    }

    /// The log file is never replaced.
    #[must_use]
    pub const fn without_rolling(mut self) -> Self {
        self.rolling_policy = None;
        self
    }

    #[must_use]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Layers recognized keys from untyped data onto the defaults.
    ///
    /// # Errors
    /// The validation error of the first bad value; nothing is built in that case.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, Error> {
        Self::default().merge_map(map)
    }

    /// Same as [`Self::from_map`] but layered onto `self`.
    ///
    /// # Errors
    /// The validation error of the first bad value.
    pub fn merge_map(self, map: &Map<String, Value>) -> Result<Self, Error> {
        Ok(PartialConfig::from_map(map)?.apply_to(self))
    }

    /// Loads the raw map from `source`, then validates it like [`Self::from_map`].
    ///
    /// # Errors
    /// `Error::ConfigLoad` when the source fails; validation errors for bad values.
    pub fn from_external_source(source: &dyn ConfigSource) -> Result<Self, Error> {
        let map = source.load().map_err(|e| {
            internal::error(
                "CONFIG",
                &format!("Failed to load {}: {e}", source.describe()),
            );
            Error::ConfigLoad(e)
        })?;
        let config = Self::from_map(&map)?;
        internal::info(
            "CONFIG",
            &format!("Config loaded from {}", source.describe()),
        );
        Ok(config)
    }

    /// Shorthand for a [`ConfigFile`] source.
    ///
    /// # Errors
    /// See [`Self::from_external_source`].
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, Error> {
        Self::from_external_source(&ConfigFile::new(path))
    }

    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub const fn rolling_policy(&self) -> Option<&RollingPolicy> {
        self.rolling_policy.as_ref()
    }

    #[must_use]
    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    #[must_use]
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// `None` when rolling is disabled.
    #[must_use]
    pub fn size_threshold(&self) -> Option<u64> {
        self.rolling_policy.map(|p| p.size_threshold())
    }

    /// `None` when rolling is disabled.
    #[must_use]
    pub fn time_threshold(&self) -> Option<TimeThreshold> {
        self.rolling_policy.map(|p| p.time_threshold())
    }

    /// Effective configuration as pretty JSON, for diagnostics.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// The prefix becomes the start of a file name inside the log directory.
pub(crate) fn validate_prefix(prefix: &str) -> Result<(), Error> {
    if prefix.is_empty() {
        return Err(Error::InvalidPrefix("file_prefix must not be empty".to_string()));
    }
    if prefix.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidPrefix(format!(
            "file_prefix must not contain path separators: {prefix:?}"
        )));
    }
    Ok(())
}

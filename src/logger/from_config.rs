//! Logger construction straight from a configuration source.

use super::RollingLogger;
use crate::Error;
use crate::config::{ConfigSource, LoggerConfig};
use crate::internal;
use std::path::PathBuf;

impl RollingLogger {
    /// Loads the configuration from `source` and opens the first file.
    ///
    /// # Errors
    /// `Error::ConfigLoad` or a validation error from the config; `Error::FileOpen` if the
    /// first file cannot be opened.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self, Error> {
        let config = LoggerConfig::from_external_source(source)?;
        let rolling = config.rolling_policy().map_or_else(
            || "off".to_string(),
            |p| format!("{}B/{}", p.size_threshold(), p.time_threshold()),
        );
        internal::debug(
            "LOGGER",
            &format!(
                "level={} prefix={} dir={} rolling={rolling}",
                config.level(),
                config.file_prefix(),
                config.log_dir().display(),
            ),
        );
        Self::init(config)
    }

    /// Shorthand for a JSON or TOML file on disk.
    ///
    /// # Errors
    /// See [`Self::from_source`].
    pub fn from_config_file(path: impl Into<PathBuf>) -> Result<Self, Error> {
        Self::from_source(&crate::config::ConfigFile::new(path))
    }
}

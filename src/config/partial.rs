//! Typed view of untyped configuration data: every field optional, every present field already
//! validated. Merging onto a base config therefore cannot fail.

use super::{LoggerConfig, validate_prefix};
use crate::Error;
use crate::level::Level;
use crate::policy::RollingPolicy;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// What the `rolling_config` key asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollingOverride {
    /// `null` turns rolling off.
    Disabled,
    Enabled(RollingPolicy),
}

/// A configuration with only the keys that were present in the source data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialConfig {
    pub level: Option<Level>,
    pub rolling: Option<RollingOverride>,
    pub file_prefix: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl PartialConfig {
    /// Recognized keys: `level`, `rolling_config`, `file_prefix`, `log_dir`. Others are ignored
    /// so newer config files keep working with older builds.
    ///
    /// # Errors
    /// The validation error of the first recognized key holding an unusable value.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, Error> {
        let mut partial = Self::default();

        for (key, value) in map {
            match key.as_str() {
                "level" => partial.level = Some(Level::from_value(value)?),
                "rolling_config" => partial.rolling = Some(rolling_from_value(value)?),
                "file_prefix" => {
                    let Value::String(prefix) = value else {
                        return Err(Error::InvalidPrefix(format!(
                            "file_prefix must be a string, got {value}"
                        )));
                    };
                    validate_prefix(prefix)?;
                    partial.file_prefix = Some(prefix.clone());
                }
                "log_dir" => match value {
                    Value::String(dir) if !dir.trim().is_empty() => {
                        partial.log_dir = Some(PathBuf::from(dir));
                    }
                    other => {
                        return Err(Error::InvalidPath(format!(
                            "log_dir must be a non-empty string, got {other}"
                        )));
                    }
                },
                _ => {}
            }
        }

        Ok(partial)
    }

    /// Overwrites the fields of `base` that this partial carries.
    #[must_use]
    pub fn apply_to(self, mut base: LoggerConfig) -> LoggerConfig {
        if let Some(level) = self.level {
            base.level = level;
        }
        match self.rolling {
            Some(RollingOverride::Disabled) => base.rolling_policy = None,
            Some(RollingOverride::Enabled(policy)) => base.rolling_policy = Some(policy),
            None => {}
        }
        if let Some(prefix) = self.file_prefix {
            base.file_prefix = prefix;
        }
        if let Some(dir) = self.log_dir {
            base.log_dir = dir;
        }
        base
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.rolling.is_none()
            && self.file_prefix.is_none()
            && self.log_dir.is_none()
    }
}

fn rolling_from_value(value: &Value) -> Result<RollingOverride, Error> {
    match value {
        Value::Null => Ok(RollingOverride::Disabled),
        Value::Object(map) => RollingPolicy::from_map(map).map(RollingOverride::Enabled),
        other => Err(Error::InvalidThreshold(format!(
            "rolling_config must be a map or null, got {other}"
        ))),
    }
}

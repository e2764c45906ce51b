//! When a log file must be replaced: a byte-size ceiling and a maximum age.
//!
//! The age is restricted to a fixed set of named intervals so rotation cadence stays
//! predictable; the size has a 1 KiB floor so a misconfigured value cannot rotate on every line.

use crate::Error;
use crate::size::parse_size;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const MONTH: u64 = 30 * DAY;

/// The only accepted maximum file ages.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeThreshold {
    Minutely,
    #[default]
    Hourly,
    Daily,
    Weekly,
    /// Thirty days.
    Monthly,
    /// Twelve thirty-day months.
    Yearly,
}

impl TimeThreshold {
    /// Interval length in seconds.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        match self {
            Self::Minutely => MINUTE,
            Self::Hourly => HOUR,
            Self::Daily => DAY,
            Self::Weekly => 7 * DAY,
            Self::Monthly => MONTH,
            Self::Yearly => 12 * MONTH,
        }
    }

    /// Maps a number of seconds back onto its named interval.
    ///
    /// # Errors
    /// `Error::InvalidThreshold` when `secs` is not exactly one of the named intervals.
    pub fn from_secs(secs: u64) -> Result<Self, Error> {
        Self::all()
            .into_iter()
            .find(|t| t.as_secs() == secs)
            .ok_or_else(|| {
                Error::InvalidThreshold(format!(
                    "time_threshold {secs}s is not one of the named intervals"
                ))
            })
    }

    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Minutely,
            Self::Hourly,
            Self::Daily,
            Self::Weekly,
            Self::Monthly,
            Self::Yearly,
        ]
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minutely => "minutely",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for TimeThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeThreshold {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minutely" | "minute" => Ok(Self::Minutely),
            "hourly" | "hour" => Ok(Self::Hourly),
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            _ => Err(Error::InvalidThreshold(format!(
                "unknown time interval: '{s}'"
            ))),
        }
    }
}

/// Size and age limits for one log file. Each `with_*` call returns a new policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollingPolicy {
    size_threshold: u64,
    time_threshold: TimeThreshold,
}

impl Default for RollingPolicy {
    fn default() -> Self {
        Self {
            size_threshold: Self::FIVE_MB,
            time_threshold: TimeThreshold::Hourly,
        }
    }
}

impl RollingPolicy {
    pub const ONE_KB: u64 = 1024;
    pub const FIVE_KB: u64 = 5 * Self::ONE_KB;
    pub const TEN_KB: u64 = 10 * Self::ONE_KB;
    pub const TWENTY_KB: u64 = 20 * Self::ONE_KB;
    pub const FIFTY_KB: u64 = 50 * Self::ONE_KB;
    pub const HUNDRED_KB: u64 = 100 * Self::ONE_KB;
    pub const HALF_MB: u64 = 512 * Self::ONE_KB;
    pub const ONE_MB: u64 = 1024 * Self::ONE_KB;
    pub const FIVE_MB: u64 = 5 * Self::ONE_MB;
    pub const TEN_MB: u64 = 10 * Self::ONE_MB;
    pub const TWENTY_MB: u64 = 20 * Self::ONE_MB;
    pub const FIFTY_MB: u64 = 50 * Self::ONE_MB;
    pub const HUNDRED_MB: u64 = 100 * Self::ONE_MB;

    /// Anything smaller would rotate after a handful of lines.
    pub const MIN_SIZE_THRESHOLD: u64 = Self::ONE_KB;

    /// 5 MiB, hourly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// `Error::InvalidThreshold` when `bytes` is below [`Self::MIN_SIZE_THRESHOLD`].
    pub fn with_size_threshold(self, bytes: u64) -> Result<Self, Error> {
        if bytes < Self::MIN_SIZE_THRESHOLD {
            return Err(Error::InvalidThreshold(format!(
                "size_threshold must be at least {} bytes, got {bytes}",
                Self::MIN_SIZE_THRESHOLD
            )));
        }
        Ok(Self {
            size_threshold: bytes,
            ..self
        })
    }

    /// # Errors
    /// `Error::InvalidThreshold` when `secs` is not one of the [`TimeThreshold`] intervals.
    pub fn with_time_threshold(self, secs: u64) -> Result<Self, Error> {
        Ok(self.with_time_interval(TimeThreshold::from_secs(secs)?))
    }

    #[must_use]
    pub const fn with_time_interval(self, interval: TimeThreshold) -> Self {
        Self {
            time_threshold: interval,
            ..self
        }
    }

    /// Applies `size_threshold` and `time_threshold` from untyped configuration data on top
    /// of the defaults. Unknown keys are ignored; a missing key keeps its default.
    ///
    /// `size_threshold` may be an integer byte count or a size string ("5M");
    /// `time_threshold` may be an integer number of seconds or an interval name ("daily").
    ///
    /// # Errors
    /// `Error::InvalidThreshold` for a recognized key holding an unusable value.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, Error> {
        Self::default().merge_map(map)
    }

    /// Same as [`Self::from_map`] but layered onto `self` instead of the defaults.
    ///
    /// # Errors
    /// `Error::InvalidThreshold` for a recognized key holding an unusable value.
    pub fn merge_map(self, map: &Map<String, Value>) -> Result<Self, Error> {
        let mut policy = self;
        if let Some(v) = map.get("size_threshold") {
            policy = policy.with_size_threshold(size_from_value(v)?)?;
        }
        if let Some(v) = map.get("time_threshold") {
            policy = policy.with_time_interval(time_from_value(v)?);
        }
        Ok(policy)
    }

    #[must_use]
    pub const fn size_threshold(&self) -> u64 {
        self.size_threshold
    }

    #[must_use]
    pub const fn time_threshold(&self) -> TimeThreshold {
        self.time_threshold
    }

    /// Either limit alone is enough.
    #[must_use]
    pub const fn should_roll(&self, size_bytes: u64, age_secs: u64) -> bool {
        size_bytes >= self.size_threshold || age_secs >= self.time_threshold.as_secs()
    }
}

fn size_from_value(value: &Value) -> Result<u64, Error> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            Error::InvalidThreshold(format!("size_threshold must be a whole byte count, got {n}"))
        }),
        Value::String(s) => parse_size(s).ok_or_else(|| {
            Error::InvalidThreshold(format!("size_threshold is not a size: '{s}'"))
        }),
        other => Err(Error::InvalidThreshold(format!(
            "size_threshold must be numeric, got {other}"
        ))),
    }
}

fn time_from_value(value: &Value) -> Result<TimeThreshold, Error> {
    match value {
        Value::Number(n) => n.as_u64().map_or_else(
            || {
                Err(Error::InvalidThreshold(format!(
                    "time_threshold must be a whole number of seconds, got {n}"
                )))
            },
            TimeThreshold::from_secs,
        ),
        Value::String(s) => s.parse(),
        other => Err(Error::InvalidThreshold(format!(
            "time_threshold must be numeric, got {other}"
        ))),
    }
}

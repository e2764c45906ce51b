//! `rotalog` - an embeddable leveled file logger that rolls its file by size and age.
//!
//! - Five ordered severities with a configurable minimum
//! - One open file per logger, replaced when it grows past a byte limit or outlives a named
//!   interval (minutely through yearly)
//! - Configuration built in code or loaded from JSON/TOML key-value data
//! - Thread-safe: writes and rolls are serialized per logger
//!
//! # Example
//!
//! ```no_run
//! use rotalog::{Level, LoggerConfig, RollingLogger, RollingPolicy, TimeThreshold};
//!
//! let policy = RollingPolicy::new()
//!     .with_size_threshold(RollingPolicy::TEN_MB)?
//!     .with_time_interval(TimeThreshold::Daily);
//! let config = LoggerConfig::with_defaults()
//!     .with_log_level(Level::Debug)
//!     .with_file_prefix("myapp_")?
//!     .with_rolling_policy(policy);
//!
//! let logger = RollingLogger::init(config)?;
//! logger.info("Application started")?;
//! logger.debug("Connecting to server...")?;
//! # Ok::<(), rotalog::Error>(())
//! ```
//!
//! Each accepted call appends one line:
//!
//! ```text
//! [2024-05-01T12:30:45.123Z] [INFO] src/main.rs:14 Application started
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `rotalog` command-line binary

pub mod config;
mod error;
pub mod internal;
pub mod level;
pub mod logger;
pub mod policy;
pub mod size;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::{ConfigFile, ConfigLoadError, ConfigSource, LoggerConfig, PartialConfig};
pub use error::Error;
pub use level::Level;
pub use logger::{
    CallerInfo, Clock, FixedCaller, LoggerState, ManualClock, RollingLogger, RollingLoggerBuilder,
    SourceLocation, SystemClock,
};
pub use policy::{RollingPolicy, TimeThreshold};
pub use size::{format_size, parse_size};

//! The rolling engine: level filter, line formatting, append, and the size/age check that
//! swaps the open file for a new one.
//!
//! All file-handle work happens under one mutex, so a write never targets a handle that is
//! being closed, at most one roll runs at a time, and lines land in call order.

mod builder;
mod caller;
mod clock;
mod file;
mod from_config;

pub use builder::RollingLoggerBuilder;
pub use caller::{CallerInfo, FixedCaller, SourceLocation};
pub use clock::{Clock, ManualClock, SystemClock};
pub use file::file_stamp;

use crate::Error;
use crate::config::LoggerConfig;
use crate::internal;
use crate::level::Level;
use crate::policy::TimeThreshold;
use crate::size::format_size;
use chrono::{DateTime, SecondsFormat, Utc};
use file::ActiveFile;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lifecycle of the logger's file handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerState {
    /// No file opened yet. The first accepted write opens one.
    Uninitialized,
    /// A file is open and receiving lines.
    Ready,
    /// The handle was released by [`RollingLogger::close`] or a failed roll. Writes are
    /// dropped until [`RollingLogger::open_new_file`] is called.
    Closed,
}

#[derive(Debug)]
enum Handle {
    Uninitialized,
    Ready(ActiveFile),
    Closed,
}

impl Handle {
    const fn state(&self) -> LoggerState {
        match self {
            Self::Uninitialized => LoggerState::Uninitialized,
            Self::Ready(_) => LoggerState::Ready,
            Self::Closed => LoggerState::Closed,
        }
    }
}

/// Writes leveled lines to a file in the configured directory and rolls to a new file when
/// the policy's size or age limit is reached.
///
/// ```no_run
/// use rotalog::{Level, LoggerConfig, RollingLogger};
///
/// let config = LoggerConfig::with_defaults().with_log_level(Level::Debug);
/// let logger = RollingLogger::init(config)?;
/// logger.info("service started")?;
/// # Ok::<(), rotalog::Error>(())
/// ```
pub struct RollingLogger {
    config: Arc<LoggerConfig>,
    clock: Box<dyn Clock>,
    caller: Box<dyn CallerInfo>,
    handle: Mutex<Handle>,
}

impl std::fmt::Debug for RollingLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RollingLogger")
            .field("config", &self.config)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl RollingLogger {
    /// Entry point for injecting a clock or caller-info provider.
    #[must_use]
    pub fn builder(config: impl Into<Arc<LoggerConfig>>) -> RollingLoggerBuilder {
        RollingLoggerBuilder::new(config)
    }

    /// A logger that opens its first file lazily, on the first accepted write.
    #[must_use]
    pub fn new(config: impl Into<Arc<LoggerConfig>>) -> Self {
        Self::builder(config).build()
    }

    /// Default configuration, lazily opened.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoggerConfig::default())
    }

    /// A logger whose first file is already open.
    ///
    /// # Errors
    /// `Error::FileOpen` if the directory or file cannot be created.
    pub fn init(config: impl Into<Arc<LoggerConfig>>) -> Result<Self, Error> {
        let logger = Self::new(config);
        logger.open_new_file()?;
        Ok(logger)
    }

    pub(crate) fn from_parts(
        config: Arc<LoggerConfig>,
        clock: Box<dyn Clock>,
        caller: Box<dyn CallerInfo>,
    ) -> Self {
        Self {
            config,
            clock,
            caller,
            handle: Mutex::new(Handle::Uninitialized),
        }
    }

    /// A writer that panicked mid-line leaves nothing half-updated in `Handle`, so the
    /// poisoned guard is still usable.
    fn lock(&self) -> MutexGuard<'_, Handle> {
        self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens a fresh file and makes it current, closing any file that is already open.
    /// Also the way back to `Ready` after a failed roll.
    ///
    /// # Errors
    /// `Error::FileOpen` if the directory or file cannot be created. A logger that never had a
    /// file stays `Uninitialized`; one that had a file is left `Closed`.
    pub fn open_new_file(&self) -> Result<PathBuf, Error> {
        let mut handle = self.lock();
        let previous = std::mem::replace(&mut *handle, Handle::Closed);
        let never_opened = matches!(previous, Handle::Uninitialized);
        if let Handle::Ready(old) = previous
            && let Err(e) = old.close()
        {
            internal::warn("LOGGER", &format!("Closing previous file failed: {e}"));
        }

        match self.open_file() {
            Ok(file) => {
                let path = file.path().to_path_buf();
                *handle = Handle::Ready(file);
                Ok(path)
            }
            Err(e) => {
                if never_opened {
                    *handle = Handle::Uninitialized;
                }
                Err(e)
            }
        }
    }

    /// Alias of [`Self::open_new_file`] for hosts recovering from a failed roll.
    ///
    /// # Errors
    /// See [`Self::open_new_file`].
    pub fn reopen(&self) -> Result<PathBuf, Error> {
        self.open_new_file()
    }

    /// Flushes and releases the current file. Later writes are dropped until the host reopens.
    ///
    /// # Errors
    /// `Error::Write` if the final flush fails; the handle is released regardless.
    pub fn close(&self) -> Result<(), Error> {
        let mut handle = self.lock();
        match std::mem::replace(&mut *handle, Handle::Closed) {
            Handle::Ready(file) => {
                let path = file.path().to_path_buf();
                file.close().map_err(Error::Write)?;
                internal::debug("LOGGER", &format!("Closed {}", path.display()));
                Ok(())
            }
            Handle::Uninitialized | Handle::Closed => Ok(()),
        }
    }

    /// # Errors
    /// `Error::Write` if the flush fails.
    pub fn flush(&self) -> Result<(), Error> {
        match &mut *self.lock() {
            Handle::Ready(file) => file.flush().map_err(Error::Write),
            Handle::Uninitialized | Handle::Closed => Ok(()),
        }
    }

    fn open_file(&self) -> Result<ActiveFile, Error> {
        let dir = resolve_dir(&self.config);
        ActiveFile::open(&dir, self.config.file_prefix(), self.clock.now()).map_err(
            |(path, source)| {
                internal::error(
                    "LOGGER",
                    &format!("Cannot open {}: {source}", path.display()),
                );
                Error::FileOpen { path, source }
            },
        )
    }

    /// Core write path shared by the level methods.
    ///
    /// Below-threshold messages return immediately without touching the file. In the `Closed`
    /// state accepted messages are dropped and `Ok` is returned.
    ///
    /// # Errors
    /// `Error::FileOpen` when the lazy first open fails, `Error::Write` when the append fails
    /// (the line was not written), and `Error::Rotation` when the line was written but
    /// replacing the file afterwards failed.
    #[track_caller]
    pub fn log(&self, level: Level, message: &str) -> Result<(), Error> {
        self.log_at(level, message, Location::caller())
    }

    fn log_at(&self, level: Level, message: &str, location: &Location<'_>) -> Result<(), Error> {
        if level < self.config.level() {
            return Ok(());
        }

        let mut handle = self.lock();
        if matches!(*handle, Handle::Uninitialized) {
            *handle = Handle::Ready(self.open_file()?);
        }
        let Handle::Ready(file) = &mut *handle else {
            return Ok(());
        };

        let line = format_line(
            self.clock.now(),
            level,
            &self.caller.caller_info(location),
            message,
        );
        file.append(&line).map_err(|e| {
            internal::error("LOGGER", &format!("Write failed: {e}"));
            Error::Write(e)
        })?;

        self.roll(&mut handle)
    }

    /// Replaces the current file when the policy says it is too big or too old.
    /// Runs at most once per written line.
    fn roll(&self, handle: &mut Handle) -> Result<(), Error> {
        let Some(policy) = self.config.rolling_policy() else {
            return Ok(());
        };
        let Handle::Ready(file) = handle else {
            return Ok(());
        };

        let size = file.size();
        let age = file.age_secs(self.clock.now());
        if !policy.should_roll(size, age) {
            return Ok(());
        }

        let Handle::Ready(old) = std::mem::replace(handle, Handle::Closed) else {
            return Ok(());
        };
        let old_path = old.path().to_path_buf();
        if let Err(e) = old.close() {
            internal::error("LOGGER", &format!("Rotation close failed: {e}"));
            return Err(Error::Rotation(e));
        }

        match self.open_file() {
            Ok(new) => {
                internal::info(
                    "LOGGER",
                    &format!(
                        "Rolled {} ({}, {age}s old) -> {}",
                        old_path.display(),
                        format_size(size),
                        new.path().display()
                    ),
                );
                *handle = Handle::Ready(new);
                Ok(())
            }
            Err(Error::FileOpen { source, .. }) => Err(Error::Rotation(source)),
            Err(other) => Err(other),
        }
    }

    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) -> Result<(), Error> {
        self.log_at(Level::Debug, message.as_ref(), Location::caller())
    }

    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) -> Result<(), Error> {
        self.log_at(Level::Info, message.as_ref(), Location::caller())
    }

    #[track_caller]
    pub fn warn(&self, message: impl AsRef<str>) -> Result<(), Error> {
        self.log_at(Level::Warn, message.as_ref(), Location::caller())
    }

    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) -> Result<(), Error> {
        self.log_at(Level::Error, message.as_ref(), Location::caller())
    }

    #[track_caller]
    pub fn critical(&self, message: impl AsRef<str>) -> Result<(), Error> {
        self.log_at(Level::Critical, message.as_ref(), Location::caller())
    }

    #[must_use]
    pub fn state(&self) -> LoggerState {
        self.lock().state()
    }

    /// Path of the file currently receiving lines.
    #[must_use]
    pub fn current_path(&self) -> Option<PathBuf> {
        match &*self.lock() {
            Handle::Ready(file) => Some(file.path().to_path_buf()),
            Handle::Uninitialized | Handle::Closed => None,
        }
    }

    /// Creation time of the current file, as read from the injected clock.
    #[must_use]
    pub fn current_file_created_at(&self) -> Option<DateTime<Utc>> {
        match &*self.lock() {
            Handle::Ready(file) => Some(file.created_at()),
            Handle::Uninitialized | Handle::Closed => None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.config.level()
    }

    #[must_use]
    pub fn file_prefix(&self) -> &str {
        self.config.file_prefix()
    }

    #[must_use]
    pub fn size_threshold(&self) -> Option<u64> {
        self.config.size_threshold()
    }

    #[must_use]
    pub fn time_threshold(&self) -> Option<TimeThreshold> {
        self.config.time_threshold()
    }
}

/// `[2024-05-01T12:30:45.123Z] [INFO] src/main.rs:10 message`
#[must_use]
pub fn format_line(at: DateTime<Utc>, level: Level, caller: &str, message: &str) -> String {
    format!(
        "[{}] [{}] {caller} {message}\n",
        at.to_rfc3339_opts(SecondsFormat::Millis, true),
        level.as_str()
    )
}

/// Expands a leading `~` in the configured directory.
fn resolve_dir(config: &LoggerConfig) -> PathBuf {
    let raw = config.log_dir().to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}

//! Optional capabilities (clock, caller info) are set through a builder so the common case
//! stays `RollingLogger::new(config)`.

use super::{CallerInfo, Clock, RollingLogger, SourceLocation, SystemClock};
use crate::config::LoggerConfig;
use std::sync::Arc;

/// Collects the logger's collaborators before construction.
pub struct RollingLoggerBuilder {
    config: Arc<LoggerConfig>,
    clock: Box<dyn Clock>,
    caller: Box<dyn CallerInfo>,
}

impl RollingLoggerBuilder {
    /// Wall clock and `file:line` caller labels unless overridden.
    #[must_use]
    pub fn new(config: impl Into<Arc<LoggerConfig>>) -> Self {
        Self {
            config: config.into(),
            clock: Box::new(SystemClock),
            caller: Box::new(SourceLocation),
        }
    }

    /// Tests drive age-based rolling with a [`ManualClock`](super::ManualClock).
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the `file:line` label written before each message.
    #[must_use]
    pub fn caller_info(mut self, caller: impl CallerInfo + 'static) -> Self {
        self.caller = Box::new(caller);
        self
    }

    /// Nothing is opened yet; the first accepted write opens the file.
    #[must_use]
    pub fn build(self) -> RollingLogger {
        RollingLogger::from_parts(self.config, self.clock, self.caller)
    }

    /// Builds and opens the first file immediately.
    ///
    /// # Errors
    /// `Error::FileOpen` if the directory or file cannot be created.
    pub fn init(self) -> Result<RollingLogger, crate::Error> {
        let logger = self.build();
        logger.open_new_file()?;
        Ok(logger)
    }
}

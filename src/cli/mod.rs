//! Command-line front end: appends one message, or every line of stdin, to a rolling log.
//!
//! Useful for shell scripts and for piping a long-running process into rotated files:
//! `my-daemon 2>&1 | rotalog --stdin --prefix daemon_ --max-size 10M`.

use crate::config::{ConfigFile, LoggerConfig};
use crate::internal;
use crate::level::Level;
use crate::logger::{FixedCaller, RollingLogger};
use crate::policy::TimeThreshold;
use crate::Error;
use crate::size::parse_size;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

/// Log level for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
            LogLevel::Critical => Self::Critical,
        }
    }
}

/// rotalog - append leveled lines to a size/age-rolled log file.
#[derive(Debug, Parser)]
#[command(name = "rotalog", version, about = "Append leveled lines to a rolling log file")]
pub struct Cli {
    /// JSON or TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Level the message is written at
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    pub level: LogLevel,

    /// Minimum level that reaches the file (overrides the config)
    #[arg(long, value_enum)]
    pub min_level: Option<LogLevel>,

    /// File name prefix (overrides the config)
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Directory the log files are written to (overrides the config)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Roll when the file reaches this size, e.g. 512K or 10M
    #[arg(long)]
    pub max_size: Option<String>,

    /// Roll when the file is this old: minutely, hourly, daily, weekly, monthly, yearly
    #[arg(long)]
    pub every: Option<String>,

    /// Never roll
    #[arg(long, conflicts_with_all = ["max_size", "every"])]
    pub no_roll: bool,

    /// Write each stdin line as a separate message
    #[arg(long)]
    pub stdin: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Message text; words are joined with spaces
    pub message: Vec<String>,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides layered on top.
    ///
    /// # Errors
    /// Config load failures and invalid override values.
    pub fn resolve_config(&self) -> Result<LoggerConfig, Error> {
        let mut config = match &self.config {
            Some(path) => LoggerConfig::from_external_source(&ConfigFile::new(path))?,
            None => LoggerConfig::default(),
        };

        if let Some(level) = self.min_level {
            config = config.with_log_level(level.into());
        }
        if let Some(prefix) = &self.prefix {
            config = config.with_file_prefix(prefix.as_str())?;
        }
        if let Some(dir) = &self.dir {
            config = config.with_log_dir(dir);
        }

        if self.no_roll {
            return Ok(config.without_rolling());
        }
        if self.max_size.is_some() || self.every.is_some() {
            let mut policy = config.rolling_policy().copied().unwrap_or_default();
            if let Some(size) = &self.max_size {
                let bytes = parse_size(size).ok_or_else(|| {
                    Error::InvalidThreshold(format!("not a size: '{size}'"))
                })?;
                policy = policy.with_size_threshold(bytes)?;
            }
            if let Some(every) = &self.every {
                policy = policy.with_time_interval(every.parse::<TimeThreshold>()?);
            }
            config = config.with_rolling_policy(policy);
        }

        Ok(config)
    }
}

/// Runs one CLI invocation.
#[must_use]
pub fn run(cli: &Cli) -> ExitCode {
    let config = match cli.resolve_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("rotalog: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.print_config {
        println!("{}", config.to_json());
        return ExitCode::SUCCESS;
    }

    if !cli.stdin && cli.message.is_empty() {
        eprintln!("rotalog: nothing to log (pass a message or --stdin)");
        return ExitCode::FAILURE;
    }

    let logger = RollingLogger::builder(config)
        .caller_info(FixedCaller::new("rotalog"))
        .build();
    let level = Level::from(cli.level);

    let result = if cli.stdin {
        log_stdin(&logger, level)
    } else {
        logger.log(level, &cli.message.join(" "))
    };

    match result.and_then(|()| logger.close()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            internal::error("CLI", &e.to_string());
            eprintln!("rotalog: {e}");
            ExitCode::FAILURE
        }
    }
}

fn log_stdin(logger: &RollingLogger, level: Level) -> Result<(), Error> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                internal::warn("CLI", &format!("Stopped reading stdin: {e}"));
                break;
            }
        };
        logger.log(level, &line)?;
    }
    Ok(())
}

//! rotalog's own diagnostics: file opened, file rolled, rotation failed, config loaded.
//!
//! Silent unless the `ROTALOG_INTERNAL` environment variable names a level, in which case
//! messages at or above it go to stderr. The threshold is read once through `OnceLock`, so
//! concurrent first calls from several threads agree on it.

use crate::level::Level;
use std::io::Write;
use std::sync::OnceLock;

/// Environment variable holding the diagnostics threshold (`debug`, `info`, ...).
pub const ENV_VAR: &str = "ROTALOG_INTERNAL";

static THRESHOLD: OnceLock<Option<Level>> = OnceLock::new();

fn threshold() -> Option<Level> {
    *THRESHOLD.get_or_init(|| {
        std::env::var(ENV_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
    })
}

/// Sets the threshold before the environment is consulted. Later calls are no-ops.
pub fn init(level: Option<Level>) {
    let _ = THRESHOLD.set(level);
}

/// Whether a message at `level` would be printed.
#[must_use]
pub fn enabled(level: Level) -> bool {
    threshold().is_some_and(|min| level >= min)
}

fn log(level: Level, scope: &str, msg: &str) {
    if !enabled(level) {
        return;
    }
    // Diagnostics must never take down the host; a closed stderr is ignored.
    let _ = writeln!(
        std::io::stderr().lock(),
        "[rotalog] {:<8} {scope:<8} {msg}",
        level.as_str()
    );
}

pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}

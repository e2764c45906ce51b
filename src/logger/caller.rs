//! Who issued a log call.
//!
//! The level methods are `#[track_caller]`, so the location handed to [`CallerInfo`] is the
//! host's call site rather than a line inside this crate.

use std::panic::Location;

/// Renders the caller label placed between the level tag and the message.
pub trait CallerInfo: Send + Sync {
    fn caller_info(&self, location: &Location<'_>) -> String;
}

/// `src/main.rs:42`
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceLocation;

impl CallerInfo for SourceLocation {
    fn caller_info(&self, location: &Location<'_>) -> String {
        format!("{}:{}", location.file(), location.line())
    }
}

/// The same label for every line. Mostly useful in tests.
#[derive(Debug, Clone)]
pub struct FixedCaller(pub String);

impl FixedCaller {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }
}

impl CallerInfo for FixedCaller {
    fn caller_info(&self, _location: &Location<'_>) -> String {
        self.0.clone()
    }
}

impl<F> CallerInfo for F
where
    F: Fn(&Location<'_>) -> String + Send + Sync,
{
    fn caller_info(&self, location: &Location<'_>) -> String {
        self(location)
    }
}

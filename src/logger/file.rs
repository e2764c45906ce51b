//! The one open log file and how its name is chosen.

use crate::internal;
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Characters in an RFC 3339 timestamp that some file systems reject or treat specially.
static UNSAFE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.:]+").expect("Invalid timestamp regex"));

const SUFFIX: &str = ".log";

/// Upper bound on `-N` suffixes tried when several files are opened within one millisecond.
const MAX_COLLISIONS: u32 = 1000;

/// `2024-05-01T12:30:45.123Z` becomes `2024-05-01T12-30-45-123Z`.
#[must_use]
pub fn file_stamp(at: DateTime<Utc>) -> String {
    let iso = at.to_rfc3339_opts(SecondsFormat::Millis, true);
    UNSAFE_RUN.replace_all(&iso, "-").into_owned()
}

/// Picks `<prefix><stamp>.log`, or `<prefix><stamp>-N.log` if that name is already taken.
fn unused_path(dir: &Path, prefix: &str, at: DateTime<Utc>) -> PathBuf {
    let stem = format!("{prefix}{}", file_stamp(at));
    let first = dir.join(format!("{stem}{SUFFIX}"));
    if !first.exists() {
        return first;
    }
    (1..MAX_COLLISIONS)
        .map(|n| dir.join(format!("{stem}-{n}{SUFFIX}")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

/// An open, append-only log file and the facts the rolling check needs about it.
#[derive(Debug)]
pub struct ActiveFile {
    file: File,
    path: PathBuf,
    created_at: DateTime<Utc>,
    /// Tracked instead of re-reading metadata after every line.
    size: u64,
}

impl ActiveFile {
    /// Creates `dir` if needed and opens a fresh file in it for appending.
    ///
    /// On failure the path that was attempted is returned alongside the error.
    pub fn open(dir: &Path, prefix: &str, now: DateTime<Utc>) -> Result<Self, (PathBuf, io::Error)> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| (dir.to_path_buf(), e))?;
            internal::debug("FILE", &format!("Created directory: {}", dir.display()));
        }

        let path = unused_path(dir, prefix, now);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| (path.clone(), e))?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);

        internal::debug("FILE", &format!("Opened {}", path.display()));
        Ok(Self {
            file,
            path,
            created_at: now,
            size,
        })
    }

    /// One `write_all` per line keeps lines whole even if another process appends too.
    pub fn append(&mut self, line: &str) -> io::Result<()> {
        self.file.write_all(line.as_bytes())?;
        self.size += line.len() as u64;
        Ok(())
    }

    /// Flushes to disk and releases the handle.
    pub fn close(mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file.sync_all()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Whole seconds since the file was opened; zero if the clock went backwards.
    #[must_use]
    pub fn age_secs(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from((now - self.created_at).num_seconds()).unwrap_or(0)
    }
}

//! Run log for treegen
//!
//! Every invocation writes a line-oriented log file that is recreated at the
//! start of the run. The handle is handed explicitly to the rule resolver and
//! the tree renderer instead of living in global state, and every entry is
//! mirrored onto the `tracing` stream so `-v` surfaces it on the console.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Severity of a run-log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// File-backed log, truncated for every run
pub struct RunLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl RunLog {
    /// Create the log file, discarding any previous run's contents
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an informational entry
    pub fn info(&self, message: &str) {
        tracing::info!("{message}");
        self.append(LogLevel::Info, message);
    }

    /// Append an error entry
    pub fn error(&self, message: &str) {
        tracing::error!("{message}");
        self.append(LogLevel::Error, message);
    }

    fn append(&self, level: LogLevel, message: &str) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut file = match self.file.lock() {
            Ok(file) => file,
            Err(poisoned) => poisoned.into_inner(),
        };
        // A failing log sink must never abort the run.
        if let Err(e) = writeln!(file, "[{timestamp}] [{level}]: {message}") {
            tracing::warn!("Failed to write log entry: {e}");
        }
    }
}

//! Leveled diagnostic sink.
//!
//! The version result goes to stdout; everything else goes through a
//! [Logger] so callers can separate diagnostics from the result line and
//! tests can capture log traffic without touching the process streams.

use std::str::FromStr;

use crate::error::{GitverError, Result};

/// Diagnostic verbosity level, from quietest to noisiest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for Level {
    type Err = GitverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "e" | "error" => Ok(Level::Error),
            "w" | "warn" => Ok(Level::Warn),
            "i" | "info" => Ok(Level::Info),
            "d" | "debug" => Ok(Level::Debug),
            "t" | "trace" | "diag" | "diagnostic" => Ok(Level::Trace),
            other => Err(GitverError::config(format!(
                "unknown verbosity '{}' - expected error, warn, info, debug or trace",
                other
            ))),
        }
    }
}

/// Diagnostic sink used by the resolver and the search.
///
/// `enabled` is the guard predicate: call it before building an expensive
/// message. The leveled convenience methods guard internally, so plain
/// string messages can be passed directly. No level affects semantics.
pub trait Logger {
    /// Whether messages at `level` will be written.
    fn enabled(&self, level: Level) -> bool;

    /// Write a message at `level`. Called only when `enabled(level)` holds.
    fn log(&self, level: Level, message: &str);

    fn error(&self, message: &str) {
        if self.enabled(Level::Error) {
            self.log(Level::Error, message);
        }
    }

    fn warn(&self, message: &str) {
        if self.enabled(Level::Warn) {
            self.log(Level::Warn, message);
        }
    }

    fn info(&self, message: &str) {
        if self.enabled(Level::Info) {
            self.log(Level::Info, message);
        }
    }

    fn debug(&self, message: &str) {
        if self.enabled(Level::Debug) {
            self.log(Level::Debug, message);
        }
    }

    fn trace(&self, message: &str) {
        if self.enabled(Level::Trace) {
            self.log(Level::Trace, message);
        }
    }
}

/// Logger writing `gitver:`-prefixed lines to standard error.
///
/// The prefix lets callers that capture both streams distinguish
/// diagnostics from the single result line on standard output.
pub struct StderrLogger {
    verbosity: Level,
}

impl StderrLogger {
    pub fn new(verbosity: Level) -> Self {
        StderrLogger { verbosity }
    }
}

impl Logger for StderrLogger {
    fn enabled(&self, level: Level) -> bool {
        level <= self.verbosity
    }

    fn log(&self, level: Level, message: &str) {
        match level {
            Level::Error => eprintln!("gitver: error: {}", message),
            Level::Warn => eprintln!("gitver: warning: {}", message),
            _ => eprintln!("gitver: {}", message),
        }
    }
}

/// Logger that discards everything. Default for library embedding.
pub struct NullLogger;

impl Logger for NullLogger {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn log(&self, _level: Level, _message: &str) {}
}

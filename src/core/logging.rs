//! Diagnostic sink shared by the scanner and the parser.
//!
//! The scanner reports recoverable lexical problems and the parser reports
//! the fatal error that ends a parse. Neither owns the sink: both receive an
//! `Arc<dyn Logger>` so the embedding program decides where messages go.
//!
//! Two implementations ship with the crate:
//! - `TracingLogger` forwards to the `tracing` macros under the
//!   `query_builder` target; install a subscriber with `init_tracing`.
//! - `MemoryLogger` keeps every message in order, for callers that want
//!   diagnostics as data.
//!
//! ## Examples
//! ```
//! # use std::sync::Arc;
//! # use query_builder_rs::core::logging::{Logger, LogLevel, MemoryLogger};
//! let logger = Arc::new(MemoryLogger::new());
//! logger.error("Invalid character # in line: 1 and column: 1");
//! assert_eq!(logger.entries()[0].level, LogLevel::Error);
//! ```

use std::fmt;
use std::sync::{Mutex, PoisonError};

use tracing_subscriber::EnvFilter;

/// Target used for every event emitted through `TracingLogger`.
pub const LOG_TARGET: &str = "query_builder";

/// Two-level logging capability injected into the scanner and parser.
pub trait Logger: Send + Sync + fmt::Debug {
    /// Record an informational message.
    fn info(&self, message: &str);

    /// Record an error message.
    fn error(&self, message: &str);
}

/// Forward messages to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: LOG_TARGET, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: LOG_TARGET, "{message}");
    }
}

/// Severity of a recorded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// One message captured by `MemoryLogger`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Keep messages in memory, in the order they were logged.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    /// Create an empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded entry.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages recorded at `Error` level.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.messages_at(LogLevel::Error)
    }

    /// Messages recorded at `Info` level.
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.messages_at(LogLevel::Info)
    }

    fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message.clone())
            .collect()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                level,
                message: message.to_string(),
            });
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

/// Install a global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` overrides the default filter, which is `info`, or `trace`
/// when `verbose` is set. Calling this more than once is harmless: later
/// calls leave the first subscriber in place.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "trace" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

//! Diagnostics trait definition

use std::fmt;
use std::path::{Path, PathBuf};

/// Severity of a diagnostic
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => f.write_str("debug"),
            Level::Warn => f.write_str("warn"),
            Level::Error => f.write_str("error"),
        }
    }
}

/// A single message emitted by a file operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    /// Name of the operation that emitted it, e.g. `"copy_file"`
    pub operation: &'static str,
    pub path: Option<PathBuf>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(level: Level, operation: &'static str, message: impl Into<String>) -> Self {
        Diagnostic {
            level,
            operation,
            path: None,
            message: message.into(),
        }
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }
}

/// Receiver for diagnostics
///
/// Implementations can use:
/// - `tracing` events (`TracingDiagnostics`)
/// - An in-memory buffer for assertions in tests (`RecordingDiagnostics`)
pub trait Diagnostics: Send + Sync {
    fn record(&self, diagnostic: Diagnostic);

    fn debug(&self, operation: &'static str, path: &Path, message: &str) {
        self.record(Diagnostic::new(Level::Debug, operation, message).with_path(path));
    }

    fn warn(&self, operation: &'static str, path: &Path, message: &str) {
        self.record(Diagnostic::new(Level::Warn, operation, message).with_path(path));
    }

    fn error(&self, operation: &'static str, path: &Path, message: &str) {
        self.record(Diagnostic::new(Level::Error, operation, message).with_path(path));
    }
}

//! In-memory diagnostics for tests

use super::{Diagnostic, Diagnostics, Level};
use parking_lot::Mutex;

/// Collects every diagnostic so callers can assert on them
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// Entries at the given level
    pub fn at_level(&self, level: Level) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .iter()
            .filter(|d| d.level == level)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn record(&self, diagnostic: Diagnostic) {
        self.entries.lock().push(diagnostic);
    }
}

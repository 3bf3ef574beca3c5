//! Outcome of a directory tree copy

use crate::Error;
use std::path::PathBuf;

/// One entry that could not be copied
#[derive(Debug)]
pub struct CopyFailure {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub error: Error,
}

/// Totals and per-entry failures of `FileStore::copy_directory`
///
/// A failed file does not stop the walk; it is recorded here and the
/// remaining entries are still copied.
#[derive(Debug, Default)]
pub struct CopyReport {
    pub files_copied: usize,
    pub bytes_copied: u64,
    pub directories_created: usize,
    pub failures: Vec<CopyFailure>,
}

impl CopyReport {
    /// True when every entry was copied
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record_file(&mut self, bytes: u64) {
        self.files_copied += 1;
        self.bytes_copied += bytes;
    }

    pub(crate) fn record_failure(&mut self, source: PathBuf, destination: PathBuf, error: Error) {
        self.failures.push(CopyFailure {
            source,
            destination,
            error,
        });
    }
}

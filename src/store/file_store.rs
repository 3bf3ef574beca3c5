//! Text files, tree copies and bundled assets
//!
//! Error rule shared by every operation:
//! - reads report a missing file or asset as `Ok(None)` (logged as a warning)
//! - every other failure is returned as an `Err` and reported to diagnostics
//! - `clear_directory` stops at the first failure, `copy_directory` keeps
//!   going and collects failures in its [`CopyReport`]

use crate::assets::AssetSource;
use crate::diagnostics::{Diagnostic, Diagnostics, Level, TracingDiagnostics};
use crate::digest::{self, TreeDigest};
use crate::fs::{Filesystem, OsFilesystem};
use crate::store::report::CopyReport;
use crate::store::stream;
use crate::{Error, Result};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Filesystem helpers with an injected backend and diagnostics sink
///
/// Holds no state between calls: every operation opens and releases its
/// own handles before returning.
#[derive(Clone)]
pub struct FileStore {
    fs: Arc<dyn Filesystem>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore {
    /// Host filesystem, diagnostics sent to `tracing`
    pub fn new() -> Self {
        FileStore {
            fs: Arc::new(OsFilesystem),
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Set the filesystem backend
    pub fn with_filesystem(mut self, fs: impl Filesystem + 'static) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    /// Set the diagnostics sink
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    // === Text ===

    /// Read a whole file as UTF-8 text.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn read_text(&self, path: &Path) -> Result<Option<String>> {
        const OP: &str = "read_text";
        self.require_path(OP, path)?;

        let mut file = match self.fs.open_read(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.diagnostics.warn(OP, path, "Could not load file");
                return Ok(None);
            }
            Err(e) => return self.fail(OP, path, Error::Io(e)),
        };

        let bytes = match stream::read_bytes(&mut file) {
            Ok(bytes) => bytes,
            Err(e) => return self.fail(OP, path, Error::Io(e)),
        };
        match stream::decode(bytes, &path.display().to_string()) {
            Ok(text) => Ok(Some(text)),
            Err(e) => self.fail(OP, path, e),
        }
    }

    /// Read an already-open stream to its end as UTF-8 text.
    ///
    /// The stream is consumed and dropped before returning.
    pub fn read_text_from<R: Read>(&self, mut source: R) -> Result<String> {
        stream::read_to_string(&mut source).map_err(|e| {
            self.diagnostics.record(Diagnostic::new(
                Level::Error,
                "read_text_from",
                e.to_string(),
            ));
            e
        })
    }

    /// Replace the contents of `path` with `content`, creating missing
    /// parent directories first.
    pub fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        const OP: &str = "write_text";
        self.require_path(OP, path)?;
        if let Err(e) = self.ensure_parent(path) {
            return self.fail(OP, path, e);
        }

        self.diagnostics
            .debug(OP, path, &format!("Saving {} bytes", content.len()));

        let result = self.fs.create_write(path).and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.flush()
        });
        match result {
            Ok(()) => Ok(()),
            Err(e) => self.fail(OP, path, Error::Io(e)),
        }
    }

    // === Directories ===

    /// Delete everything below `dir`, leaving `dir` itself in place.
    ///
    /// Children are removed before their parent. The first failure aborts
    /// the walk; entries not reached yet are left untouched.
    pub fn clear_directory(&self, dir: &Path) -> Result<()> {
        const OP: &str = "clear_directory";
        self.require_path(OP, dir)?;

        if !self.fs.exists(dir) {
            return self.fail(OP, dir, Error::NotFound(dir.to_path_buf()));
        }
        if !self.fs.is_dir(dir) {
            return self.fail(
                OP,
                dir,
                Error::InvalidArgument(format!("not a directory: {}", dir.display())),
            );
        }

        match self.clear_entries(dir) {
            Ok(()) => Ok(()),
            Err(e) => self.fail(OP, dir, e),
        }
    }

    fn clear_entries(&self, dir: &Path) -> Result<()> {
        for entry in self.fs.read_dir(dir)? {
            let removed = if self.fs.is_dir(&entry) {
                self.clear_entries(&entry)?;
                self.fs.remove_dir(&entry)
            } else {
                self.fs.remove_file(&entry)
            };
            removed.map_err(|source| Error::Remove {
                path: entry.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Copy the tree under `source` into `destination`.
    ///
    /// A missing `destination` is created one level deep (ancestors are not
    /// created). An unreadable `source` counts as empty. Symlinked
    /// directories are followed. Individual failures are logged and
    /// collected in the report; the rest of the tree is still copied.
    pub fn copy_directory(&self, source: &Path, destination: &Path) -> Result<CopyReport> {
        const OP: &str = "copy_directory";
        self.require_path(OP, source)?;
        self.require_path(OP, destination)?;

        let mut report = CopyReport::default();
        let mut ancestors = Vec::new();
        self.copy_tree(source, destination, &mut ancestors, &mut report);
        Ok(report)
    }

    /// `ancestors` holds the resolved paths of the source directories being
    /// walked, so a symlink back into one of them is not followed forever.
    fn copy_tree(
        &self,
        source: &Path,
        destination: &Path,
        ancestors: &mut Vec<PathBuf>,
        report: &mut CopyReport,
    ) {
        let resolved = self.fs.canonicalize(source).ok();
        if let Some(resolved) = &resolved {
            if ancestors.contains(resolved) {
                let error = Error::InvalidArgument(format!(
                    "symlink cycle at {}",
                    source.display()
                ));
                self.record_copy_failure(report, source, destination, error);
                return;
            }
        }

        if self.same_file(source, destination) {
            let error = Error::InvalidArgument(format!(
                "source and destination are the same directory: {}",
                source.display()
            ));
            self.record_copy_failure(report, source, destination, error);
            return;
        }

        let children = self.fs.read_dir(source);

        if !self.fs.exists(destination) {
            match self.fs.create_dir(destination) {
                Ok(()) => report.directories_created += 1,
                Err(e) => {
                    let error = Error::DirectoryCreate {
                        path: destination.to_path_buf(),
                        source: e,
                    };
                    self.record_copy_failure(report, source, destination, error);
                    return;
                }
            }
        }

        let children = match children {
            Ok(children) => children,
            Err(_) => return,
        };

        if let Some(resolved) = &resolved {
            ancestors.push(resolved.clone());
        }

        for child in children {
            let Some(name) = child.file_name() else {
                continue;
            };
            let target = destination.join(name);

            if self.fs.is_dir_following(&child) {
                self.copy_tree(&child, &target, ancestors, report);
                continue;
            }

            match self.copy_file(&child, &target) {
                Ok(bytes) => report.record_file(bytes),
                // copy_file does not log a missing source
                Err(e) if e.is_not_found() => {
                    self.record_copy_failure(report, &child, &target, e)
                }
                Err(e) => report.record_failure(child, target, e),
            }
        }

        if resolved.is_some() {
            ancestors.pop();
        }
    }

    fn record_copy_failure(
        &self,
        report: &mut CopyReport,
        source: &Path,
        destination: &Path,
        error: Error,
    ) {
        self.diagnostics
            .error("copy_directory", source, &error.to_string());
        report.record_failure(source.to_path_buf(), destination.to_path_buf(), error);
    }

    // === Files and streams ===

    /// Copy a single file, creating the destination's parent directories.
    /// Returns the number of bytes copied.
    ///
    /// A missing source is reported as `Error::NotFound` without logging.
    pub fn copy_file(&self, source: &Path, destination: &Path) -> Result<u64> {
        const OP: &str = "copy_file";
        self.require_path(OP, source)?;
        self.require_path(OP, destination)?;

        if !self.fs.exists(source) {
            return Err(Error::NotFound(source.to_path_buf()));
        }
        if self.fs.is_dir_following(source) {
            return self.fail(
                OP,
                source,
                Error::InvalidArgument(format!("not a file: {}", source.display())),
            );
        }

        if let Err(e) = self.ensure_parent(destination) {
            self.diagnostics.warn(
                OP,
                destination,
                &format!("Couldn't create dir to copy file: {}", e),
            );
            return Err(e);
        }

        // Opening the destination truncates it before the source is read
        if self.same_file(source, destination) {
            return self.fail(
                OP,
                source,
                Error::InvalidArgument(format!(
                    "source and destination are the same file: {}",
                    source.display()
                )),
            );
        }

        let result = self.fs.open_read(source).and_then(|mut input| {
            let mut output = self.fs.create_write(destination)?;
            stream::pump(&mut input, &mut output)
        });

        result.or_else(|e| {
            self.fail(
                OP,
                source,
                Error::Copy {
                    from: source.to_path_buf(),
                    to: destination.to_path_buf(),
                    source: e,
                },
            )
        })
    }

    // === Assets ===

    /// Read a bundled asset as UTF-8 text.
    ///
    /// Returns `Ok(None)` without logging when no asset source is given or
    /// the key is empty, and `Ok(None)` with a warning when the asset does
    /// not exist. An empty asset is also `Ok(None)`.
    pub fn read_bundled_asset(
        &self,
        assets: Option<&dyn AssetSource>,
        key: &str,
    ) -> Result<Option<String>> {
        const OP: &str = "read_bundled_asset";
        let Some(assets) = assets else {
            return Ok(None);
        };
        if key.is_empty() {
            return Ok(None);
        }

        let bytes = assets
            .open(key)
            .and_then(|mut reader| stream::read_bytes(&mut reader));
        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.diagnostics
                    .warn(OP, Path::new(key), &format!("Couldn't read asset: {}", e));
                return Ok(None);
            }
            Err(e) => {
                return self.fail(
                    OP,
                    Path::new(key),
                    Error::Asset {
                        key: key.to_string(),
                        source: e,
                    },
                )
            }
        };

        if bytes.is_empty() {
            return Ok(None);
        }
        match stream::decode(bytes, key) {
            Ok(text) => Ok(Some(text)),
            Err(e) => self.fail(OP, Path::new(key), e),
        }
    }

    /// Content digest of the tree at `root`, read through this store's
    /// filesystem.
    pub fn tree_digest(&self, root: &Path) -> Result<TreeDigest> {
        digest::tree_digest(self.fs.as_ref(), root)
            .or_else(|e| self.fail("tree_digest", root, e))
    }

    // === Helpers ===

    fn require_path(&self, operation: &'static str, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            let error = Error::InvalidArgument(format!("empty path given to {}", operation));
            self.diagnostics.record(Diagnostic::new(
                Level::Error,
                operation,
                error.to_string(),
            ));
            return Err(error);
        }
        Ok(())
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() || self.fs.exists(parent) {
            return Ok(());
        }
        self.fs
            .create_dir_all(parent)
            .map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })
    }

    /// Both paths exist and resolve to the same location
    fn same_file(&self, a: &Path, b: &Path) -> bool {
        match (self.fs.canonicalize(a), self.fs.canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    fn fail<T>(&self, operation: &'static str, path: &Path, error: Error) -> Result<T> {
        self.diagnostics.error(operation, path, &error.to_string());
        Err(error)
    }
}

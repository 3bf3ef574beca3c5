//! Filesystem trait definition

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// The primitive operations `FileStore` is built from
///
/// Implementations can use:
/// - The host filesystem (`OsFilesystem`)
/// - Wrappers that inject faults for testing
pub trait Filesystem: Send + Sync {
    /// Returns `true` if anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory. Symlinks are not followed.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory or a symlink to one
    fn is_dir_following(&self, path: &Path) -> bool;

    /// Absolute path with every symlink resolved; `path` must exist
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// List the direct children of a directory, sorted by file name
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Create a single directory level
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Create a directory and all missing ancestors
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Delete a file (or a symlink)
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Delete an empty directory
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// Open a file for reading
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Create or truncate a file for writing
    fn create_write(&self, path: &Path) -> io::Result<Box<dyn Write + Send>>;
}

//! # appfiles
//!
//! Filesystem and stream helpers for an application shell.
//!
//! ## Operations
//!
//! - **Text**: read whole files or streams as UTF-8, write text with parent
//!   directories created on demand
//! - **Trees**: copy a directory tree, clear a directory's contents
//! - **Copies**: single files and raw streams through a fixed 4 KiB buffer
//! - **Assets**: read-only resources bundled with the application
//! - **Settings**: the `<files root>/config/settings.json` document
//!
//! Reads report a missing file as `Ok(None)`. Every other failure is an
//! `Err`, and each one is also sent to the store's [`Diagnostics`] sink.
//!
//! ## Example
//!
//! ```no_run
//! use appfiles::{config_file_location, FileStore};
//!
//! let store = FileStore::new();
//! let path = config_file_location("/data/app");
//! store.write_text(&path, "{}")?;
//! assert_eq!(store.read_text(&path)?.as_deref(), Some("{}"));
//! # Ok::<(), appfiles::Error>(())
//! ```

pub mod assets;
pub mod config;
pub mod diagnostics;
pub mod digest;
pub mod fs;
pub mod logging;
pub mod store;

mod error;

pub use assets::{AssetSource, DirAssets, MemoryAssets};
pub use config::{config_file_location, default_files_root, Settings};
pub use diagnostics::{Diagnostic, Diagnostics, Level, RecordingDiagnostics, TracingDiagnostics};
pub use digest::{tree_digest, TreeDigest};
pub use error::{Error, Result};
pub use fs::{Filesystem, OsFilesystem};
pub use store::{copy_stream, read_to_string, CopyFailure, CopyReport, FileStore};

/// Size of the intermediate buffer used by every read and copy loop
pub const BUFFER_SIZE: usize = 4096;

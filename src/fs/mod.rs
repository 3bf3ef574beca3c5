//! Pluggable filesystem backend
//!
//! `FileStore` talks to the disk only through the [`Filesystem`] trait, so
//! tests can wrap the real backend and inject failures.

mod os;
mod traits;

pub use os::OsFilesystem;
pub use traits::Filesystem;

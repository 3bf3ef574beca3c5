//! Asset source trait definition

use std::io::{self, Read};

/// Key-addressed provider of bundled, read-only resources
///
/// Implementations can use:
/// - A directory shipped next to the binary (`DirAssets`)
/// - Bytes compiled in or built up in tests (`MemoryAssets`)
pub trait AssetSource: Send + Sync {
    /// Open the asset stored under `key`.
    ///
    /// A missing asset must be reported as `io::ErrorKind::NotFound`.
    fn open(&self, key: &str) -> io::Result<Box<dyn Read + Send + '_>>;
}

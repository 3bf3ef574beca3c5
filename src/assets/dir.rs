//! Directory-backed assets

use super::AssetSource;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

/// Serves assets from files under a root directory
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirAssets { root: root.into() }
    }

    /// Map a key to a path under the root; keys may not escape it
    fn resolve(&self, key: &str) -> io::Result<PathBuf> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("asset key must be a relative path: {}", key),
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl AssetSource for DirAssets {
    fn open(&self, key: &str) -> io::Result<Box<dyn Read + Send + '_>> {
        let path = self.resolve(key)?;
        if path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("asset is a directory: {}", key),
            ));
        }
        Ok(Box::new(File::open(path)?))
    }
}

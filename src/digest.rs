//! Content digest of a directory tree using BLAKE3
//!
//! Two trees with the same relative paths and the same file bytes produce
//! the same digest, regardless of where they live or in which order the
//! OS lists them.

use crate::fs::Filesystem;
use crate::store::stream;
use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

const FILE_TAG: u8 = b'f';
const DIR_TAG: u8 = b'd';

/// A 32-byte BLAKE3 digest of a directory tree
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeDigest([u8; 32]);

impl TreeDigest {
    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get a short prefix for display (first 7 chars, like git)
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }
}

impl fmt::Display for TreeDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for TreeDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TreeDigest({})", self.short())
    }
}

/// Digest every directory and file below `root`, read through `fs`.
///
/// Symlinked directories are followed, matching what a tree copy produces.
/// Names are hashed as their raw OS bytes.
pub fn tree_digest(fs: &dyn Filesystem, root: &Path) -> Result<TreeDigest> {
    if !fs.is_dir_following(root) {
        return Err(Error::InvalidArgument(format!(
            "not a directory: {}",
            root.display()
        )));
    }

    let mut hasher = blake3::Hasher::new();
    let mut ancestors = Vec::new();
    hash_dir(fs, root, &[], &mut ancestors, &mut hasher)?;
    Ok(TreeDigest(*hasher.finalize().as_bytes()))
}

fn hash_dir(
    fs: &dyn Filesystem,
    dir: &Path,
    prefix: &[u8],
    ancestors: &mut Vec<PathBuf>,
    hasher: &mut blake3::Hasher,
) -> Result<()> {
    let resolved = fs.canonicalize(dir)?;
    if ancestors.contains(&resolved) {
        return Err(Error::InvalidArgument(format!(
            "symlink cycle at {}",
            dir.display()
        )));
    }
    ancestors.push(resolved);

    for entry in fs.read_dir(dir)? {
        let Some(name) = entry.file_name() else {
            continue;
        };
        let mut relative = prefix.to_vec();
        relative.extend_from_slice(name.as_encoded_bytes());

        if fs.is_dir_following(&entry) {
            hasher.update(&[DIR_TAG]);
            update_bytes(hasher, &relative);
            relative.push(b'/');
            hash_dir(fs, &entry, &relative, ancestors, hasher)?;
        } else {
            let mut file = fs.open_read(&entry)?;
            let content = stream::read_bytes(&mut file)?;
            hasher.update(&[FILE_TAG]);
            update_bytes(hasher, &relative);
            hasher.update(&(content.len() as u64).to_le_bytes());
            hasher.update(&content);
        }
    }

    ancestors.pop();
    Ok(())
}

// Length prefix keeps "ab" + "c" distinct from "a" + "bc"
fn update_bytes(hasher: &mut blake3::Hasher, value: &[u8]) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value);
}

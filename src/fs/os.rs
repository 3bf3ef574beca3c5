//! Host filesystem backend

use super::Filesystem;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// `std::fs`-backed filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFilesystem;

impl OsFilesystem {
    pub fn new() -> Self {
        OsFilesystem
    }
}

impl Filesystem for OsFilesystem {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    fn is_dir_following(&self, path: &Path) -> bool {
        fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(entries)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(path)?))
    }

    fn create_write(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(File::create(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_dir_is_sorted() {
        let dir = tempdir().unwrap();
        for name in ["c.txt", "a.txt", "b"] {
            fs::write(dir.path().join(name), name).unwrap();
        }

        let entries = OsFilesystem.read_dir(dir.path()).unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.txt", "b", "c.txt"]);
    }

    #[test]
    fn test_is_dir_and_exists() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let fs_backend = OsFilesystem::new();
        assert!(fs_backend.is_dir(dir.path()));
        assert!(!fs_backend.is_dir(&file));
        assert!(fs_backend.exists(&file));
        assert!(!fs_backend.exists(&dir.path().join("missing")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_dir_followed_only_on_request() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        fs::create_dir(&target).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(!OsFilesystem.is_dir(&link));
        assert!(OsFilesystem.is_dir_following(&link));
        assert!(OsFilesystem.exists(&link));
        assert_eq!(
            OsFilesystem.canonicalize(&link).unwrap(),
            OsFilesystem.canonicalize(&target).unwrap()
        );
    }

    #[test]
    fn test_create_write_truncates() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.txt");
        fs::write(&file, "a much longer original").unwrap();

        let mut out = OsFilesystem.create_write(&file).unwrap();
        out.write_all(b"short").unwrap();
        drop(out);

        let mut content = String::new();
        OsFilesystem
            .open_read(&file)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "short");
    }
}

//! Upload file handles
//!
//! A [`FileHandle`] only remembers where a file lives. Its bytes are read
//! on demand, every time, so nothing large is held between stages.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

/// Content type used when the extension is not recognised
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file to upload, identified by its path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    path: PathBuf,
    name: String,
}

impl FileHandle {
    /// Create a handle; the name is the final path segment
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path segment, used as the multipart file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the full content of the file
    pub fn read(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path)
            .with_context(|| format!("Failed to read file: {}", self.path.display()))
    }

    /// Content type hint derived from the file extension
    pub fn content_type(&self) -> &'static str {
        let extension = self
            .path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match extension.as_deref() {
            Some("mrpack") => "application/x-modrinth-modpack+zip",
            Some("jar") => "application/java-archive",
            Some("zip") => "application/zip",
            _ => DEFAULT_CONTENT_TYPE,
        }
    }
}

/// Read every file, in parallel, returning contents in input order
///
/// Fails on the first unreadable file; no partial result is returned.
pub fn read_all(files: &[FileHandle]) -> Result<Vec<Vec<u8>>> {
    files.par_iter().map(FileHandle::read).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_final_segment() {
        let file = FileHandle::new("build/libs/my-mod-1.0.0.jar");
        assert_eq!(file.name(), "my-mod-1.0.0.jar");
        assert_eq!(file.path(), Path::new("build/libs/my-mod-1.0.0.jar"));

        let file = FileHandle::new("plain.txt");
        assert_eq!(file.name(), "plain.txt");
    }

    #[test]
    fn test_content_type() {
        assert_eq!(
            FileHandle::new("pack.mrpack").content_type(),
            "application/x-modrinth-modpack+zip"
        );
        assert_eq!(
            FileHandle::new("mod.JAR").content_type(),
            "application/java-archive"
        );
        assert_eq!(FileHandle::new("src.zip").content_type(), "application/zip");
        assert_eq!(FileHandle::new("README").content_type(), DEFAULT_CONTENT_TYPE);
        assert_eq!(FileHandle::new("notes.md").content_type(), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_read_rereads_each_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jar");
        std::fs::write(&path, b"first").unwrap();

        let file = FileHandle::new(&path);
        assert_eq!(file.read().unwrap(), b"first");

        std::fs::write(&path, b"second").unwrap();
        assert_eq!(file.read().unwrap(), b"second");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = FileHandle::new(dir.path().join("missing.jar"));
        let err = file.read().unwrap_err();
        assert!(err.to_string().contains("missing.jar"));
    }

    #[test]
    fn test_read_all_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let files: Vec<FileHandle> = (0..8)
            .map(|i| {
                let path = dir.path().join(format!("f{}.bin", i));
                std::fs::write(&path, vec![i as u8; 1024 * (8 - i)]).unwrap();
                FileHandle::new(path)
            })
            .collect();

        let contents = read_all(&files).unwrap();
        assert_eq!(contents.len(), 8);
        for (i, bytes) in contents.iter().enumerate() {
            assert_eq!(bytes.len(), 1024 * (8 - i));
            assert!(bytes.iter().all(|b| *b == i as u8));
        }
    }

    #[test]
    fn test_read_all_fails_on_missing() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.jar");
        std::fs::write(&present, b"x").unwrap();
        let files = vec![
            FileHandle::new(present),
            FileHandle::new(dir.path().join("absent.jar")),
        ];
        assert!(read_all(&files).is_err());
    }
}

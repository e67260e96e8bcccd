//! Filesystem abstraction for fixture folders.
//!
//! The harness only ever reads fixture text, writes or deletes per-case
//! artifacts, and lists the files of a single folder. Everything goes through
//! the [`Filesystem`] trait so runs can be exercised against an in-memory
//! mock.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Errors from filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("path error: {0}")]
    Path(String),
}

impl FsError {
    /// True when the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

/// Trait for filesystem operations.
/// Abstracted for testing with mock implementations.
pub trait Filesystem: Send + Sync {
    /// Read file contents as a string, verbatim.
    fn read_file(&self, path: &Path) -> Result<String, FsError>;

    /// Write data atomically to a path (write to temp, then rename).
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError>;

    /// Remove a file if present. Returns whether a file was removed.
    fn remove_if_exists(&self, path: &Path) -> Result<bool, FsError>;

    /// List the regular files directly inside `dir` (symlinks resolved), in
    /// enumeration order.
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, FsError>;

    /// Check if a path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFilesystem;

impl Filesystem for RealFilesystem {
    fn read_file(&self, path: &Path) -> Result<String, FsError> {
        Ok(fs::read_to_string(path)?)
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let temp_path = temp_path_for(path)?;

        fs::write(&temp_path, data)?;

        // Rename to final path (atomic on most filesystems)
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    fn remove_if_exists(&self, path: &Path) -> Result<bool, FsError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, FsError> {
        let mut files = Vec::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            // follows symlinks
            if path.is_file() {
                files.push(path);
            }
        }

        Ok(files)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Sibling temp file used for atomic writes: `.<file_name>.tmp`.
fn temp_path_for(path: &Path) -> Result<PathBuf, FsError> {
    let name = path
        .file_name()
        .ok_or_else(|| FsError::Path(format!("no file name in {}", path.display())))?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

/// Mock filesystem for testing.
/// Cloning creates a new handle to the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MockFilesystem {
    files: Arc<RwLock<BTreeMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<RwLock<BTreeSet<PathBuf>>>,
    unreadable: Arc<RwLock<BTreeSet<PathBuf>>>,
}

impl MockFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all files in the mock filesystem.
    pub fn files(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        self.files.read().unwrap().clone()
    }

    /// Get content of a specific file.
    pub fn get_file(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().unwrap().get(path).cloned()
    }

    /// Get content of a specific file as text.
    pub fn get_text(&self, path: &Path) -> Option<String> {
        self.get_file(path)
            .map(|data| String::from_utf8_lossy(&data).into_owned())
    }

    /// Add a file directly (for test setup). Parent directories are created.
    pub fn add_file(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.write().unwrap().insert(path, data.into());
    }

    /// Add an (empty) directory and its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut dirs = self.dirs.write().unwrap();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Make reads of `path` fail with a permission error.
    pub fn deny_read(&self, path: impl Into<PathBuf>) {
        self.unreadable.write().unwrap().insert(path.into());
    }
}

impl Filesystem for MockFilesystem {
    fn read_file(&self, path: &Path) -> Result<String, FsError> {
        if self.unreadable.read().unwrap().contains(path) {
            return Err(FsError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            )));
        }

        let files = self.files.read().unwrap();
        match files.get(path) {
            Some(data) => String::from_utf8(data.clone())
                .map_err(|e| FsError::Path(format!("invalid utf8: {}", e))),
            None => Err(FsError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            ))),
        }
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn remove_if_exists(&self, path: &Path) -> Result<bool, FsError> {
        Ok(self.files.write().unwrap().remove(path).is_some())
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>, FsError> {
        if !self.is_dir(dir) {
            return Err(FsError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {}", dir.display()),
            )));
        }

        Ok(self
            .files
            .read()
            .unwrap()
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.read().unwrap().contains(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path) || self.is_dir(path)
    }
}

//! Fixture loading utilities.

use std::path::{Path, PathBuf};

use mdtest_fs::{Filesystem, FsError};
use serde::{Deserialize, Serialize};

use crate::types::{FixtureCase, FixtureNaming};

/// Errors that can occur when loading fixtures.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("fixture folder not found: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("failed to list {}: {source}", .path.display())]
    List {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: FsError,
    },
}

/// Order in which discovered cases are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseOrder {
    /// Sorted by file name, for reproducible logs.
    #[default]
    ByName,
    /// Whatever order the filesystem enumerates.
    Enumeration,
}

/// Reads fixture files as text through a [`Filesystem`].
#[derive(Debug, Clone, Copy)]
pub struct FixtureLoader<'a, F: Filesystem> {
    fs: &'a F,
}

impl<'a, F: Filesystem> FixtureLoader<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self { fs }
    }

    /// Read the entire file verbatim. No BOM stripping, no line-ending changes.
    pub fn load(&self, path: &Path) -> Result<String, LoadError> {
        self.fs.read_file(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Enumerate the cases of a fixture folder.
    ///
    /// A missing folder is an error; a folder without input files is not.
    pub fn discover_cases(
        &self,
        dir: &Path,
        naming: &FixtureNaming,
        order: CaseOrder,
    ) -> Result<Vec<FixtureCase>, LoadError> {
        if !self.fs.is_dir(dir) {
            return Err(LoadError::FolderNotFound(dir.to_path_buf()));
        }

        let files = self.fs.list_files(dir).map_err(|source| LoadError::List {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut cases: Vec<FixtureCase> = files
            .iter()
            .filter_map(|path| naming.case_for(path))
            .collect();

        if order == CaseOrder::ByName {
            cases.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(cases)
    }
}

//! Resolution of fixture folders against the harness base directory.
//!
//! The base directory defaults to wherever the `mdtest` executable lives.
//! When that is cargo's build output (`target/<profile>` or
//! `target/<profile>/deps`) the checkout containing `target` is used instead,
//! so fixture folders are found from both `cargo run` and `cargo test`
//! binaries. Any other location is taken as is.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Cargo profile directories recognised under `target`.
const PROFILES: &[&str] = &["debug", "release"];

/// The base location could not be determined. Fatal for the whole run.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("cannot determine executable location: {0}")]
    ExecutableUnavailable(#[source] std::io::Error),

    #[error("executable path has no parent directory: {0}")]
    NoParent(PathBuf),
}

/// Maps logical folder and file names to concrete paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base: PathBuf,
}

impl PathResolver {
    /// Use an explicit base directory.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Derive the base directory from the running executable.
    pub fn from_current_exe() -> Result<Self, PathError> {
        let exe = std::env::current_exe().map_err(PathError::ExecutableUnavailable)?;
        Self::from_exe_path(&exe)
    }

    /// Derive the base directory from an executable path.
    pub fn from_exe_path(exe: &Path) -> Result<Self, PathError> {
        let dir = exe
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| PathError::NoParent(exe.to_path_buf()))?;

        Ok(Self::with_base(cargo_checkout(dir).unwrap_or(dir)))
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve `relative` against an optional base hint.
    ///
    /// - absolute hint: `hint/relative`
    /// - relative hint: `base/hint/relative`
    /// - no hint: `base/relative`
    ///
    /// An absolute `relative` wins over everything, as with [`Path::join`].
    pub fn resolve(&self, base_hint: Option<&Path>, relative: impl AsRef<Path>) -> PathBuf {
        match base_hint {
            Some(hint) => self.base.join(hint).join(relative),
            None => self.base.join(relative),
        }
    }
}

/// The directory holding `target` when `dir` is `target/<profile>` or
/// `target/<profile>/deps`.
fn cargo_checkout(dir: &Path) -> Option<&Path> {
    let profile = if dir.file_name()? == "deps" {
        dir.parent()?
    } else {
        dir
    };
    let profile_name = profile.file_name()?.to_str()?;
    if !PROFILES.contains(&profile_name) {
        return None;
    }

    let target = profile.parent()?;
    if target.file_name()? != "target" {
        return None;
    }
    target.parent().filter(|p| !p.as_os_str().is_empty())
}

//! Harness configuration.
//!
//! Loaded from an optional `mdtest.json`. Every field has a default, so an
//! empty object (or no file at all) gives the stock setup.

use std::path::{Path, PathBuf};

use mdtest_fs::{Filesystem, FsError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::CaseOrder;
use crate::runner::RunnerOptions;
use crate::types::{FixtureNaming, NamingError};

/// File looked up under the harness base directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "mdtest.json";

/// Fixture folders compared by default, in order.
pub const DEFAULT_FOLDERS: &[&str] = &["mdtest-1.1", "test-input"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Naming {
        path: PathBuf,
        #[source]
        source: NamingError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Fixture folders, relative to the base directory unless absolute.
    pub folders: Vec<String>,
    pub order: CaseOrder,
    pub naming: FixtureNaming,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            folders: DEFAULT_FOLDERS.iter().map(|f| f.to_string()).collect(),
            order: CaseOrder::default(),
            naming: FixtureNaming::default(),
        }
    }
}

impl HarnessConfig {
    /// Builder: replace the folder list.
    pub fn with_folders<I, S>(mut self, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.folders = folders.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set case order.
    pub fn with_order(mut self, order: CaseOrder) -> Self {
        self.order = order;
        self
    }

    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            naming: self.naming.clone(),
            order: self.order,
        }
    }
}

/// Parse and validate a config file. The file must exist.
pub fn load_config<F: Filesystem>(fs: &F, path: &Path) -> Result<HarnessConfig, ConfigError> {
    let text = fs.read_file(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: HarnessConfig =
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    config.naming.validate().map_err(|source| ConfigError::Naming {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config)
}

/// Parse `path` if it exists, otherwise return the defaults.
pub fn load_config_or_default<F: Filesystem>(
    fs: &F,
    path: &Path,
) -> Result<HarnessConfig, ConfigError> {
    if fs.exists(path) {
        load_config(fs, path)
    } else {
        Ok(HarnessConfig::default())
    }
}

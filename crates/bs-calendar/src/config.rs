//! Store configuration.

use std::env;
use std::path::PathBuf;

use crate::source::DirectorySource;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "BS_CALENDAR_DATA_DIR";

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Where the directory-backed calendar source lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Use `BS_CALENDAR_DATA_DIR` if set and non-empty, else the default.
    pub fn from_env() -> Self {
        match env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    pub fn source(&self) -> DirectorySource {
        DirectorySource::new(&self.data_dir)
    }
}

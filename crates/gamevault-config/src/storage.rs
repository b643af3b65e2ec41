//! Storage backend configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the catalog keeps its records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Transient map, lost on exit
    Memory,
    /// Embedded SQLite database file
    #[default]
    Sqlite,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: Backend,

    /// Database file, only used by the sqlite backend
    #[serde(default = "default_database")]
    pub database: PathBuf,
}

fn default_database() -> PathBuf {
    PathBuf::from("games.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            database: default_database(),
        }
    }
}

impl StorageConfig {
    /// Transient in-memory storage
    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory,
            ..Self::default()
        }
    }

    /// SQLite storage at the given path
    pub fn sqlite(database: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::Sqlite,
            database: database.into(),
        }
    }
}

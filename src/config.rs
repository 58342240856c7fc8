//! Configuration types for batch-status

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Database location and pool sizing
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

/// Persistence configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Database path (default: "batch-status.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Maximum pooled connections (default: 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("batch-status.db")
}

fn default_max_connections() -> u32 {
    5
}

//! On-disk content store configuration.

use serde::{Deserialize, Serialize};

/// Content store configuration.
///
/// The layout is directory-addressed: one top-level folder per directory
/// id under `data_root`, containing that directory's files by file id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all stored content.
    #[serde(default = "default_data_root")]
    pub data_root: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
        }
    }
}

fn default_data_root() -> String {
    "./data/storage".to_string()
}

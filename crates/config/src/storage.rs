use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which backend documents are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Local directory documents are read from. Relative paths are resolved
    /// against the working directory.
    pub root: PathBuf,
    /// Read documents from a web server instead of `root`.
    pub base_url: Option<String>,
}
impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            base_url: None,
        }
    }
}

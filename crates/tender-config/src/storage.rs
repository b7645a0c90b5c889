//! Record store configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_data_dir() -> String {
    ".tender/data".to_string()
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory of the JSON record store. Relative paths resolve
    /// against the project root.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Append every mutation to the JSONL trail.
    #[serde(default = "default_true")]
    pub trail: bool,

    /// Validate created records against their JSON Schema (warn-only).
    #[serde(default = "default_true")]
    pub validate_schema: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            trail: default_true(),
            validate_schema: default_true(),
        }
    }
}

impl StorageConfig {
    /// Absolute data directory for a project rooted at `project_root`.
    pub fn data_path(&self, project_root: &Path) -> PathBuf {
        let dir = Path::new(&self.data_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            project_root.join(dir)
        }
    }

    /// Directory holding the JSONL trail files.
    pub fn trail_path(&self, project_root: &Path) -> PathBuf {
        self.data_path(project_root).join("trail")
    }
}

//! Filesystem-backed record store.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::RecordStore;
use crate::error::StoreError;
use crate::layout::INDEX_FILE;

/// Stores each record as a pretty-printed JSON file under `root`.
///
/// Writes go to a temporary file in the target directory which is then
/// renamed over the destination.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        if path.is_empty() || path.starts_with('/') || path.contains('\\') {
            return Err(StoreError::invalid("path", format!("invalid record path '{path}'")));
        }
        let mut resolved = self.root.clone();
        for segment in path.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(StoreError::invalid("path", format!("invalid record path '{path}'")));
            }
            resolved.push(segment);
        }
        Ok(resolved)
    }
}

impl RecordStore for FsStore {
    fn read_record(&self, path: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let file = self.resolve(path)?;
        let content = match std::fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(path, e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    fn write_record_atomic(&self, path: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        let file = self.resolve(path)?;
        let parent = file.parent().unwrap_or(&self.root);
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(path, e))?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| StoreError::io(path, e))?;
        serde_json::to_writer_pretty(&mut tmp, value)?;
        tmp.write_all(b"\n").map_err(|e| StoreError::io(path, e))?;
        tmp.as_file().sync_all().map_err(|e| StoreError::io(path, e))?;
        tmp.persist(&file).map_err(|e| StoreError::io(path, e.error))?;
        tracing::trace!(path, "record written");
        Ok(())
    }

    fn remove_record(&self, path: &str) -> Result<bool, StoreError> {
        let file = self.resolve(path)?;
        match std::fs::remove_file(&file) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn list_records(&self, dir: &str) -> Result<Vec<String>, StoreError> {
        let resolved = self.resolve(dir)?;
        let entries = match std::fs::read_dir(&resolved) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(dir, e)),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(dir, e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name == INDEX_FILE || !entry.path().is_file() {
                continue;
            }
            if let Some(id) = name.strip_suffix(".json") {
                ids.push(id.to_string());
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}

//! In-memory record store for tests and dry runs.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::RecordStore;
use crate::error::StoreError;
use crate::layout::INDEX_FILE;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<String, serde_json::Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, serde_json::Value>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Other(anyhow::anyhow!("memory store lock poisoned")))
    }
}

impl RecordStore for MemoryStore {
    fn read_record(&self, path: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.lock()?.get(path).cloned())
    }

    fn write_record_atomic(&self, path: &str, value: &serde_json::Value) -> Result<(), StoreError> {
        self.lock()?.insert(path.to_string(), value.clone());
        Ok(())
    }

    fn remove_record(&self, path: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.remove(path).is_some())
    }

    fn list_records(&self, dir: &str) -> Result<Vec<String>, StoreError> {
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        let records = self.lock()?;
        Ok(records
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/') && *rest != INDEX_FILE)
            .filter_map(|rest| rest.strip_suffix(".json"))
            .map(ToString::to_string)
            .collect())
    }
}

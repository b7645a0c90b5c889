use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FieldType, MemorySource};
use crate::time::Timestamp;

/// A remembered placeholder value reusable across documents.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProfileMemoryEntry {
    /// Free-form dotted key, e.g. `tax.gst`.
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub field_type: FieldType,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub source: MemorySource,
}

/// All remembered values of one contractor. Keys are unique by construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProfileMemory {
    pub yoj_id: String,
    #[serde(default)]
    pub entries: BTreeMap<String, ProfileMemoryEntry>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl ProfileMemory {
    #[must_use]
    pub fn new(yoj_id: impl Into<String>) -> Self {
        Self {
            yoj_id: yoj_id.into(),
            ..Self::default()
        }
    }

    /// Saved value for `key`, if any.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|entry| entry.value.as_str())
    }

    /// Insert or replace the entry for `entry.key`. Returns the previous entry.
    pub fn upsert(&mut self, entry: ProfileMemoryEntry) -> Option<ProfileMemoryEntry> {
        self.updated_at = Some(entry.updated_at);
        self.entries.insert(entry.key.clone(), entry)
    }

    /// Remove a remembered value. Returns the removed entry.
    pub fn remove(&mut self, key: &str) -> Option<ProfileMemoryEntry> {
        self.entries.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now_ist;

    fn entry(key: &str, value: &str) -> ProfileMemoryEntry {
        ProfileMemoryEntry {
            key: key.into(),
            value: value.into(),
            label: String::new(),
            field_type: FieldType::Text,
            updated_at: now_ist(),
            source: MemorySource::Document,
        }
    }

    #[test]
    fn upsert_replaces_same_key() {
        let mut memory = ProfileMemory::new("YOJ1");
        assert!(memory.upsert(entry("tax.gst", "old")).is_none());
        let previous = memory.upsert(entry("tax.gst", "new")).unwrap();
        assert_eq!(previous.value, "old");
        assert_eq!(memory.value("tax.gst"), Some("new"));
        assert_eq!(memory.entries.len(), 1);
    }

    #[test]
    fn remove_forgets_value() {
        let mut memory = ProfileMemory::new("YOJ1");
        memory.upsert(entry("bank.branch", "MI Road"));
        assert!(memory.remove("bank.branch").is_some());
        assert_eq!(memory.value("bank.branch"), None);
        assert!(memory.remove("bank.branch").is_none());
    }
}

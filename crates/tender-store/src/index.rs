//! Index rows for collection listings.

use tender_core::entities::{IndexEntry, Pack, Template, TenderRecord, VaultFile};

/// A record that appears in a collection's `index.json`.
pub trait Indexed {
    fn index_entry(&self) -> IndexEntry;
}

impl Indexed for Pack {
    fn index_entry(&self) -> IndexEntry {
        IndexEntry {
            id: self.pack_id.clone(),
            title: self.title.clone(),
            status: Some(self.status.as_str().to_string()),
            updated_at: self.updated_at,
        }
    }
}

impl Indexed for Template {
    fn index_entry(&self) -> IndexEntry {
        IndexEntry {
            id: self.id.clone(),
            title: self.title.clone(),
            status: Some(self.scope.as_str().to_string()),
            updated_at: self.updated_at,
        }
    }
}

impl Indexed for TenderRecord {
    fn index_entry(&self) -> IndexEntry {
        IndexEntry {
            id: self.id.clone(),
            title: self.title.clone(),
            status: Some(self.status.as_str().to_string()),
            updated_at: self.updated_at,
        }
    }
}

impl Indexed for VaultFile {
    /// Vault files change only when soft-deleted.
    fn index_entry(&self) -> IndexEntry {
        IndexEntry {
            id: self.file_id.clone(),
            title: self.title.clone(),
            status: Some(if self.is_live() { "live" } else { "deleted" }.to_string()),
            updated_at: self.deleted_at.unwrap_or(self.uploaded_at),
        }
    }
}

/// Replace or insert `entry`, newest first.
pub fn upsert(entries: &mut Vec<IndexEntry>, entry: IndexEntry) {
    entries.retain(|existing| existing.id != entry.id);
    entries.insert(0, entry);
}

/// Drop the row for `id`. Returns whether a row was removed.
pub fn remove(entries: &mut Vec<IndexEntry>, id: &str) -> bool {
    let before = entries.len();
    entries.retain(|existing| existing.id != id);
    entries.len() != before
}

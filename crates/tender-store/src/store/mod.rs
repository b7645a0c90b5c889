//! The record storage seam.
//!
//! Every persisted record is one JSON document addressed by a `/`-separated
//! path relative to the store root (see [`crate::layout`]). Writes replace a
//! document whole; a reader sees either the old or the new document, never a
//! torn one.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use tender_core::entities::IndexEntry;

use crate::error::StoreError;
use crate::helpers::{decode, encode};

/// Keyed JSON document storage.
pub trait RecordStore: Send + Sync {
    /// Read one document. A missing document is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` on read failure, `StoreError::Corrupt` when
    /// the document is not JSON.
    fn read_record(&self, path: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Replace one document atomically.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the write fails.
    fn write_record_atomic(&self, path: &str, value: &serde_json::Value) -> Result<(), StoreError>;

    /// Remove one document. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the removal fails.
    fn remove_record(&self, path: &str) -> Result<bool, StoreError>;

    /// IDs of the detail records directly under `dir`, sorted. The index
    /// document is not a record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be listed.
    fn list_records(&self, dir: &str) -> Result<Vec<String>, StoreError>;

    /// Read a collection index. A missing index is an empty listing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Corrupt` when the index does not parse.
    fn list_index(&self, path: &str) -> Result<Vec<IndexEntry>, StoreError> {
        match self.read_record(path)? {
            Some(value) => decode(path, value),
            None => Ok(Vec::new()),
        }
    }

    /// Replace a collection index.
    ///
    /// # Errors
    ///
    /// Same as [`Self::write_record_atomic`].
    fn write_index(&self, path: &str, entries: &[IndexEntry]) -> Result<(), StoreError> {
        self.write_record_atomic(path, &encode(&entries)?)
    }
}

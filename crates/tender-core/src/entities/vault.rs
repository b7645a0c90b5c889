use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Metadata of an uploaded document in the contractor's vault.
///
/// Soft-deleted only: `deleted_at` is set, the stored file is left alone.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VaultFile {
    pub file_id: String,
    pub owner_yoj_id: String,
    pub title: String,
    /// Free-form document type (`pan_card`, `gst_certificate`, ...).
    #[serde(default)]
    pub doc_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub stored_path: String,
    pub uploaded_at: Timestamp,
    #[serde(default)]
    pub deleted_at: Option<Timestamp>,
}

impl VaultFile {
    /// Whether the file has not been soft-deleted.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

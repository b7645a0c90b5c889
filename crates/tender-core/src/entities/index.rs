use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// One row of a collection's `index.json` listing.
///
/// Must agree with its detail record on `id` and `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IndexEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    pub updated_at: Timestamp,
}

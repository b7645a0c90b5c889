//! JSONL trail operation envelope.
//!
//! Every mutation is appended as a `TrailOperation` to a per-contractor
//! `trail/{yoj_id}.jsonl` file. The trail is an audit log; record files
//! remain the source of truth.
//!
//! Old trail lines without a `v` field deserialize with `v == 1`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, TrailOp};

const fn default_trail_version() -> u32 {
    1
}

/// A single operation recorded in the JSONL trail.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrailOperation {
    /// Schema version. Defaults to 1 for old trails without this field.
    #[serde(default = "default_trail_version")]
    pub v: u32,

    /// ISO 8601 timestamp (IST) of the operation.
    pub ts: String,

    /// `yoj_id` of the contractor (or admin) who made the change.
    pub actor: String,

    pub op: TrailOp,

    pub entity: EntityType,

    /// ID of the affected record.
    pub id: String,

    /// Full record for `Create`, changed fields for `Update`/`Transition`.
    pub data: serde_json::Value,
}

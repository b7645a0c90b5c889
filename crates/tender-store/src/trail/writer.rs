//! JSONL trail writer.

use std::path::{Path, PathBuf};

use tender_core::enums::TrailOp;
use tender_core::trail::TrailOperation;
use tender_schema::SchemaRegistry;

use crate::error::StoreError;

/// Appends trail operations to per-contractor JSONL files.
pub struct TrailWriter {
    trail_dir: PathBuf,
    enabled: bool,
}

impl TrailWriter {
    /// Create a writer appending under `trail_dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn new(trail_dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&trail_dir)
            .map_err(|e| StoreError::io(trail_dir.display().to_string(), e))?;
        Ok(Self {
            trail_dir,
            enabled: true,
        })
    }

    /// A writer that drops every operation.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            trail_dir: PathBuf::new(),
            enabled: false,
        }
    }

    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append one operation to `{trail_dir}/{op.actor}.jsonl`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the append fails.
    pub fn append(&self, op: &TrailOperation) -> Result<(), StoreError> {
        if !self.enabled {
            return Ok(());
        }

        let path = self.path_for(&op.actor);
        serde_jsonlines::append_json_lines(&path, [op])
            .map_err(|e| StoreError::io(path.display().to_string(), e))?;
        Ok(())
    }

    /// Append after checking `Create` payloads against the entity schema.
    ///
    /// Update payloads carry only the changed fields and are not checked.
    /// A schema mismatch is logged, never fatal.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the append fails.
    pub fn append_validated(
        &self,
        op: &TrailOperation,
        schema: &SchemaRegistry,
    ) -> Result<(), StoreError> {
        if !self.enabled {
            return Ok(());
        }

        if op.op == TrailOp::Create
            && let Err(e) = schema.validate_entity(op.entity, &op.data)
        {
            tracing::warn!(entity = %op.entity, id = %op.id, error = %e, "trail payload failed schema check");
        }

        self.append(op)
    }

    /// Path of the trail file for `actor`.
    #[must_use]
    pub fn path_for(&self, actor: &str) -> PathBuf {
        self.trail_dir.join(format!("{actor}.jsonl"))
    }

    #[must_use]
    pub fn trail_dir(&self) -> &Path {
        &self.trail_dir
    }
}

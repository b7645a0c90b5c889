//! Profile memory repository: remembered placeholder values.

use std::collections::BTreeMap;

use tender_core::entities::{ProfileMemory, ProfileMemoryEntry};
use tender_core::enums::{EntityType, MemorySource, TrailOp};
use tender_core::identity::RequestContext;
use tender_docs::registry::FieldRegistry;

use crate::error::StoreError;
use crate::layout::memory_path;
use crate::service::TenderService;

/// Longest key accepted for a remembered value.
const MAX_KEY_LEN: usize = 80;

fn check_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::invalid("key", "must not be empty"));
    }
    if key.len() > MAX_KEY_LEN
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(StoreError::invalid(
            "key",
            format!("'{key}' is not a valid placeholder key"),
        ));
    }
    Ok(())
}

impl TenderService {
    pub fn get_memory(&self, ctx: &RequestContext) -> Result<ProfileMemory, StoreError> {
        let yoj = self.scope(ctx)?;
        Ok(self
            .load(&memory_path(yoj))?
            .unwrap_or_else(|| ProfileMemory::new(yoj)))
    }

    /// Remembered entries ordered by key.
    pub fn list_memory(&self, ctx: &RequestContext) -> Result<Vec<ProfileMemoryEntry>, StoreError> {
        Ok(self.get_memory(ctx)?.entries.into_values().collect())
    }

    /// Remember one value under `key`, replacing any previous value.
    pub fn remember(
        &self,
        ctx: &RequestContext,
        key: &str,
        value: &str,
        source: MemorySource,
    ) -> Result<ProfileMemoryEntry, StoreError> {
        if value.trim().is_empty() {
            return Err(StoreError::invalid(key.trim(), "must not be blank"));
        }
        let mut values = BTreeMap::new();
        values.insert(key.to_string(), value.to_string());
        self.remember_values(ctx, &values, source)?;
        self.get_memory(ctx)?
            .entries
            .remove(key.trim())
            .ok_or_else(|| StoreError::not_found("memory entry", key.trim()))
    }

    /// Remember every non-blank value in one write.
    ///
    /// All values are validated before anything is stored. Returns how many
    /// entries were written.
    pub fn remember_values(
        &self,
        ctx: &RequestContext,
        values: &BTreeMap<String, String>,
        source: MemorySource,
    ) -> Result<usize, StoreError> {
        let registry = FieldRegistry::standard();
        let mut accepted = Vec::new();
        for (key, value) in values {
            let key = key.trim();
            check_key(key)?;
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            registry.validate_value(key, value)?;
            accepted.push((key, value));
        }
        if accepted.is_empty() {
            return Ok(0);
        }

        let mut memory = self.get_memory(ctx)?;
        for (key, value) in &accepted {
            let spec = registry.spec_for(key);
            memory.upsert(ProfileMemoryEntry {
                key: (*key).to_string(),
                value: (*value).to_string(),
                label: spec.label,
                field_type: spec.field_type,
                updated_at: ctx.now,
                source,
            });
        }
        memory.updated_at = Some(ctx.now);

        let yoj = self.scope(ctx)?;
        self.save_single(
            ctx,
            &memory_path(yoj),
            EntityType::Memory,
            yoj,
            &memory,
            TrailOp::Update,
            None,
        )?;
        tracing::debug!(count = accepted.len(), source = %source, "remembered values");
        Ok(accepted.len())
    }

    /// Forget a remembered value.
    pub fn forget(&self, ctx: &RequestContext, key: &str) -> Result<ProfileMemoryEntry, StoreError> {
        let mut memory = self.get_memory(ctx)?;
        let removed = memory
            .remove(key.trim())
            .ok_or_else(|| StoreError::not_found("memory entry", key.trim()))?;
        memory.updated_at = Some(ctx.now);

        let yoj = self.scope(ctx)?;
        self.save_single(
            ctx,
            &memory_path(yoj),
            EntityType::Memory,
            yoj,
            &memory,
            TrailOp::Update,
            None,
        )?;
        Ok(removed)
    }
}

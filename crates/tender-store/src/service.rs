//! Service layer orchestrating record writes with index upkeep and trail.
//!
//! `TenderService` wraps a [`RecordStore`], a [`TrailWriter`] and the
//! [`SchemaRegistry`]. All repository methods are implemented as
//! `impl TenderService` blocks under [`crate::repos`].

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tender_config::{PrintConfig, TenderConfig};
use tender_core::enums::{EntityType, ResetPolicy, TrailOp};
use tender_core::identity::RequestContext;
use tender_core::ids::validate_record_id;
use tender_core::trail::TrailOperation;
use tender_schema::SchemaRegistry;

use crate::error::StoreError;
use crate::helpers::{decode, encode, new_id};
use crate::index::{self, Indexed};
use crate::layout::CollectionPath;
use crate::store::{FsStore, MemoryStore, RecordStore};
use crate::trail::TrailWriter;

/// Fresh IDs tried before giving up on a crowded collection.
const ID_ATTEMPTS: usize = 8;

/// Orchestrates record mutations with index upkeep and the JSONL trail.
///
/// Every mutation method follows this protocol:
/// 1. Check ownership and validate input
/// 2. Write the detail record (atomic replace)
/// 3. Upsert the collection index row
/// 4. Append the trail operation
pub struct TenderService {
    store: Box<dyn RecordStore>,
    trail: TrailWriter,
    schema: SchemaRegistry,
    validate_schema: bool,
    print: PrintConfig,
    reset_policy: ResetPolicy,
}

impl TenderService {
    /// Create a service over an arbitrary store.
    #[must_use]
    pub fn new(store: Box<dyn RecordStore>, trail: TrailWriter) -> Self {
        Self {
            store,
            trail,
            schema: SchemaRegistry::new(),
            validate_schema: true,
            print: PrintConfig::default(),
            reset_policy: ResetPolicy::default(),
        }
    }

    /// Open the filesystem store described by `config` under `project_root`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the trail directory cannot be created.
    pub fn from_config(config: &TenderConfig, project_root: &Path) -> Result<Self, StoreError> {
        let store = FsStore::new(config.storage.data_path(project_root));
        let trail = if config.storage.trail {
            TrailWriter::new(config.storage.trail_path(project_root))?
        } else {
            TrailWriter::disabled()
        };
        tracing::debug!(root = %store.root().display(), trail = trail.is_enabled(), "opening record store");
        Ok(Self {
            validate_schema: config.storage.validate_schema,
            print: config.print.clone(),
            reset_policy: config.extraction.reset_policy,
            ..Self::new(Box::new(store), trail)
        })
    }

    /// Memory-backed service with the trail disabled.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()), TrailWriter::disabled())
    }

    #[must_use]
    pub fn with_print_config(mut self, print: PrintConfig) -> Self {
        self.print = print;
        self
    }

    #[must_use]
    pub const fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    #[must_use]
    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    #[must_use]
    pub const fn trail(&self) -> &TrailWriter {
        &self.trail
    }

    pub const fn trail_mut(&mut self) -> &mut TrailWriter {
        &mut self.trail
    }

    #[must_use]
    pub const fn schema(&self) -> &SchemaRegistry {
        &self.schema
    }

    #[must_use]
    pub const fn print_config(&self) -> &PrintConfig {
        &self.print
    }

    #[must_use]
    pub const fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }

    /// The acting contractor's ID, checked for use as a path segment.
    pub(crate) fn scope<'a>(&self, ctx: &'a RequestContext) -> Result<&'a str, StoreError> {
        validate_record_id("yoj_id", ctx.yoj_id())?;
        Ok(ctx.yoj_id())
    }

    /// Read and decode one record.
    pub(crate) fn load<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, StoreError> {
        self.store
            .read_record(path)?
            .map(|value| decode(path, value))
            .transpose()
    }

    /// A random ID with `prefix` that no record in `dir` uses yet.
    pub(crate) fn fresh_id(&self, dir: &CollectionPath, prefix: &str) -> Result<String, StoreError> {
        for _ in 0..ID_ATTEMPTS {
            let id = new_id(prefix)?;
            if self.store.read_record(&dir.record(&id))?.is_none() {
                return Ok(id);
            }
            tracing::debug!(dir = dir.as_str(), id = %id, "generated id already taken");
        }
        Err(StoreError::Other(anyhow::anyhow!(
            "no free {prefix} id in {} after {ID_ATTEMPTS} attempts",
            dir.as_str()
        )))
    }

    /// Write a single-document record (profile, memory, print settings).
    ///
    /// `changes` is the trail payload for non-create operations; without it
    /// the full record is logged.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn save_single<T: Serialize>(
        &self,
        ctx: &RequestContext,
        path: &str,
        entity: EntityType,
        id: &str,
        record: &T,
        op: TrailOp,
        changes: Option<serde_json::Value>,
    ) -> Result<(), StoreError> {
        let value = encode(record)?;
        self.check_schema(entity, id, &value);
        self.store.write_record_atomic(path, &value)?;
        self.record_trail(ctx, op, entity, id, trail_payload(op, value, changes))
    }

    /// Write a collection record and upsert its index row.
    ///
    /// `changes` works as in [`Self::save_single`]. A `Create` never
    /// replaces an existing record.
    pub(crate) fn save_indexed<T: Serialize + Indexed>(
        &self,
        ctx: &RequestContext,
        dir: &CollectionPath,
        entity: EntityType,
        record: &T,
        op: TrailOp,
        changes: Option<serde_json::Value>,
    ) -> Result<(), StoreError> {
        let entry = record.index_entry();
        let record_path = dir.record(&entry.id);
        if op == TrailOp::Create && self.store.read_record(&record_path)?.is_some() {
            return Err(StoreError::AlreadyExists {
                entity: entity.to_string(),
                id: entry.id,
            });
        }
        let value = encode(record)?;
        self.check_schema(entity, &entry.id, &value);
        self.store.write_record_atomic(&record_path, &value)?;

        let index_path = dir.index();
        let mut entries = self.store.list_index(&index_path)?;
        let id = entry.id.clone();
        index::upsert(&mut entries, entry);
        self.store.write_index(&index_path, &entries)?;

        self.record_trail(ctx, op, entity, &id, trail_payload(op, value, changes))
    }

    /// Remove a collection record and its index row.
    pub(crate) fn remove_indexed(
        &self,
        ctx: &RequestContext,
        dir: &CollectionPath,
        entity: EntityType,
        id: &str,
    ) -> Result<(), StoreError> {
        self.store.remove_record(&dir.record(id))?;
        let index_path = dir.index();
        let mut entries = self.store.list_index(&index_path)?;
        if index::remove(&mut entries, id) {
            self.store.write_index(&index_path, &entries)?;
        }
        self.record_trail(ctx, TrailOp::Delete, entity, id, serde_json::Value::Null)
    }

    fn record_trail(
        &self,
        ctx: &RequestContext,
        op: TrailOp,
        entity: EntityType,
        id: &str,
        data: serde_json::Value,
    ) -> Result<(), StoreError> {
        let operation = TrailOperation {
            v: 1,
            ts: ctx.now.to_rfc3339(),
            actor: ctx.yoj_id().to_string(),
            op,
            entity,
            id: id.to_string(),
            data,
        };
        if self.validate_schema {
            self.trail.append_validated(&operation, &self.schema)
        } else {
            self.trail.append(&operation)
        }
    }

    /// Warn-only schema check of a record about to be written.
    fn check_schema(&self, entity: EntityType, id: &str, value: &serde_json::Value) {
        if !self.validate_schema {
            return;
        }
        if let Err(e) = self.schema.validate_entity(entity, value) {
            tracing::warn!(entity = %entity, id, error = %e, "record failed schema check");
        }
    }
}

/// `Create` always logs the full record.
fn trail_payload(
    op: TrailOp,
    record: serde_json::Value,
    changes: Option<serde_json::Value>,
) -> serde_json::Value {
    match (op, changes) {
        (TrailOp::Create, _) | (_, None) => record,
        (_, Some(changes)) => changes,
    }
}

//! Offline tender and workorder repository.
//!
//! Both kinds share `TenderRecord`; `kind` picks the collection and the ID
//! prefix.

use serde_json::json;
use tender_core::entities::{ExtractedFields, IndexEntry, TenderKind, TenderRecord};
use tender_core::enums::{TenderStatus, TrailOp};
use tender_core::identity::RequestContext;
use tender_core::ids::validate_record_id;
use tender_extract::{ExtractionError, Extractor};

use crate::error::StoreError;
use crate::helpers::{encode, require_text};
use crate::layout::Collection;
use crate::service::TenderService;
use crate::updates::tender::TenderUpdate;

/// Stored record after an extraction run, plus the failure if there was one.
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub record: TenderRecord,
    pub error: Option<ExtractionError>,
}

fn ensure_editable(record: &TenderRecord) -> Result<(), StoreError> {
    if record.status == TenderStatus::Archived {
        return Err(StoreError::invalid("status", "archived records cannot be changed"));
    }
    Ok(())
}

impl TenderService {
    fn save_tender(
        &self,
        ctx: &RequestContext,
        record: &TenderRecord,
        op: TrailOp,
        changes: Option<serde_json::Value>,
    ) -> Result<(), StoreError> {
        let yoj = self.scope(ctx)?;
        self.save_indexed(
            ctx,
            &Collection::for_tender(record.kind).dir(yoj),
            record.kind.entity_type(),
            record,
            op,
            changes,
        )
    }

    pub fn create_tender(
        &self,
        ctx: &RequestContext,
        kind: TenderKind,
        title: &str,
        source_file: Option<String>,
    ) -> Result<TenderRecord, StoreError> {
        let yoj = self.scope(ctx)?;
        require_text("title", title)?;
        let record = TenderRecord {
            id: self.fresh_id(&Collection::for_tender(kind).dir(yoj), kind.id_prefix())?,
            kind,
            owner_yoj_id: yoj.to_string(),
            title: title.trim().to_string(),
            source_file: source_file.filter(|path| !path.trim().is_empty()),
            extracted: ExtractedFields::default(),
            status: TenderStatus::Draft,
            created_at: ctx.now,
            updated_at: ctx.now,
        };
        self.save_tender(ctx, &record, TrailOp::Create, None)?;
        Ok(record)
    }

    pub fn get_tender(
        &self,
        ctx: &RequestContext,
        kind: TenderKind,
        id: &str,
    ) -> Result<TenderRecord, StoreError> {
        let yoj = self.scope(ctx)?;
        validate_record_id("id", id)?;
        self.load::<TenderRecord>(&Collection::for_tender(kind).dir(yoj).record(id))?
            .filter(|record| record.owner_yoj_id == yoj && record.kind == kind)
            .ok_or_else(|| StoreError::not_found(kind.entity_type().as_str(), id))
    }

    pub fn list_tenders(
        &self,
        ctx: &RequestContext,
        kind: TenderKind,
        include_archived: bool,
    ) -> Result<Vec<IndexEntry>, StoreError> {
        let yoj = self.scope(ctx)?;
        let entries = self
            .store()
            .list_index(&Collection::for_tender(kind).dir(yoj).index())?;
        Ok(entries
            .into_iter()
            .filter(|entry| {
                include_archived || entry.status.as_deref() != Some(TenderStatus::Archived.as_str())
            })
            .collect())
    }

    /// Apply manual edits. The record moves to `editing`.
    pub fn update_tender_fields(
        &self,
        ctx: &RequestContext,
        kind: TenderKind,
        id: &str,
        update: &TenderUpdate,
    ) -> Result<TenderRecord, StoreError> {
        let mut record = self.get_tender(ctx, kind, id)?;
        ensure_editable(&record)?;
        if update.is_empty() {
            return Ok(record);
        }
        update.apply_to(&mut record)?;
        require_text("title", &record.title)?;
        record.status = TenderStatus::Editing;
        record.updated_at = ctx.now;

        let mut changes = encode(update)?;
        if let Some(map) = changes.as_object_mut() {
            map.insert("status".into(), json!(record.status));
        }
        self.save_tender(ctx, &record, TrailOp::Update, Some(changes))?;
        Ok(record)
    }

    /// Store the result of an extraction run under the configured reset
    /// policy.
    pub fn apply_extraction(
        &self,
        ctx: &RequestContext,
        kind: TenderKind,
        id: &str,
        result: Result<ExtractedFields, ExtractionError>,
    ) -> Result<ExtractionOutcome, StoreError> {
        let mut record = self.get_tender(ctx, kind, id)?;
        ensure_editable(&record)?;

        let (fields, status, error) = match result {
            Ok(fields) => {
                let (fields, status) =
                    tender_extract::apply_extraction(&record.extracted, Ok(fields), self.reset_policy());
                (fields, status, None)
            }
            Err(e) => {
                // Keep the error for the caller; the policy only needs to know it failed.
                let reason = ExtractionError::Failed {
                    errors: vec![e.to_string()],
                };
                let (fields, status) =
                    tender_extract::apply_extraction(&record.extracted, Err(reason), self.reset_policy());
                (fields, status, Some(e))
            }
        };

        record.extracted = fields;
        record.status = status;
        record.updated_at = ctx.now;
        let changes = json!({ "status": record.status, "extracted": record.extracted });
        self.save_tender(ctx, &record, TrailOp::Transition, Some(changes))?;
        tracing::info!(id, status = %record.status, "extraction result stored");
        Ok(ExtractionOutcome { record, error })
    }

    /// Run `extractor` over the notice text and store the outcome.
    pub async fn extract_tender_fields<E: Extractor>(
        &self,
        ctx: &RequestContext,
        kind: TenderKind,
        id: &str,
        extractor: &E,
        notice_text: &str,
    ) -> Result<ExtractionOutcome, StoreError> {
        // Fail on a missing record before spending a remote call.
        let record = self.get_tender(ctx, kind, id)?;
        ensure_editable(&record)?;
        let result = tender_extract::extract_tender(extractor, notice_text).await;
        self.apply_extraction(ctx, kind, id, result)
    }

    pub fn archive_tender(
        &self,
        ctx: &RequestContext,
        kind: TenderKind,
        id: &str,
    ) -> Result<TenderRecord, StoreError> {
        let mut record = self.get_tender(ctx, kind, id)?;
        if record.status == TenderStatus::Archived {
            return Ok(record);
        }
        record.status = TenderStatus::Archived;
        record.updated_at = ctx.now;
        self.save_tender(
            ctx,
            &record,
            TrailOp::Transition,
            Some(json!({ "status": record.status })),
        )?;
        Ok(record)
    }
}

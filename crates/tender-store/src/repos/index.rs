//! Index consistency checks and rebuilds.
//!
//! Detail records are authoritative. `check_index` only reports drift;
//! `rebuild_index` rewrites the listing from the detail records.

use std::collections::{BTreeMap, BTreeSet};

use tender_core::entities::{IndexEntry, Pack, Template, TenderRecord, VaultFile};
use tender_core::identity::RequestContext;
use tender_core::responses::{DriftKind, IndexDrift};

use crate::error::StoreError;
use crate::index::Indexed;
use crate::layout::Collection;
use crate::service::TenderService;

impl TenderService {
    /// Index rows as the detail records say they should be.
    fn expected_entries(
        &self,
        ctx: &RequestContext,
        collection: Collection,
    ) -> Result<Vec<IndexEntry>, StoreError> {
        let yoj = self.scope(ctx)?;
        let dir = collection.dir(yoj);
        let mut entries = Vec::new();
        for id in self.store().list_records(dir.as_str())? {
            let path = dir.record(&id);
            let entry = match collection {
                Collection::Packs => self.load::<Pack>(&path)?.map(|r| r.index_entry()),
                Collection::Templates | Collection::GlobalTemplates => {
                    self.load::<Template>(&path)?.map(|r| r.index_entry())
                }
                Collection::Tenders | Collection::Workorders => {
                    self.load::<TenderRecord>(&path)?.map(|r| r.index_entry())
                }
                Collection::Vault => self.load::<VaultFile>(&path)?.map(|r| r.index_entry()),
            };
            entries.extend(entry);
        }
        Ok(entries)
    }

    /// Compare a collection index with its detail records.
    pub fn check_index(
        &self,
        ctx: &RequestContext,
        collection: Collection,
    ) -> Result<Vec<IndexDrift>, StoreError> {
        let yoj = self.scope(ctx)?;
        let listed: BTreeMap<String, IndexEntry> = self
            .store()
            .list_index(&collection.dir(yoj).index())?
            .into_iter()
            .map(|entry| (entry.id.clone(), entry))
            .collect();
        let actual: BTreeMap<String, IndexEntry> = self
            .expected_entries(ctx, collection)?
            .into_iter()
            .map(|entry| (entry.id.clone(), entry))
            .collect();

        let ids: BTreeSet<&String> = listed.keys().chain(actual.keys()).collect();
        let mut drift = Vec::new();
        for id in ids {
            let kind = match (listed.get(id), actual.get(id)) {
                (Some(_), None) => Some(DriftKind::MissingDetail),
                (None, Some(_)) => Some(DriftKind::MissingIndexEntry),
                (Some(row), Some(detail)) if row.updated_at != detail.updated_at => {
                    Some(DriftKind::StaleUpdatedAt)
                }
                _ => None,
            };
            if let Some(kind) = kind {
                drift.push(IndexDrift {
                    id: id.clone(),
                    kind,
                });
            }
        }
        if !drift.is_empty() {
            tracing::warn!(collection = %collection, count = drift.len(), "index drift detected");
        }
        Ok(drift)
    }

    /// Rewrite a collection index from its detail records, newest first.
    /// Returns the number of rows written.
    pub fn rebuild_index(
        &self,
        ctx: &RequestContext,
        collection: Collection,
    ) -> Result<usize, StoreError> {
        let yoj = self.scope(ctx)?;
        let mut entries = self.expected_entries(ctx, collection)?;
        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        self.store().write_index(&collection.dir(yoj).index(), &entries)?;
        tracing::info!(collection = %collection, rows = entries.len(), "index rebuilt");
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tender_core::entities::IndexEntry;
    use tender_core::responses::{DriftKind, IndexDrift};

    use crate::layout::Collection;
    use crate::test_support::helpers::{base_time, contractor, test_service};

    #[test]
    fn consistent_index_has_no_drift() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        svc.create_pack(&ctx, "Road").unwrap();
        svc.create_pack(&ctx, "Bridge").unwrap();
        assert!(svc.check_index(&ctx, Collection::Packs).unwrap().is_empty());
    }

    #[test]
    fn reports_every_drift_kind() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let stale = svc.create_pack(&ctx, "Road").unwrap();
        let unlisted = svc.create_pack(&ctx, "Bridge").unwrap();

        let index_path = Collection::Packs.dir("YOJ1").index();
        let mut rows = svc.store().list_index(&index_path).unwrap();
        rows.retain(|row| row.id != unlisted.pack_id);
        for row in &mut rows {
            row.updated_at = base_time() - chrono::Duration::days(1);
        }
        rows.push(IndexEntry {
            id: "pck-ghost".into(),
            title: "Ghost".into(),
            status: None,
            updated_at: base_time(),
        });
        svc.store().write_index(&index_path, &rows).unwrap();

        let mut drift = svc.check_index(&ctx, Collection::Packs).unwrap();
        drift.sort_by(|a, b| a.id.cmp(&b.id));
        let mut expected = vec![
            IndexDrift { id: "pck-ghost".into(), kind: DriftKind::MissingDetail },
            IndexDrift { id: stale.pack_id, kind: DriftKind::StaleUpdatedAt },
            IndexDrift { id: unlisted.pack_id, kind: DriftKind::MissingIndexEntry },
        ];
        expected.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(drift, expected);

        assert_eq!(svc.rebuild_index(&ctx, Collection::Packs).unwrap(), 2);
        assert!(svc.check_index(&ctx, Collection::Packs).unwrap().is_empty());
    }
}

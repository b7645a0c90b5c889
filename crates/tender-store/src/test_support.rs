//! Shared test utilities for tender-store tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::{DateTime, Duration};
    use tender_core::entities::{ChecklistItem, Pack};
    use tender_core::identity::{ContractorIdentity, RequestContext};
    use tender_core::time::Timestamp;

    use crate::service::TenderService;
    use crate::trail::TrailWriter;

    pub fn base_time() -> Timestamp {
        DateTime::parse_from_rfc3339("2026-04-01T10:00:00+05:30").unwrap()
    }

    /// Memory-backed service with the trail disabled.
    pub fn test_service() -> TenderService {
        TenderService::in_memory()
    }

    /// Memory-backed service with the trail writing into `trail_dir`.
    pub fn test_service_with_trail(trail_dir: std::path::PathBuf) -> TenderService {
        TenderService::new(
            Box::new(crate::store::MemoryStore::new()),
            TrailWriter::new(trail_dir).unwrap(),
        )
    }

    pub fn contractor(yoj_id: &str) -> RequestContext {
        RequestContext::at(ContractorIdentity::contractor(yoj_id), base_time())
    }

    /// Same contractor, `minutes` after [`base_time`].
    pub fn contractor_later(yoj_id: &str, minutes: i64) -> RequestContext {
        RequestContext::at(
            ContractorIdentity::contractor(yoj_id),
            base_time() + Duration::minutes(minutes),
        )
    }

    pub fn admin(yoj_id: &str) -> RequestContext {
        RequestContext::at(ContractorIdentity::admin(yoj_id), base_time())
    }

    /// Manual pack with two required items `a` and `b` and optional `c`.
    pub fn pack_with_items(svc: &TenderService, ctx: &RequestContext) -> Pack {
        let pack = svc.create_pack(ctx, "Road resurfacing").unwrap();
        let items = [
            ChecklistItem::new("a", "PAN Card", true),
            ChecklistItem::new("b", "GST Certificate", true),
            ChecklistItem::new("c", "Work Experience", false),
        ];
        for item in items {
            svc.add_checklist_item(ctx, &pack.pack_id, item).unwrap();
        }
        svc.get_pack(ctx, &pack.pack_id).unwrap()
    }
}

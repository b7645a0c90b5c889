//! Pack repository: checklist evidence, document generation and printing.
//!
//! Packs are never hard-deleted. An archived pack is read-only until its
//! status is changed back.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use serde_json::json;
use tender_core::entities::{
    Annexure, AttachmentMapping, ChecklistItem, ExtractedFields, FileRef, GeneratedDoc,
    IndexEntry, Pack, PackSource, PrintPrefs, TableRow, Template, TenderKind,
};
use tender_core::enums::{ChecklistStatus, DocSelector, EntityType, MemorySource, PackStatus, TrailOp};
use tender_core::identity::RequestContext;
use tender_core::ids::{PREFIX_ANNEXURE, PREFIX_DOC, PREFIX_ITEM, PREFIX_PACK, validate_record_id};
use tender_docs::AssembleError;
use tender_docs::assemble::{
    self, ChecklistSummary, apply_official, missing_required, seed_annexures,
    seed_checklist_from_tender, set_item_status, summarize,
};
use tender_docs::compose::{ComposeOptions, ComposedDocument, compose_with_page_map};
use tender_docs::fill::{FillOptions, fill};
use tender_docs::registry::{ContextBundle, FieldRegistry};
use tender_docs::render::{DocumentRenderer, RenderOptions, Rendered};
use tender_docs::resolver::{Resolution, required_keys_for, resolve};
use tender_docs::restricted::is_restricted;
use tender_docs::suggest::{VaultSuggestion, suggest_vault};

use crate::error::StoreError;
use crate::helpers::{encode, new_id, require_text};
use crate::layout::Collection;
use crate::service::TenderService;
use crate::updates::pack::PrintPrefsUpdate;

/// Input of a document generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub template_id: String,
    /// Annexure the document fulfils.
    pub annexure_id: Option<String>,
    /// Checklist item the document is evidence for.
    pub item_id: Option<String>,
    /// Values typed for this document only.
    pub overrides: BTreeMap<String, String>,
    pub tables: BTreeMap<String, Vec<TableRow>>,
    /// Remember the non-blank overrides in profile memory.
    pub save_for_future: bool,
}

impl GenerateRequest {
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            ..Self::default()
        }
    }
}

/// A filled template body with the resolution that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub body: String,
    /// Placeholders printed as blanks, `table:<key>` for empty tables.
    pub missing: Vec<String>,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generation {
    pub doc: GeneratedDoc,
    pub resolution: Resolution,
}

#[derive(Debug, Clone)]
pub struct PrintedPack {
    pub document: ComposedDocument,
    pub rendered: Rendered,
}

fn ensure_editable(pack: &Pack) -> Result<(), StoreError> {
    if pack.status == PackStatus::Archived {
        return Err(StoreError::invalid("status", "archived packs cannot be changed"));
    }
    Ok(())
}

/// Evidence work on a draft pack means it is under way.
fn mark_started(pack: &mut Pack) {
    if pack.status == PackStatus::Draft {
        pack.status = PackStatus::InProgress;
    }
}

fn find_item<'a>(pack: &'a mut Pack, item_id: &str) -> Result<&'a mut ChecklistItem, StoreError> {
    pack.checklist_item_mut(item_id).ok_or_else(|| {
        AssembleError::UnknownItem {
            item_id: item_id.to_string(),
        }
        .into()
    })
}

impl TenderService {
    fn new_pack(&self, ctx: &RequestContext, title: &str, source: PackSource) -> Result<Pack, StoreError> {
        let yoj = self.scope(ctx)?;
        require_text("title", title)?;
        let print = self.print_config();
        Ok(Pack {
            pack_id: self.fresh_id(&Collection::Packs.dir(yoj), PREFIX_PACK)?,
            owner_yoj_id: yoj.to_string(),
            title: title.trim().to_string(),
            source,
            items: Vec::new(),
            checklist: Vec::new(),
            attachments: Vec::new(),
            generated_docs: Vec::new(),
            generated_templates: Vec::new(),
            annexure_list: Vec::new(),
            print_prefs: PrintPrefs {
                page_size: print.page_size,
                orientation: print.orientation,
                ..PrintPrefs::default()
            },
            status: PackStatus::Draft,
            created_at: ctx.now,
            updated_at: ctx.now,
        })
    }

    fn save_pack(
        &self,
        ctx: &RequestContext,
        pack: &mut Pack,
        op: TrailOp,
        changes: Option<serde_json::Value>,
    ) -> Result<(), StoreError> {
        pack.validate()?;
        pack.updated_at = ctx.now;
        let yoj = self.scope(ctx)?;
        self.save_indexed(ctx, &Collection::Packs.dir(yoj), EntityType::Pack, pack, op, changes)
    }

    /// Load, check it is editable, change, save.
    fn mutate_pack<T>(
        &self,
        ctx: &RequestContext,
        pack_id: &str,
        change: impl FnOnce(&mut Pack) -> Result<(T, serde_json::Value), StoreError>,
    ) -> Result<(Pack, T), StoreError> {
        let mut pack = self.get_pack(ctx, pack_id)?;
        ensure_editable(&pack)?;
        let (out, changes) = change(&mut pack)?;
        self.save_pack(ctx, &mut pack, TrailOp::Update, Some(changes))?;
        Ok((pack, out))
    }

    /// An empty manual pack.
    pub fn create_pack(&self, ctx: &RequestContext, title: &str) -> Result<Pack, StoreError> {
        let mut pack = self.new_pack(ctx, title, PackSource::Manual)?;
        self.save_pack(ctx, &mut pack, TrailOp::Create, None)?;
        Ok(pack)
    }

    /// A pack seeded from an offline tender or workorder: fixed cover items,
    /// eligibility documents and the annexure list.
    pub fn create_pack_from_tender(
        &self,
        ctx: &RequestContext,
        kind: TenderKind,
        tender_id: &str,
    ) -> Result<Pack, StoreError> {
        let record = self.get_tender(ctx, kind, tender_id)?;
        let source = match kind {
            TenderKind::OfflineTender => PackSource::OfflineTender {
                tender_id: record.id.clone(),
            },
            TenderKind::Workorder => PackSource::Workorder {
                workorder_id: record.id.clone(),
            },
        };
        let title = if record.extracted.title.trim().is_empty() {
            &record.title
        } else {
            &record.extracted.title
        };
        let mut pack = self.new_pack(ctx, title, source)?;
        pack.checklist = assemble::assemble(
            &seed_checklist_from_tender(&record.extracted),
            &[],
            &[],
            &[],
        )?;
        pack.annexure_list = seed_annexures(&record.extracted);
        self.save_pack(ctx, &mut pack, TrailOp::Create, None)?;
        tracing::debug!(
            pack_id = %pack.pack_id,
            items = pack.checklist.len(),
            annexures = pack.annexure_list.len(),
            "pack seeded from tender"
        );
        Ok(pack)
    }

    pub fn get_pack(&self, ctx: &RequestContext, pack_id: &str) -> Result<Pack, StoreError> {
        let yoj = self.scope(ctx)?;
        validate_record_id("pack_id", pack_id)?;
        self.load::<Pack>(&Collection::Packs.dir(yoj).record(pack_id))?
            .filter(|pack| pack.owner_yoj_id == yoj)
            .ok_or_else(|| StoreError::not_found("pack", pack_id))
    }

    pub fn list_packs(
        &self,
        ctx: &RequestContext,
        include_archived: bool,
    ) -> Result<Vec<IndexEntry>, StoreError> {
        let yoj = self.scope(ctx)?;
        let entries = self.store().list_index(&Collection::Packs.dir(yoj).index())?;
        Ok(entries
            .into_iter()
            .filter(|entry| {
                include_archived || entry.status.as_deref() != Some(PackStatus::Archived.as_str())
            })
            .collect())
    }

    /// Add a contractor item. A blank `item_id` gets a generated one.
    pub fn add_checklist_item(
        &self,
        ctx: &RequestContext,
        pack_id: &str,
        mut item: ChecklistItem,
    ) -> Result<ChecklistItem, StoreError> {
        require_text("title", &item.title)?;
        if item.item_id.trim().is_empty() {
            item.item_id = new_id(PREFIX_ITEM)?;
        }
        validate_record_id("item_id", &item.item_id)?;
        item.title = item.title.trim().to_string();
        let (_, item) = self.mutate_pack(ctx, pack_id, |pack| {
            if pack.has_item(&item.item_id) {
                return Err(StoreError::invalid(
                    "item_id",
                    format!("item '{}' already exists", item.item_id),
                ));
            }
            pack.checklist = assemble::merge_items(&pack.checklist, std::slice::from_ref(&item));
            let changes = json!({ "checklist_added": &item });
            Ok((item, changes))
        })?;
        Ok(item)
    }

    /// Set an item's status. Unknown status text falls back to `pending`.
    pub fn set_checklist_status(
        &self,
        ctx: &RequestContext,
        pack_id: &str,
        item_id: &str,
        raw_status: &str,
    ) -> Result<ChecklistStatus, StoreError> {
        let (_, status) = self.mutate_pack(ctx, pack_id, |pack| {
            let status = set_item_status(&mut pack.checklist, item_id, raw_status)?;
            mark_started(pack);
            Ok((status, json!({ "item_id": item_id, "status": status })))
        })?;
        Ok(status)
    }

    /// Map a live vault file onto a checklist item. Status is left alone.
    pub fn attach_vault(
        &self,
        ctx: &RequestContext,
        pack_id: &str,
        item_id: &str,
        file_id: &str,
    ) -> Result<Pack, StoreError> {
        let vault = self.list_vault(ctx, true)?;
        let mapping = AttachmentMapping {
            item_id: item_id.to_string(),
            file_id: file_id.to_string(),
        };
        let (pack, ()) = self.mutate_pack(ctx, pack_id, |pack| {
            pack.checklist = assemble::assemble(&pack.checklist, &[], &vault, std::slice::from_ref(&mapping))?;
            if !pack.attachments.contains(&mapping) {
                pack.attachments.push(mapping.clone());
            }
            mark_started(pack);
            Ok(((), json!({ "attached": &mapping })))
        })?;
        Ok(pack)
    }

    /// Record a file the upload collaborator stored against an item.
    ///
    /// A pending item becomes `uploaded`.
    pub fn record_upload(
        &self,
        ctx: &RequestContext,
        pack_id: &str,
        item_id: &str,
        path: &str,
        name: &str,
    ) -> Result<ChecklistItem, StoreError> {
        require_text("path", path)?;
        let file_ref = FileRef::Upload {
            path: path.trim().to_string(),
            name: if name.trim().is_empty() { path.trim() } else { name.trim() }.to_string(),
        };
        let (_, item) = self.mutate_pack(ctx, pack_id, |pack| {
            let item = find_item(pack, item_id)?;
            if !item.file_refs.contains(&file_ref) {
                item.file_refs.push(file_ref.clone());
            }
            if item.status == ChecklistStatus::Pending {
                item.status = ChecklistStatus::Uploaded;
            }
            let item = item.clone();
            mark_started(pack);
            Ok((item, json!({ "item_id": item_id, "uploaded": &file_ref })))
        })?;
        Ok(item)
    }

    /// Apply the department's checklist. Official items lead; contractor
    /// evidence on matching items is carried over and attachment mappings
    /// follow renamed items.
    pub fn apply_official_checklist(
        &self,
        ctx: &RequestContext,
        pack_id: &str,
        official: &[ChecklistItem],
    ) -> Result<Pack, StoreError> {
        for item in official {
            validate_record_id("item_id", &item.item_id)?;
            require_text("title", &item.title)?;
        }
        let (pack, ()) = self.mutate_pack(ctx, pack_id, |pack| {
            let merge = apply_official(&pack.checklist, official);
            for mapping in &mut pack.attachments {
                if let Some((_, new_id)) = merge.renamed.iter().find(|(old, _)| *old == mapping.item_id) {
                    mapping.item_id.clone_from(new_id);
                }
            }
            let mut seen = HashSet::new();
            pack.attachments
                .retain(|mapping| seen.insert((mapping.item_id.clone(), mapping.file_id.clone())));
            pack.checklist = merge.checklist;
            let changes = json!({ "official_items": official.len(), "renamed": &merge.renamed });
            Ok(((), changes))
        })?;
        Ok(pack)
    }

    /// Add an annexure by its printed label, e.g. `Annexure-C: Affidavit`.
    pub fn add_annexure(
        &self,
        ctx: &RequestContext,
        pack_id: &str,
        label: &str,
    ) -> Result<Annexure, StoreError> {
        require_text("label", label)?;
        let seeded = seed_annexures(&ExtractedFields {
            annexures: vec![label.to_string()],
            ..ExtractedFields::default()
        });
        let mut annexure = seeded
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::invalid("label", "must not be empty"))?;
        annexure.annexure_id = new_id(PREFIX_ANNEXURE)?;
        let (_, annexure) = self.mutate_pack(ctx, pack_id, |pack| {
            pack.annexure_list.push(annexure.clone());
            let changes = json!({ "annexure_added": &annexure });
            Ok((annexure, changes))
        })?;
        Ok(annexure)
    }

    /// Context bundles for documents generated into `pack`.
    fn context_bundles(
        &self,
        ctx: &RequestContext,
        pack: Option<&Pack>,
    ) -> Result<Vec<ContextBundle>, StoreError> {
        let mut bundles = Vec::new();
        let source = pack.map(|pack| &pack.source);
        let tender = match source {
            Some(PackSource::OfflineTender { tender_id }) => Some((TenderKind::OfflineTender, tender_id)),
            Some(PackSource::Workorder { workorder_id }) => Some((TenderKind::Workorder, workorder_id)),
            _ => None,
        };
        if let Some((kind, id)) = tender {
            match self.get_tender(ctx, kind, id) {
                Ok(record) => bundles.push(ContextBundle::from_tender(&record)),
                Err(StoreError::NotFound { .. }) => {
                    tracing::warn!(id = %id, "pack source record is missing; tender keys stay blank");
                }
                Err(e) => return Err(e),
            }
        }
        bundles.push(ContextBundle::for_request(&ctx.now));
        Ok(bundles)
    }

    fn fill_template(
        &self,
        ctx: &RequestContext,
        template: &Template,
        pack: Option<&Pack>,
        overrides: &BTreeMap<String, String>,
        tables: &BTreeMap<String, Vec<TableRow>>,
    ) -> Result<Preview, StoreError> {
        let registry = FieldRegistry::build(&self.context_bundles(ctx, pack)?);
        for (key, value) in overrides {
            registry.validate_value(key, value)?;
        }

        let profile = self.get_profile(ctx)?;
        let memory = self.get_memory(ctx)?;
        let resolution = resolve(&profile, &memory, overrides, &required_keys_for(template), &registry);

        let options = if template.format.is_html() {
            FillOptions::html()
        } else {
            FillOptions::text()
        }
        .with_blank_marker(self.print_config().blank_marker.clone());
        let filled = fill(&template.body, &resolution.values, tables, &template.tables, &options);
        Ok(Preview {
            body: filled.body,
            missing: filled.missing,
            resolution,
        })
    }

    /// Fill a template without storing anything, optionally in the context
    /// of a pack.
    pub fn preview_template(
        &self,
        ctx: &RequestContext,
        template_id: &str,
        pack_id: Option<&str>,
        overrides: &BTreeMap<String, String>,
        tables: &BTreeMap<String, Vec<TableRow>>,
    ) -> Result<Preview, StoreError> {
        let template = self.get_template(ctx, template_id)?;
        let pack = pack_id.map(|id| self.get_pack(ctx, id)).transpose()?;
        self.fill_template(ctx, &template, pack.as_ref(), overrides, tables)
    }

    /// Generate a document from a template into a pack.
    ///
    /// Regenerating the same template for the same annexure replaces the
    /// earlier document under its existing ID.
    pub fn generate_document(
        &self,
        ctx: &RequestContext,
        pack_id: &str,
        request: &GenerateRequest,
    ) -> Result<Generation, StoreError> {
        let mut pack = self.get_pack(ctx, pack_id)?;
        ensure_editable(&pack)?;
        let template = self.get_template(ctx, &request.template_id)?;
        if is_restricted(&template.title) {
            return Err(StoreError::invalid(
                "template_id",
                format!("'{}' is a pricing format and is not generated", template.title),
            ));
        }
        if let Some(annexure_id) = &request.annexure_id {
            let annexure = pack
                .annexure_list
                .iter()
                .find(|annexure| &annexure.annexure_id == annexure_id)
                .ok_or_else(|| StoreError::not_found("annexure", annexure_id))?;
            if annexure.restricted {
                return Err(StoreError::invalid(
                    "annexure_id",
                    format!("'{}' is a pricing format and is not generated", annexure.title),
                ));
            }
        }
        if let Some(item_id) = &request.item_id
            && !pack.has_item(item_id)
        {
            return Err(AssembleError::UnknownItem {
                item_id: item_id.clone(),
            }
            .into());
        }

        let preview = self.fill_template(ctx, &template, Some(&pack), &request.overrides, &request.tables)?;

        let existing = pack.generated_docs.iter().position(|doc| {
            doc.template_id == template.id && doc.annexure_id == request.annexure_id
        });
        let doc_id = match existing {
            Some(index) => pack.generated_docs[index].doc_id.clone(),
            None => new_id(PREFIX_DOC)?,
        };
        let doc = GeneratedDoc {
            doc_id,
            template_id: template.id.clone(),
            title: template.title.clone(),
            annexure_id: request.annexure_id.clone(),
            body: preview.body,
            format: template.format,
            missing: preview.missing,
            generated_at: ctx.now,
        };
        match existing {
            Some(index) => pack.generated_docs[index] = doc.clone(),
            None => pack.generated_docs.push(doc.clone()),
        }
        if !pack.generated_templates.contains(&template.id) {
            pack.generated_templates.push(template.id.clone());
        }
        if let Some(annexure_id) = &request.annexure_id
            && let Some(annexure) = pack
                .annexure_list
                .iter_mut()
                .find(|annexure| &annexure.annexure_id == annexure_id)
        {
            annexure.template_id = Some(template.id.clone());
        }
        if let Some(item_id) = &request.item_id {
            let item = find_item(&mut pack, item_id)?;
            let file_ref = FileRef::Generated {
                doc_id: doc.doc_id.clone(),
            };
            if !item.file_refs.contains(&file_ref) {
                item.file_refs.push(file_ref);
            }
            if item.status == ChecklistStatus::Pending {
                item.status = ChecklistStatus::Generated;
            }
        }
        mark_started(&mut pack);

        let changes = json!({
            "generated": { "doc_id": &doc.doc_id, "template_id": &doc.template_id, "missing": &doc.missing },
        });
        self.save_pack(ctx, &mut pack, TrailOp::Update, Some(changes))?;

        if request.save_for_future {
            self.remember_values(ctx, &request.overrides, MemorySource::Document)?;
        }
        tracing::debug!(pack_id, doc_id = %doc.doc_id, missing = doc.missing.len(), "document generated");
        Ok(Generation {
            doc,
            resolution: preview.resolution,
        })
    }

    pub fn update_print_prefs(
        &self,
        ctx: &RequestContext,
        pack_id: &str,
        update: &PrintPrefsUpdate,
    ) -> Result<Pack, StoreError> {
        let changes = encode(update)?;
        let (pack, ()) = self.mutate_pack(ctx, pack_id, |pack| {
            update.apply_to(&mut pack.print_prefs);
            Ok(((), json!({ "print_prefs": changes })))
        })?;
        Ok(pack)
    }

    /// Move a pack to any status. This is the only change an archived pack
    /// accepts.
    pub fn set_pack_status(
        &self,
        ctx: &RequestContext,
        pack_id: &str,
        status: PackStatus,
    ) -> Result<Pack, StoreError> {
        let mut pack = self.get_pack(ctx, pack_id)?;
        if pack.status == status {
            return Ok(pack);
        }
        tracing::debug!(pack_id, from = %pack.status, to = %status, "pack status change");
        pack.status = status;
        self.save_pack(ctx, &mut pack, TrailOp::Transition, Some(json!({ "status": status })))?;
        Ok(pack)
    }

    pub fn archive_pack(&self, ctx: &RequestContext, pack_id: &str) -> Result<Pack, StoreError> {
        self.set_pack_status(ctx, pack_id, PackStatus::Archived)
    }

    /// Required items with no evidence yet, in checklist order.
    pub fn pack_missing(&self, ctx: &RequestContext, pack_id: &str) -> Result<Vec<String>, StoreError> {
        Ok(missing_required(&self.get_pack(ctx, pack_id)?))
    }

    pub fn pack_summary(&self, ctx: &RequestContext, pack_id: &str) -> Result<ChecklistSummary, StoreError> {
        Ok(summarize(&self.get_pack(ctx, pack_id)?))
    }

    /// Vault files that look like they satisfy missing required items.
    pub fn suggest_for_pack(
        &self,
        ctx: &RequestContext,
        pack_id: &str,
    ) -> Result<Vec<VaultSuggestion>, StoreError> {
        let pack = self.get_pack(ctx, pack_id)?;
        let vault = self.list_vault(ctx, false)?;
        Ok(suggest_vault(&pack, &vault, self.print_config().suggestion_threshold))
    }

    /// Compose the selected sections and hand them to `renderer`.
    pub fn print_pack(
        &self,
        ctx: &RequestContext,
        pack_id: &str,
        selector: DocSelector,
        renderer: &dyn DocumentRenderer,
    ) -> Result<PrintedPack, StoreError> {
        let pack = self.get_pack(ctx, pack_id)?;
        let profile = self.get_profile(ctx)?;
        let options = ComposeOptions::new(ctx.now, self.get_print_settings(ctx)?);
        let document = compose_with_page_map(&pack, &profile, selector, &options, renderer);
        let rendered = renderer.render(&document, &RenderOptions::from_document(&document))?;
        tracing::debug!(pack_id, selector = %selector, sections = document.sections.len(), "pack printed");
        Ok(PrintedPack { document, rendered })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use tender_core::entities::{ChecklistItem, TenderKind};
    use tender_core::enums::{BodyFormat, ChecklistStatus, DocSelector, PackStatus};
    use tender_core::errors::ErrorKind;
    use tender_docs::render::BrowserPrintRenderer;

    use super::GenerateRequest;
    use crate::repos::template::NewTemplate;
    use crate::repos::vault::NewVaultFile;
    use crate::test_support::helpers::{contractor, contractor_later, pack_with_items, test_service};
    use crate::updates::tender::TenderUpdateBuilder;
    use crate::TenderService;

    fn tender_pack(svc: &TenderService, yoj: &str) -> tender_core::entities::Pack {
        let ctx = contractor(yoj);
        let tender = svc
            .create_tender(&ctx, TenderKind::OfflineTender, "Culvert repair", None)
            .unwrap();
        let update = TenderUpdateBuilder::new()
            .field("department", "PWD")
            .field("emd", "25,000")
            .eligibility_docs(vec!["PAN Card".into(), "GST Certificate".into()])
            .annexures(vec!["Annexure-A: Affidavit".into(), "Annexure-B: Schedule of Rates".into()])
            .build();
        svc.update_tender_fields(&ctx, TenderKind::OfflineTender, &tender.id, &update)
            .unwrap();
        svc.create_pack_from_tender(&ctx, TenderKind::OfflineTender, &tender.id)
            .unwrap()
    }

    fn vault_file(svc: &TenderService, yoj: &str, title: &str) -> String {
        svc.add_vault_file(
            &contractor(yoj),
            NewVaultFile {
                title: title.into(),
                doc_type: String::new(),
                tags: Vec::new(),
                stored_path: format!("uploads/{title}.pdf"),
            },
        )
        .unwrap()
        .file_id
    }

    #[test]
    fn pack_from_tender_is_seeded() {
        let svc = test_service();
        let pack = tender_pack(&svc, "YOJ1");
        let ids: Vec<&str> = pack.checklist.iter().map(|item| item.item_id.as_str()).collect();
        assert_eq!(ids, vec!["covering-letter", "emd", "pan-card", "gst-certificate"]);
        assert_eq!(pack.annexure_list.len(), 2);
        assert!(!pack.annexure_list[0].restricted);
        assert!(pack.annexure_list[1].restricted);
        assert_eq!(svc.list_packs(&contractor("YOJ1"), false).unwrap().len(), 1);
    }

    #[test]
    fn vault_attachment_satisfies_item() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let pack = pack_with_items(&svc, &ctx);
        assert_eq!(svc.pack_missing(&ctx, &pack.pack_id).unwrap(), vec!["a", "b"]);

        let file_id = vault_file(&svc, "YOJ1", "PAN Card");
        let pack = svc.attach_vault(&ctx, &pack.pack_id, "a", &file_id).unwrap();
        assert_eq!(pack.attachments.len(), 1);
        // Attaching twice adds nothing.
        let pack = svc.attach_vault(&ctx, &pack.pack_id, "a", &file_id).unwrap();
        assert_eq!(pack.attachments.len(), 1);
        assert_eq!(pack.checklist_item("a").unwrap().status, ChecklistStatus::Pending);
        assert_eq!(pack.status, PackStatus::InProgress);
        assert_eq!(svc.pack_missing(&ctx, &pack.pack_id).unwrap(), vec!["b"]);
    }

    #[test]
    fn deleted_or_foreign_vault_file_cannot_be_attached() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let pack = pack_with_items(&svc, &ctx);
        let file_id = vault_file(&svc, "YOJ1", "PAN Card");
        svc.delete_vault_file(&ctx, &file_id).unwrap();
        let err = svc.attach_vault(&ctx, &pack.pack_id, "a", &file_id).unwrap_err();
        assert!(err.to_string().contains("deleted"));

        let foreign = vault_file(&svc, "YOJ2", "GST");
        let err = svc.attach_vault(&ctx, &pack.pack_id, "a", &foreign).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(svc.get_pack(&ctx, &pack.pack_id).unwrap().attachments.is_empty());
    }

    #[test]
    fn upload_moves_pending_item_to_uploaded() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let pack = pack_with_items(&svc, &ctx);
        let item = svc
            .record_upload(&ctx, &pack.pack_id, "b", "uploads/gst.pdf", "")
            .unwrap();
        assert_eq!(item.status, ChecklistStatus::Uploaded);
        assert_eq!(item.file_refs.len(), 1);
        let err = svc
            .record_upload(&ctx, &pack.pack_id, "zz", "uploads/x.pdf", "x")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn unknown_status_text_falls_back_to_pending() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let pack = pack_with_items(&svc, &ctx);
        assert_eq!(
            svc.set_checklist_status(&ctx, &pack.pack_id, "a", "done").unwrap(),
            ChecklistStatus::Done
        );
        assert_eq!(
            svc.set_checklist_status(&ctx, &pack.pack_id, "a", "shredded").unwrap(),
            ChecklistStatus::Pending
        );
    }

    #[test]
    fn generate_fills_from_tender_and_profile() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let pack = tender_pack(&svc, "YOJ1");
        let template = svc
            .create_template(
                &ctx,
                NewTemplate::contractor("Covering Letter", "Dear {{dept}}, Firm: {{firm.name}}", BodyFormat::Text),
            )
            .unwrap();

        let mut request = GenerateRequest::new(&template.id);
        request.item_id = Some("covering-letter".into());
        let first = svc.generate_document(&ctx, &pack.pack_id, &request).unwrap();
        assert_eq!(first.doc.body, "Dear PWD, Firm: __________");
        assert_eq!(first.doc.missing, vec!["firm.name"]);

        svc.set_profile_field(&ctx, "firm.name", "Sharma Builders").unwrap();
        let second = svc
            .generate_document(&contractor_later("YOJ1", 3), &pack.pack_id, &request)
            .unwrap();
        assert_eq!(second.doc.doc_id, first.doc.doc_id);
        assert_eq!(second.doc.body, "Dear PWD, Firm: Sharma Builders");

        let pack = svc.get_pack(&ctx, &pack.pack_id).unwrap();
        assert_eq!(pack.generated_docs.len(), 1);
        assert_eq!(pack.generated_templates, vec![template.id]);
        let item = pack.checklist_item("covering-letter").unwrap();
        assert_eq!(item.status, ChecklistStatus::Generated);
    }

    #[test]
    fn overrides_win_and_can_be_remembered() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let pack = pack_with_items(&svc, &ctx);
        let template = svc
            .create_template(&ctx, NewTemplate::contractor("Note", "Engineer: {{site.engineer}}", BodyFormat::Text))
            .unwrap();
        let mut request = GenerateRequest::new(&template.id);
        request.overrides = BTreeMap::from([("site.engineer".to_string(), "R. Rao".to_string())]);
        request.save_for_future = true;
        let generation = svc.generate_document(&ctx, &pack.pack_id, &request).unwrap();
        assert_eq!(generation.doc.body, "Engineer: R. Rao");
        assert_eq!(svc.get_memory(&ctx).unwrap().value("site.engineer"), Some("R. Rao"));

        let preview = svc
            .preview_template(&ctx, &template.id, None, &BTreeMap::new(), &BTreeMap::new())
            .unwrap();
        assert_eq!(preview.body, "Engineer: R. Rao");
        assert!(preview.missing.is_empty());
    }

    #[test]
    fn invalid_override_stores_nothing() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let pack = pack_with_items(&svc, &ctx);
        let template = svc
            .create_template(&ctx, NewTemplate::contractor("PAN", "PAN: {{tax.pan}}", BodyFormat::Text))
            .unwrap();
        let mut request = GenerateRequest::new(&template.id);
        request.overrides = BTreeMap::from([("tax.pan".to_string(), "nope".to_string())]);
        request.save_for_future = true;
        let err = svc.generate_document(&ctx, &pack.pack_id, &request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(svc.get_pack(&ctx, &pack.pack_id).unwrap().generated_docs.is_empty());
        assert!(svc.list_memory(&ctx).unwrap().is_empty());
    }

    #[test]
    fn restricted_annexure_is_never_generated() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let pack = tender_pack(&svc, "YOJ1");
        let template = svc
            .create_template(&ctx, NewTemplate::contractor("Rates", "{{firm.name}}", BodyFormat::Text))
            .unwrap();
        let mut request = GenerateRequest::new(&template.id);
        request.annexure_id = Some(pack.annexure_list[1].annexure_id.clone());
        let err = svc.generate_document(&ctx, &pack.pack_id, &request).unwrap_err();
        assert!(err.to_string().contains("pricing format"));

        let boq = svc
            .create_template(&ctx, NewTemplate::contractor("BOQ", "{{firm.name}}", BodyFormat::Text))
            .unwrap();
        let err = svc
            .generate_document(&ctx, &pack.pack_id, &GenerateRequest::new(&boq.id))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn official_checklist_keeps_evidence_under_new_id() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let pack = pack_with_items(&svc, &ctx);
        let file_id = vault_file(&svc, "YOJ1", "PAN Card");
        svc.attach_vault(&ctx, &pack.pack_id, "a", &file_id).unwrap();

        let official = vec![ChecklistItem::new("pan", "PAN card", true)];
        let pack = svc.apply_official_checklist(&ctx, &pack.pack_id, &official).unwrap();
        assert_eq!(pack.checklist[0].item_id, "pan");
        assert_eq!(pack.attachments[0].item_id, "pan");
        assert!(!pack.checklist_item("pan").unwrap().file_refs.is_empty());
    }

    #[test]
    fn archived_pack_only_accepts_status_change() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let pack = pack_with_items(&svc, &ctx);
        svc.archive_pack(&ctx, &pack.pack_id).unwrap();
        assert!(svc.list_packs(&ctx, false).unwrap().is_empty());
        let err = svc.set_checklist_status(&ctx, &pack.pack_id, "a", "done").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let pack = svc.set_pack_status(&ctx, &pack.pack_id, PackStatus::Ready).unwrap();
        assert_eq!(pack.status, PackStatus::Ready);
    }

    #[test]
    fn foreign_pack_is_not_found() {
        let svc = test_service();
        let pack = pack_with_items(&svc, &contractor("YOJ1"));
        let err = svc.get_pack(&contractor("YOJ2"), &pack.pack_id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn print_withholds_restricted_annexure() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let pack = tender_pack(&svc, "YOJ1");
        let printed = svc
            .print_pack(&ctx, &pack.pack_id, DocSelector::Full, &BrowserPrintRenderer)
            .unwrap();
        let html = String::from_utf8(printed.rendered.as_bytes().to_vec()).unwrap();
        assert!(html.contains("is a pricing format"));
        assert_eq!(printed.document.sections[0].title, "Index");
    }

    #[test]
    fn summary_counts_required_items() {
        let svc = test_service();
        let ctx = contractor("YOJ1");
        let pack = pack_with_items(&svc, &ctx);
        svc.set_checklist_status(&ctx, &pack.pack_id, "a", "done").unwrap();
        let summary = svc.pack_summary(&ctx, &pack.pack_id).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.required, 2);
        assert_eq!(summary.missing_required, vec!["b"]);
    }
}

//! Pack/checklist assembler.
//!
//! Checklist items are keyed by `item_id`. Contractor state on an item
//! (status, evidence, notes, title edits) survives every merge except an
//! explicit [`apply_official`], and even then the evidence is carried over.

use std::collections::HashSet;

use serde::Serialize;
use tender_core::entities::{
    Annexure, AttachmentMapping, ChecklistItem, ExtractedFields, FileRef, Pack, VaultFile,
};
use tender_core::enums::{ChecklistStatus, ItemSource};

use crate::error::AssembleError;
use crate::restricted::is_restricted;

/// Build a pack checklist from a definition plus contractor state.
///
/// Items come out in definition order, followed by existing items the
/// definition does not mention. Mapped vault files become `FileRef::Vault`
/// entries on their item; a file already referenced is not added twice.
///
/// # Errors
///
/// Returns `AssembleError` if a mapping names an unknown item, an unknown
/// vault file, or a soft-deleted vault file.
pub fn assemble(
    definition: &[ChecklistItem],
    existing: &[ChecklistItem],
    vault_files: &[VaultFile],
    mappings: &[AttachmentMapping],
) -> Result<Vec<ChecklistItem>, AssembleError> {
    let mut checklist: Vec<ChecklistItem> = Vec::with_capacity(definition.len() + existing.len());
    let mut placed = HashSet::new();

    for item in definition {
        if !placed.insert(item.item_id.clone()) {
            continue;
        }
        let merged = existing
            .iter()
            .find(|current| current.item_id == item.item_id)
            .unwrap_or(item);
        checklist.push(merged.clone());
    }
    for item in existing {
        if placed.insert(item.item_id.clone()) {
            checklist.push(item.clone());
        }
    }

    for mapping in mappings {
        let file = vault_files
            .iter()
            .find(|file| file.file_id == mapping.file_id)
            .ok_or_else(|| AssembleError::UnknownFile {
                file_id: mapping.file_id.clone(),
            })?;
        if !file.is_live() {
            return Err(AssembleError::DeletedFile {
                file_id: mapping.file_id.clone(),
            });
        }
        let item = checklist
            .iter_mut()
            .find(|item| item.item_id == mapping.item_id)
            .ok_or_else(|| AssembleError::UnknownItem {
                item_id: mapping.item_id.clone(),
            })?;
        let file_ref = FileRef::Vault {
            file_id: file.file_id.clone(),
        };
        if !item.file_refs.contains(&file_ref) {
            item.file_refs.push(file_ref);
        }
    }

    Ok(checklist)
}

/// Add incoming items whose IDs are new. Existing items are never touched.
#[must_use]
pub fn merge_items(existing: &[ChecklistItem], incoming: &[ChecklistItem]) -> Vec<ChecklistItem> {
    let mut seen: HashSet<&str> = existing.iter().map(|item| item.item_id.as_str()).collect();
    let mut merged = existing.to_vec();
    for item in incoming {
        if seen.insert(item.item_id.as_str()) {
            merged.push(item.clone());
        }
    }
    merged
}

/// Result of applying a department checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficialMerge {
    pub checklist: Vec<ChecklistItem>,
    /// `(old_id, new_id)` for contractor items folded into an official item
    /// under a different ID. Attachment mappings must follow these.
    pub renamed: Vec<(String, String)>,
}

/// Lowercased alphanumeric words of a title, single-spaced.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

const fn progress_rank(status: ChecklistStatus) -> u8 {
    match status {
        ChecklistStatus::Pending => 0,
        ChecklistStatus::Uploaded | ChecklistStatus::Generated => 1,
        ChecklistStatus::Done => 2,
    }
}

/// Apply a department-supplied checklist.
///
/// Official items come first, in their order. A contractor item describing
/// the same logical item (same `item_id` or same normalized title) is folded
/// into the official one: definition fields come from the official item,
/// evidence (`file_refs`, the most advanced `status`, `notes`) from the
/// contractor's. Unmatched contractor items follow unchanged.
#[must_use]
pub fn apply_official(checklist: &[ChecklistItem], official: &[ChecklistItem]) -> OfficialMerge {
    let mut consumed = vec![false; checklist.len()];
    let mut merged = Vec::with_capacity(official.len() + checklist.len());
    let mut renamed = Vec::new();
    let mut official_ids = HashSet::new();

    for item in official {
        if !official_ids.insert(item.item_id.as_str()) {
            continue;
        }
        let title_key = normalize_title(&item.title);
        let mut result = item.clone();
        result.source = ItemSource::Official;
        result.file_refs = Vec::new();
        result.status = ChecklistStatus::Pending;
        result.notes = String::new();
        let mut notes = Vec::new();
        if !item.notes.trim().is_empty() {
            notes.push(item.notes.clone());
        }

        for (index, current) in checklist.iter().enumerate() {
            if consumed[index] {
                continue;
            }
            let same = current.item_id == item.item_id || normalize_title(&current.title) == title_key;
            if !same {
                continue;
            }
            consumed[index] = true;
            if current.item_id != item.item_id {
                renamed.push((current.item_id.clone(), item.item_id.clone()));
            }
            for file_ref in &current.file_refs {
                if !result.file_refs.contains(file_ref) {
                    result.file_refs.push(file_ref.clone());
                }
            }
            if progress_rank(current.status) > progress_rank(result.status) {
                result.status = current.status;
            }
            if !current.notes.trim().is_empty() && !notes.contains(&current.notes) {
                notes.push(current.notes.clone());
            }
        }
        result.notes = notes.join("\n");
        merged.push(result);
    }

    for (index, current) in checklist.iter().enumerate() {
        if !consumed[index] && !official_ids.contains(current.item_id.as_str()) {
            merged.push(current.clone());
        }
    }

    OfficialMerge {
        checklist: merged,
        renamed,
    }
}

/// Whether an item is `done` or carries any evidence.
#[must_use]
pub fn is_item_satisfied(pack: &Pack, item: &ChecklistItem) -> bool {
    item.status == ChecklistStatus::Done
        || !item.file_refs.is_empty()
        || pack
            .attachments
            .iter()
            .any(|mapping| mapping.item_id == item.item_id)
}

/// Required checklist items with no satisfying evidence, in checklist order.
///
/// An item is satisfied when it is `done`, carries any file reference
/// (upload, vault or generated), or has a vault mapping on the pack.
#[must_use]
pub fn missing_required(pack: &Pack) -> Vec<String> {
    pack.checklist
        .iter()
        .filter(|item| item.required && !is_item_satisfied(pack, item))
        .map(|item| item.item_id.clone())
        .collect()
}

/// Set an item's status from raw user input.
///
/// Anything that is not one of the four statuses becomes `pending`.
/// Transitions outside the documented flow are allowed; they are caller
/// driven and only logged.
///
/// # Errors
///
/// Returns `AssembleError::UnknownItem` if the checklist has no such item.
pub fn set_item_status(
    checklist: &mut [ChecklistItem],
    item_id: &str,
    raw_status: &str,
) -> Result<ChecklistStatus, AssembleError> {
    let item = checklist
        .iter_mut()
        .find(|item| item.item_id == item_id)
        .ok_or_else(|| AssembleError::UnknownItem {
            item_id: item_id.to_string(),
        })?;
    let next = ChecklistStatus::parse_or_default(raw_status);
    if item.status != next && !item.status.can_transition_to(next) {
        tracing::debug!(
            item_id,
            from = %item.status,
            to = %next,
            "checklist status change outside the usual flow"
        );
    }
    item.status = next;
    Ok(next)
}

/// Progress counters for a pack's checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistSummary {
    pub total: usize,
    pub required: usize,
    pub done: usize,
    pub satisfied: usize,
    pub missing_required: Vec<String>,
    pub progress_percent: u8,
}

#[must_use]
pub fn summarize(pack: &Pack) -> ChecklistSummary {
    let total = pack.checklist.len();
    let required = pack.checklist.iter().filter(|item| item.required).count();
    let done = pack
        .checklist
        .iter()
        .filter(|item| item.status == ChecklistStatus::Done)
        .count();
    let satisfied = pack
        .checklist
        .iter()
        .filter(|item| is_item_satisfied(pack, item))
        .count();
    let progress_percent = if total == 0 {
        100
    } else {
        u8::try_from(satisfied * 100 / total).unwrap_or(100)
    };
    ChecklistSummary {
        total,
        required,
        done,
        satisfied,
        missing_required: missing_required(pack),
        progress_percent,
    }
}

fn slug(title: &str) -> String {
    normalize_title(title).replace(' ', "-")
}

fn fixed_item(item_id: &str, title: &str, category: &str) -> ChecklistItem {
    let mut item = ChecklistItem::new(item_id, title, true);
    item.category = category.to_string();
    item.source = ItemSource::Fixed;
    item
}

/// Checklist definition for a pack created from an offline tender.
///
/// Fixed cover items come first (the fee and EMD items only when the notice
/// names a fee or EMD), then every eligibility document as a required
/// official item. Item IDs are slugs of the titles so re-seeding is stable.
#[must_use]
pub fn seed_checklist_from_tender(extracted: &ExtractedFields) -> Vec<ChecklistItem> {
    let mut items = vec![fixed_item("covering-letter", "Covering Letter", "cover")];
    if !extracted.tender_fee.trim().is_empty() {
        items.push(fixed_item("tender-fee", "Tender Fee Receipt", "fees"));
    }
    if !extracted.emd.trim().is_empty() {
        items.push(fixed_item("emd", "EMD Instrument", "fees"));
    }

    let mut seen: HashSet<String> = items.iter().map(|item| item.item_id.clone()).collect();
    for doc in &extracted.eligibility_docs {
        let id = slug(doc);
        if id.is_empty() || !seen.insert(id.clone()) {
            continue;
        }
        let mut item = ChecklistItem::new(id, doc.trim(), true);
        item.category = "eligibility".to_string();
        item.source = ItemSource::Official;
        items.push(item);
    }
    items
}

/// Annexure list for a pack created from an offline tender.
///
/// Pricing formats are flagged restricted.
#[must_use]
pub fn seed_annexures(extracted: &ExtractedFields) -> Vec<Annexure> {
    extracted
        .annexures
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .enumerate()
        .map(|(index, label)| {
            let (code, title) = split_annexure_label(label);
            Annexure {
                annexure_id: format!("anx-{}", index + 1),
                code,
                title,
                template_id: None,
                restricted: is_restricted(label),
            }
        })
        .collect()
}

/// `"Annexure-B: Affidavit"` -> (`"Annexure-B"`, `"Affidavit"`).
fn split_annexure_label(label: &str) -> (String, String) {
    match label.split_once(':').or_else(|| label.split_once(" - ")) {
        Some((code, title)) if !title.trim().is_empty() => {
            (code.trim().to_string(), title.trim().to_string())
        }
        _ => (String::new(), label.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tender_core::enums::PackStatus;
    use tender_core::time::now_ist;

    use super::*;

    fn item(id: &str, title: &str, required: bool) -> ChecklistItem {
        ChecklistItem::new(id, title, required)
    }

    fn pack(checklist: Vec<ChecklistItem>) -> Pack {
        Pack {
            pack_id: "pck-1".into(),
            owner_yoj_id: "YOJ1".into(),
            title: "Pack".into(),
            source: tender_core::entities::PackSource::Manual,
            items: Vec::new(),
            checklist,
            attachments: Vec::new(),
            generated_docs: Vec::new(),
            generated_templates: Vec::new(),
            annexure_list: Vec::new(),
            print_prefs: tender_core::entities::PrintPrefs::default(),
            status: PackStatus::Draft,
            created_at: now_ist(),
            updated_at: now_ist(),
        }
    }

    fn vault(id: &str, live: bool) -> VaultFile {
        VaultFile {
            file_id: id.into(),
            owner_yoj_id: "YOJ1".into(),
            title: "PAN scan".into(),
            doc_type: "pan_card".into(),
            tags: Vec::new(),
            stored_path: format!("vault/{id}.pdf"),
            uploaded_at: now_ist(),
            deleted_at: (!live).then(now_ist),
        }
    }

    fn ids(items: &[ChecklistItem]) -> Vec<&str> {
        items.iter().map(|item| item.item_id.as_str()).collect()
    }

    #[test]
    fn missing_required_example() {
        let pack = pack(vec![item("A", "PAN Card", true), item("B", "GST Cert", false)]);
        assert_eq!(missing_required(&pack), vec!["A".to_string()]);
    }

    #[test]
    fn any_evidence_satisfies_an_item() {
        let mut upload = item("U", "Upload", true);
        upload.status = ChecklistStatus::Uploaded;
        upload.file_refs.push(FileRef::Upload {
            path: "u.pdf".into(),
            name: "u.pdf".into(),
        });
        let mut generated = item("G", "Generated", true);
        generated.status = ChecklistStatus::Generated;
        generated.file_refs.push(FileRef::Generated {
            doc_id: "doc-1".into(),
        });
        let mut done = item("D", "Done", true);
        done.status = ChecklistStatus::Done;
        let mapped = item("M", "Mapped", true);
        let mut uploaded_without_file = item("X", "Claimed", true);
        uploaded_without_file.status = ChecklistStatus::Uploaded;

        let mut p = pack(vec![upload, generated, done, mapped, uploaded_without_file]);
        p.attachments.push(AttachmentMapping {
            item_id: "M".into(),
            file_id: "vlt-1".into(),
        });
        assert_eq!(missing_required(&p), vec!["X".to_string()]);
    }

    #[test]
    fn assemble_keeps_contractor_state_and_order() {
        let definition = vec![item("A", "PAN Card", true), item("B", "GST", true)];
        let mut edited = item("B", "GST Registration (edited)", true);
        edited.status = ChecklistStatus::Done;
        edited.notes = "checked".into();
        let existing = vec![item("Z", "Extra", false), edited.clone()];

        let checklist = assemble(&definition, &existing, &[], &[]).unwrap();
        assert_eq!(ids(&checklist), vec!["A", "B", "Z"]);
        assert_eq!(checklist[1], edited);
    }

    #[test]
    fn assemble_maps_vault_files_once() {
        let definition = vec![item("A", "PAN Card", true)];
        let mapping = AttachmentMapping {
            item_id: "A".into(),
            file_id: "vlt-1".into(),
        };
        let checklist = assemble(
            &definition,
            &[],
            &[vault("vlt-1", true)],
            &[mapping.clone(), mapping],
        )
        .unwrap();
        assert_eq!(
            checklist[0].file_refs,
            vec![FileRef::Vault {
                file_id: "vlt-1".into()
            }]
        );
        assert_eq!(checklist[0].status, ChecklistStatus::Pending);
    }

    #[test]
    fn assemble_rejects_bad_mappings() {
        let definition = vec![item("A", "PAN Card", true)];
        let files = [vault("vlt-1", true), vault("vlt-2", false)];
        let map = |item_id: &str, file_id: &str| AttachmentMapping {
            item_id: item_id.into(),
            file_id: file_id.into(),
        };

        assert_eq!(
            assemble(&definition, &[], &files, &[map("Q", "vlt-1")]).unwrap_err(),
            AssembleError::UnknownItem { item_id: "Q".into() }
        );
        assert_eq!(
            assemble(&definition, &[], &files, &[map("A", "vlt-9")]).unwrap_err(),
            AssembleError::UnknownFile { file_id: "vlt-9".into() }
        );
        assert_eq!(
            assemble(&definition, &[], &files, &[map("A", "vlt-2")]).unwrap_err(),
            AssembleError::DeletedFile { file_id: "vlt-2".into() }
        );
    }

    #[test]
    fn merge_items_never_overwrites() {
        let mut mine = item("A", "My PAN", true);
        mine.status = ChecklistStatus::Done;
        let merged = merge_items(&[mine.clone()], &[item("A", "PAN Card", false), item("B", "GST", true)]);
        assert_eq!(ids(&merged), vec!["A", "B"]);
        assert_eq!(merged[0], mine);
    }

    #[test]
    fn official_items_take_over_duplicates_but_keep_evidence() {
        let mut mine = item("my-pan", "PAN  card", false);
        mine.status = ChecklistStatus::Uploaded;
        mine.notes = "self-attested".into();
        mine.file_refs.push(FileRef::Upload {
            path: "pan.pdf".into(),
            name: "pan.pdf".into(),
        });
        let extra = item("misc", "Photo", false);
        let mut official = item("pan-card", "PAN Card", true);
        official.category = "identity".into();

        let result = apply_official(&[mine, extra.clone()], &[official]);
        assert_eq!(ids(&result.checklist), vec!["pan-card", "misc"]);
        let merged = &result.checklist[0];
        assert_eq!(merged.title, "PAN Card");
        assert!(merged.required);
        assert_eq!(merged.source, ItemSource::Official);
        assert_eq!(merged.category, "identity");
        assert_eq!(merged.status, ChecklistStatus::Uploaded);
        assert_eq!(merged.notes, "self-attested");
        assert_eq!(merged.file_refs.len(), 1);
        assert_eq!(result.checklist[1], extra);
        assert_eq!(result.renamed, vec![("my-pan".to_string(), "pan-card".to_string())]);
    }

    #[test]
    fn set_status_defaults_invalid_input_to_pending() {
        let mut checklist = vec![item("A", "PAN", true)];
        assert_eq!(
            set_item_status(&mut checklist, "A", " DONE ").unwrap(),
            ChecklistStatus::Done
        );
        assert_eq!(
            set_item_status(&mut checklist, "A", "approved").unwrap(),
            ChecklistStatus::Pending
        );
        assert_eq!(checklist[0].status, ChecklistStatus::Pending);
        assert!(set_item_status(&mut checklist, "B", "done").is_err());
    }

    #[test]
    fn summary_counts() {
        let mut done = item("A", "PAN", true);
        done.status = ChecklistStatus::Done;
        let p = pack(vec![done, item("B", "GST", true), item("C", "Photo", false)]);
        let summary = summarize(&p);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.required, 2);
        assert_eq!(summary.done, 1);
        assert_eq!(summary.satisfied, 1);
        assert_eq!(summary.missing_required, vec!["B".to_string()]);
        assert_eq!(summary.progress_percent, 33);
        assert_eq!(summarize(&pack(Vec::new())).progress_percent, 100);
    }

    #[test]
    fn seeds_checklist_and_annexures_from_tender() {
        let extracted = ExtractedFields {
            tender_fee: "Rs. 500".into(),
            eligibility_docs: vec![
                "PAN Card".into(),
                "GST Registration".into(),
                "pan card".into(),
                "  ".into(),
            ],
            annexures: vec![
                "Annexure-A: Affidavit".into(),
                "Annexure-C: Schedule of Rates".into(),
                "Undertaking".into(),
            ],
            ..ExtractedFields::default()
        };
        let checklist = seed_checklist_from_tender(&extracted);
        assert_eq!(
            ids(&checklist),
            vec!["covering-letter", "tender-fee", "pan-card", "gst-registration"]
        );
        assert_eq!(checklist[2].source, ItemSource::Official);
        assert_eq!(checklist[0].source, ItemSource::Fixed);

        let annexures = seed_annexures(&extracted);
        assert_eq!(annexures.len(), 3);
        assert_eq!(annexures[0].code, "Annexure-A");
        assert_eq!(annexures[0].title, "Affidavit");
        assert!(!annexures[0].restricted);
        assert!(annexures[1].restricted);
        assert_eq!(annexures[2].code, "");
        assert_eq!(annexures[2].annexure_id, "anx-3");
    }
}

//! End-to-end runs of the document pipeline: registry, resolver, fill,
//! assembler and composer wired together the way the service does it.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use tender_core::entities::{
    Annexure, ChecklistItem, ContractorProfile, FileRef, GeneratedDoc, Pack, PackSource,
    PrintPrefs, PrintSettings, ProfileMemory, ProfileMemoryEntry, TableColumn, TableRow,
    Template, TemplateTable,
};
use tender_core::enums::{
    BodyFormat, ChecklistStatus, DocSelector, FieldType, MemorySource, PackStatus, TemplateScope,
};
use tender_core::time::now_ist;
use tender_docs::assemble::{assemble, missing_required, set_item_status};
use tender_docs::compose::{ComposeOptions, compose};
use tender_docs::fill::{FillOptions, fill};
use tender_docs::registry::{ContextBundle, FieldRegistry};
use tender_docs::resolver::{ValueSource, required_keys_for, resolve};

fn empty_pack(checklist: Vec<ChecklistItem>) -> Pack {
    Pack {
        pack_id: "pck-1".into(),
        owner_yoj_id: "YOJ1".into(),
        title: "Culvert repair".into(),
        source: PackSource::Manual,
        items: Vec::new(),
        checklist,
        attachments: Vec::new(),
        generated_docs: Vec::new(),
        generated_templates: Vec::new(),
        annexure_list: Vec::new(),
        print_prefs: PrintPrefs::default(),
        status: PackStatus::Draft,
        created_at: now_ist(),
        updated_at: now_ist(),
    }
}

fn template(body: &str, tables: Vec<TemplateTable>) -> Template {
    Template {
        id: "tpl-1".into(),
        scope: TemplateScope::Global,
        owner_yoj_id: None,
        title: "Letter".into(),
        category: "letters".into(),
        description: String::new(),
        body: body.into(),
        format: BodyFormat::Text,
        tables,
        created_at: now_ist(),
        updated_at: now_ist(),
    }
}

fn remembered(key: &str, value: &str) -> ProfileMemoryEntry {
    ProfileMemoryEntry {
        key: key.into(),
        value: value.into(),
        label: String::new(),
        field_type: FieldType::Text,
        updated_at: now_ist(),
        source: MemorySource::Document,
    }
}

#[test]
fn missing_required_scenario() {
    let pack = empty_pack(vec![
        ChecklistItem::new("A", "PAN Card", true),
        ChecklistItem::new("B", "GST Cert", false),
    ]);
    assert_eq!(missing_required(&pack), vec!["A".to_string()]);
}

#[test]
fn dear_department_scenario() {
    let tpl = template("Dear {{dept}}, Firm: {{firm.name}}", Vec::new());
    let registry = FieldRegistry::standard();
    let overrides = BTreeMap::from([("dept".to_string(), "PWD".to_string())]);
    let keys = required_keys_for(&tpl);

    let resolution = resolve(
        &ContractorProfile::new("YOJ1"),
        &ProfileMemory::new("YOJ1"),
        &overrides,
        &keys,
        &registry,
    );
    assert_eq!(resolution.missing, vec!["firm.name".to_string()]);

    let filled = fill(
        &tpl.body,
        &resolution.values,
        &BTreeMap::new(),
        &tpl.tables,
        &FillOptions::text(),
    );
    assert_eq!(filled.body, "Dear PWD, Firm: __________");
    assert_eq!(filled.missing, vec!["firm.name".to_string()]);
}

#[test]
fn resolver_layers_and_missing_list_agree() {
    let mut profile = ContractorProfile::new("YOJ1");
    profile.firm_name = "Profile Firm".into();
    profile.tax.pan = "ABCDE1234F".into();
    let mut memory = ProfileMemory::new("YOJ1");
    memory.upsert(remembered("firm.name", "Remembered Firm"));
    memory.upsert(remembered("tax.gst", "   "));
    let overrides = BTreeMap::from([
        ("firm.name".to_string(), "   ".to_string()),
        ("tax.pan".to_string(), "ZZZZZ9999Z".to_string()),
    ]);

    let mut tender = tender_core::entities::TenderRecord {
        id: "tnd-1".into(),
        kind: tender_core::entities::TenderKind::OfflineTender,
        owner_yoj_id: "YOJ1".into(),
        title: "Road".into(),
        source_file: None,
        extracted: tender_core::entities::ExtractedFields::default(),
        status: tender_core::enums::TenderStatus::Draft,
        created_at: now_ist(),
        updated_at: now_ist(),
    };
    tender.extracted.department = "Public Works".into();
    let registry = FieldRegistry::build(&[ContextBundle::from_tender(&tender)]);

    let keys: Vec<String> = ["firm.name", "tax.pan", "tax.gst", "dept", "firm.city"]
        .into_iter()
        .map(String::from)
        .collect();
    let resolution = resolve(&profile, &memory, &overrides, &keys, &registry);

    assert_eq!(resolution.values["firm.name"], "Remembered Firm");
    assert_eq!(resolution.sources["firm.name"], ValueSource::Memory);
    assert_eq!(resolution.values["tax.pan"], "ZZZZZ9999Z");
    assert_eq!(resolution.values["dept"], "Public Works");
    assert_eq!(resolution.sources["dept"], ValueSource::Context);

    let blanks: Vec<String> = keys
        .iter()
        .filter(|key| resolution.values[key.as_str()].trim().is_empty())
        .cloned()
        .collect();
    assert_eq!(resolution.missing, blanks);
    assert_eq!(blanks, vec!["tax.gst".to_string(), "firm.city".to_string()]);
}

#[test]
fn filled_table_lists_every_row_in_order() {
    let table = TemplateTable {
        key: "items".into(),
        title: "Works".into(),
        columns: vec![
            TableColumn::new("sno", "S.No."),
            TableColumn::new("description", "Description"),
        ],
        row_template: Some("[{{sno}}] {{description}}".into()),
    };
    let tpl = template("Works:\n{{table:items}}", vec![table]);
    let rows: Vec<TableRow> = ["earthwork", "culvert", "painting"]
        .into_iter()
        .map(|d| TableRow::from([("description".to_string(), d.to_string())]))
        .collect();
    let tables = BTreeMap::from([("items".to_string(), rows)]);

    let filled = fill(&tpl.body, &BTreeMap::new(), &tables, &tpl.tables, &FillOptions::text());
    let first = filled.body.find("[1] earthwork").unwrap();
    let second = filled.body.find("[2] culvert").unwrap();
    let third = filled.body.find("[3] painting").unwrap();
    assert!(first < second && second < third);
    assert!(filled.missing.is_empty());
}

#[test]
fn done_or_evidenced_items_are_never_missing() {
    let statuses = [
        ChecklistStatus::Pending,
        ChecklistStatus::Uploaded,
        ChecklistStatus::Generated,
        ChecklistStatus::Done,
    ];
    let mut checklist = Vec::new();
    for (i, status) in statuses.iter().enumerate() {
        for with_ref in [false, true] {
            let mut item = ChecklistItem::new(format!("i{i}-{with_ref}"), "Doc", true);
            item.status = *status;
            if with_ref {
                item.file_refs.push(FileRef::Generated {
                    doc_id: format!("doc-{i}"),
                });
            }
            checklist.push(item);
        }
    }
    let pack = empty_pack(checklist);
    let missing = missing_required(&pack);
    for item in &pack.checklist {
        let satisfied = item.status == ChecklistStatus::Done || !item.file_refs.is_empty();
        assert_eq!(missing.contains(&item.item_id), !satisfied, "{}", item.item_id);
    }
}

#[test]
fn assembled_pack_prints_without_pricing_content() {
    let definition = vec![
        ChecklistItem::new("cover", "Covering Letter", true),
        ChecklistItem::new("pan", "PAN Card", true),
    ];
    let mut pack = empty_pack(assemble(&definition, &[], &[], &[]).unwrap());
    set_item_status(&mut pack.checklist, "cover", "generated").unwrap();
    pack.checklist[0].file_refs.push(FileRef::Generated {
        doc_id: "doc-1".into(),
    });
    pack.annexure_list.push(Annexure {
        annexure_id: "anx-1".into(),
        code: "Annexure-C".into(),
        title: "Schedule of Rates".into(),
        template_id: Some("tpl-9".into()),
        restricted: false,
    });
    pack.generated_docs.push(GeneratedDoc {
        doc_id: "doc-9".into(),
        template_id: "tpl-9".into(),
        title: "Schedule of Rates".into(),
        annexure_id: Some("anx-1".into()),
        body: "Item 1 @ Rs 450/cum".into(),
        format: BodyFormat::Text,
        missing: Vec::new(),
        generated_at: now_ist(),
    });

    let options = ComposeOptions::new(now_ist(), PrintSettings::new("YOJ1"));
    let doc = compose(&pack, &ContractorProfile::new("YOJ1"), DocSelector::Full, &options);

    let all_html: String = doc.sections.iter().map(|s| s.html.as_str()).collect();
    assert!(!all_html.contains("Rs 450"));
    assert!(all_html.contains("restricted-warning"));
    assert_eq!(missing_required(&pack), vec!["pan".to_string()]);
}

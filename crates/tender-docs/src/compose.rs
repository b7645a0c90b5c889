//! Print/export composer.
//!
//! Turns a pack into an ordered list of self-contained HTML sections. Every
//! section carries its own letterhead (or the reserved blank space) so a
//! renderer can paginate sections independently.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;
use tender_core::entities::{Annexure, ContractorProfile, GeneratedDoc, Pack, PrintSettings};
use tender_core::enums::{BodyFormat, DocSelector, Orientation, PageSize, SectionKind};
use tender_core::time::{Timestamp, display_date};

use crate::assemble::{is_item_satisfied, missing_required};
use crate::html;
use crate::render::DocumentRenderer;
use crate::restricted::{is_restricted, restricted_notice};

/// Section title -> first page number.
pub type PageMap = BTreeMap<String, u32>;

/// Section key -> first page number. Keys stay unique when titles repeat.
pub type SectionPages = BTreeMap<String, u32>;

/// Printed in the index when a section's page is not known.
pub const UNKNOWN_PAGE: &str = "—";

const INDEX_TITLE: &str = "Index";
const CHECKLIST_TITLE: &str = "Document Checklist";
const INDEX_KEY: &str = "index";
const CHECKLIST_KEY: &str = "checklist";

#[derive(Debug, Clone)]
pub struct ComposeOptions {
    pub printed_at: Timestamp,
    pub print_settings: PrintSettings,
    pub page_map: PageMap,
    /// Takes precedence over `page_map` for the index.
    pub section_pages: SectionPages,
}

impl ComposeOptions {
    #[must_use]
    pub fn new(printed_at: Timestamp, print_settings: PrintSettings) -> Self {
        Self {
            printed_at,
            print_settings,
            page_map: PageMap::new(),
            section_pages: SectionPages::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    /// `index`, `checklist`, `annexure:<id>` or `doc:<id>`.
    pub key: String,
    pub title: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedDocument {
    pub sections: Vec<Section>,
    /// Titles of the non-index sections, in print order.
    pub toc_entries: Vec<String>,
    pub printed_at: Timestamp,
    pub page_size: PageSize,
    pub orientation: Orientation,
}

/// Title and body (without letterhead) of one section.
struct Draft {
    kind: SectionKind,
    key: String,
    title: String,
    body: String,
}

/// Compose the sections `selector` asks for.
///
/// `full` prints index, checklist, annexures and templates in that order.
/// The index always lists the whole pack so it can be printed on its own.
#[must_use]
pub fn compose(
    pack: &Pack,
    contractor: &ContractorProfile,
    selector: DocSelector,
    options: &ComposeOptions,
) -> ComposedDocument {
    let contents = content_drafts(pack, DocSelector::Full.section_kinds());
    let pack_toc: Vec<(&str, &str)> = contents
        .iter()
        .map(|draft| (draft.key.as_str(), draft.title.as_str()))
        .collect();

    let mut drafts = Vec::new();
    for kind in selector.section_kinds() {
        if *kind == SectionKind::Index {
            drafts.push(Draft {
                kind: SectionKind::Index,
                key: INDEX_KEY.to_string(),
                title: INDEX_TITLE.to_string(),
                body: index_body(pack, contractor, &pack_toc, options),
            });
        } else {
            drafts.extend(
                contents
                    .iter()
                    .filter(|draft| draft.kind == *kind)
                    .map(|draft| Draft {
                        kind: draft.kind,
                        key: draft.key.clone(),
                        title: draft.title.clone(),
                        body: draft.body.clone(),
                    }),
            );
        }
    }

    let show_letterhead = pack.print_prefs.include_letterhead && options.print_settings.letterhead_enabled;
    let sections: Vec<Section> = drafts
        .into_iter()
        .map(|draft| Section {
            html: wrap_section(&draft, &options.print_settings, show_letterhead),
            kind: draft.kind,
            key: draft.key,
            title: draft.title,
        })
        .collect();
    let toc_entries = sections
        .iter()
        .filter(|section| section.kind != SectionKind::Index)
        .map(|section| section.title.clone())
        .collect();

    ComposedDocument {
        sections,
        toc_entries,
        printed_at: options.printed_at,
        page_size: pack.print_prefs.page_size,
        orientation: pack.print_prefs.orientation,
    }
}

/// Pair TOC titles with the start pages a renderer reported for them.
///
/// Extra titles or pages are ignored. A repeated title keeps the page of its
/// first occurrence; use [`SectionPages`] to number every section.
#[must_use]
pub fn build_page_map(toc: &[String], start_pages: &[u32]) -> PageMap {
    let mut map = PageMap::new();
    for (title, page) in toc.iter().zip(start_pages.iter().copied()) {
        map.entry(title.clone()).or_insert(page);
    }
    map
}

/// Compose twice: once to learn where sections start, once with the page
/// numbers printed in the index.
#[must_use]
pub fn compose_with_page_map(
    pack: &Pack,
    contractor: &ContractorProfile,
    selector: DocSelector,
    options: &ComposeOptions,
    renderer: &dyn DocumentRenderer,
) -> ComposedDocument {
    let first = compose(pack, contractor, selector, options);
    let starts = renderer.start_pages(&first);
    let numbered_sections: Vec<(&Section, u32)> = first
        .sections
        .iter()
        .zip(starts)
        .filter(|(section, _)| section.kind != SectionKind::Index)
        .collect();
    let (titles, pages): (Vec<String>, Vec<u32>) = numbered_sections
        .iter()
        .map(|(section, page)| (section.title.clone(), *page))
        .unzip();

    let mut numbered = options.clone();
    numbered.page_map = build_page_map(&titles, &pages);
    numbered.section_pages = numbered_sections
        .iter()
        .map(|(section, page)| (section.key.clone(), *page))
        .collect();
    compose(pack, contractor, selector, &numbered)
}

fn content_drafts(pack: &Pack, kinds: &[SectionKind]) -> Vec<Draft> {
    let mut drafts = Vec::new();
    for kind in kinds {
        match kind {
            SectionKind::Index => {}
            SectionKind::Checklist => drafts.push(Draft {
                kind: SectionKind::Checklist,
                key: CHECKLIST_KEY.to_string(),
                title: CHECKLIST_TITLE.to_string(),
                body: checklist_body(pack),
            }),
            SectionKind::Annexure => {
                drafts.extend(pack.annexure_list.iter().map(|annexure| Draft {
                    kind: SectionKind::Annexure,
                    key: format!("annexure:{}", annexure.annexure_id),
                    title: annexure_label(annexure),
                    body: annexure_body(pack, annexure),
                }));
            }
            SectionKind::Template => {
                drafts.extend(
                    pack.generated_docs
                        .iter()
                        .filter(|doc| doc.annexure_id.is_none())
                        .map(|doc| Draft {
                            kind: SectionKind::Template,
                            key: format!("doc:{}", doc.doc_id),
                            title: doc.title.clone(),
                            body: if is_restricted(&doc.title) {
                                restricted_notice(&doc.title)
                            } else {
                                doc_body(doc)
                            },
                        }),
                );
            }
        }
    }
    drafts
}

fn annexure_label(annexure: &Annexure) -> String {
    if annexure.code.trim().is_empty() {
        annexure.title.clone()
    } else {
        format!("{}: {}", annexure.code.trim(), annexure.title)
    }
}

fn annexure_body(pack: &Pack, annexure: &Annexure) -> String {
    let label = annexure_label(annexure);
    if annexure.restricted || is_restricted(&label) {
        return restricted_notice(&label);
    }
    pack.generated_docs
        .iter()
        .find(|doc| doc.annexure_id.as_deref() == Some(annexure.annexure_id.as_str()))
        .map_or_else(
            || "<p class=\"placeholder\">Not generated yet. Attach the completed format.</p>".to_string(),
            doc_body,
        )
}

fn doc_body(doc: &GeneratedDoc) -> String {
    match doc.format {
        BodyFormat::Html => doc.body.clone(),
        BodyFormat::Text => format!("<div class=\"doc-text\">{}</div>", html::text_to_html(&doc.body)),
    }
}

fn index_body(
    pack: &Pack,
    contractor: &ContractorProfile,
    toc: &[(&str, &str)],
    options: &ComposeOptions,
) -> String {
    let mut out = String::from("<div class=\"cover\">");
    if !contractor.firm_name.trim().is_empty() {
        let _ = write!(out, "<h1>{}</h1>", html::escape(&contractor.firm_name));
    }
    let address = contractor.address.one_line();
    if !address.is_empty() {
        let _ = write!(out, "<p class=\"address\">{}</p>", html::escape(&address));
    }
    let _ = write!(
        out,
        "<p class=\"pack-title\">{}</p><p class=\"printed-at\">Printed on {}</p></div>",
        html::escape(&pack.title),
        display_date(&options.printed_at)
    );

    out.push_str("<table class=\"toc\"><thead><tr><th>S.No.</th><th>Particulars</th><th>Page No.</th></tr></thead><tbody>");
    for (index, (key, title)) in toc.iter().enumerate() {
        let page = options
            .section_pages
            .get(*key)
            .or_else(|| options.page_map.get(*title))
            .map_or_else(|| UNKNOWN_PAGE.to_string(), u32::to_string);
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{page}</td></tr>",
            index + 1,
            html::escape(title)
        );
    }
    out.push_str("</tbody></table>");
    out
}

fn checklist_body(pack: &Pack) -> String {
    let with_notes = pack.print_prefs.include_checklist_notes;
    let mut out = String::from(
        "<table class=\"checklist\"><thead><tr><th>S.No.</th><th>Document</th><th>Required</th><th>Status</th><th>Attached</th>",
    );
    if with_notes {
        out.push_str("<th>Notes</th>");
    }
    out.push_str("</tr></thead><tbody>");

    for (index, item) in pack.checklist.iter().enumerate() {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
            index + 1,
            html::escape(&item.title),
            if item.required { "Yes" } else { "No" },
            item.status,
            if is_item_satisfied(pack, item) { "Yes" } else { "No" },
        );
        if with_notes {
            let _ = write!(out, "<td>{}</td>", html::text_to_html(&item.notes));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");

    let missing = missing_required(pack);
    if !missing.is_empty() {
        let _ = write!(
            out,
            "<p class=\"missing\">{} required document(s) still missing.</p>",
            missing.len()
        );
    }
    out
}

fn wrap_section(draft: &Draft, settings: &PrintSettings, show_letterhead: bool) -> String {
    let header = if show_letterhead {
        format!(
            "<header class=\"letterhead\" style=\"height:{}mm\">{}</header>",
            settings.header_height_mm, settings.header_html
        )
    } else {
        format!(
            "<div class=\"letterhead-space\" style=\"height:{}mm\"></div>",
            settings.header_height_mm
        )
    };
    let footer = if show_letterhead {
        format!(
            "<footer class=\"letterhead\" style=\"height:{}mm\">{}</footer>",
            settings.footer_height_mm, settings.footer_html
        )
    } else {
        format!(
            "<div class=\"letterhead-space\" style=\"height:{}mm\"></div>",
            settings.footer_height_mm
        )
    };
    format!(
        "<section class=\"pack-section section-{kind}\">{header}<h2>{title}</h2><div class=\"section-body\">{body}</div>{footer}</section>",
        kind = draft.kind,
        title = html::escape(&draft.title),
        body = draft.body,
    )
}

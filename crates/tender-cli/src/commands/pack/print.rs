use std::io::Write as _;

use anyhow::Context;
use tender_core::enums::{DocSelector, Orientation, PageSize};
use tender_core::identity::RequestContext;
use tender_core::responses::Flash;
use tender_docs::render::BrowserPrintRenderer;
use tender_store::updates::pack::PrintPrefsUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

/// Compose and render a pack. Without `--out` the page goes to stdout.
pub fn run(
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
    pack_id: &str,
    select: &str,
    out: Option<&str>,
) -> anyhow::Result<()> {
    let selector: DocSelector = parse_enum(select, "selection")?;
    let printed = app
        .service
        .print_pack(ctx, pack_id, selector, &BrowserPrintRenderer)?;

    let Some(path) = out else {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(printed.rendered.as_bytes())
            .context("failed to write to stdout")?;
        return Ok(());
    };

    std::fs::write(path, printed.rendered.as_bytes())
        .with_context(|| format!("failed to write {path}"))?;
    let sections = printed
        .document
        .sections
        .iter()
        .map(|section| section.title.as_str())
        .collect::<Vec<_>>();
    respond(
        &serde_json::json!({
            "pack_id": pack_id,
            "selection": selector,
            "out": path,
            "sections": sections,
            "printed_at": printed.document.printed_at,
        }),
        Some(Flash::success(format!("Wrote {path}."))),
        flags,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn prefs(
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
    pack_id: &str,
    page_size: Option<&str>,
    orientation: Option<&str>,
    letterhead: Option<bool>,
    checklist_notes: Option<bool>,
) -> anyhow::Result<()> {
    let mut builder = PrintPrefsUpdateBuilder::new();
    if let Some(raw) = page_size {
        builder = builder.page_size(parse_enum::<PageSize>(raw, "page size")?);
    }
    if let Some(raw) = orientation {
        builder = builder.orientation(parse_enum::<Orientation>(raw, "orientation")?);
    }
    if let Some(enabled) = letterhead {
        builder = builder.include_letterhead(enabled);
    }
    if let Some(enabled) = checklist_notes {
        builder = builder.include_checklist_notes(enabled);
    }
    let pack = app.service.update_print_prefs(ctx, pack_id, &builder.build())?;
    respond(&pack.print_prefs, Some(Flash::success("Print preferences saved.")), flags)
}

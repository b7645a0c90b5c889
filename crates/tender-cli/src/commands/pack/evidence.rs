use std::path::Path;

use tender_core::entities::ChecklistItem;
use tender_core::identity::RequestContext;
use tender_core::responses::Flash;

use crate::cli::GlobalFlags;
use crate::commands::shared::input::read_json;
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

#[allow(clippy::too_many_arguments)]
pub fn add_item(
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
    pack_id: &str,
    title: &str,
    item_id: Option<&str>,
    category: Option<&str>,
    optional: bool,
) -> anyhow::Result<()> {
    let mut item = ChecklistItem::new(item_id.unwrap_or_default(), title, !optional);
    item.category = category.unwrap_or_default().to_string();
    let item = app.service.add_checklist_item(ctx, pack_id, item)?;
    respond(&item, Some(Flash::success("Checklist item added.")), flags)
}

pub fn attach(
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
    pack_id: &str,
    item_id: &str,
    file_id: &str,
) -> anyhow::Result<()> {
    let pack = app.service.attach_vault(ctx, pack_id, item_id, file_id)?;
    let item = pack.checklist.iter().find(|item| item.item_id == item_id);
    respond(&item, Some(Flash::success("Vault file attached.")), flags)
}

pub fn upload(
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
    pack_id: &str,
    item_id: &str,
    path: &str,
    name: Option<&str>,
) -> anyhow::Result<()> {
    let name = name.map_or_else(|| file_name(path), str::to_string);
    let item = app.service.record_upload(ctx, pack_id, item_id, path, &name)?;
    respond(&item, Some(Flash::success("Upload recorded.")), flags)
}

pub fn official(
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
    pack_id: &str,
    file: &str,
) -> anyhow::Result<()> {
    let official: Vec<ChecklistItem> = read_json(file)?;
    if official.is_empty() {
        anyhow::bail!("{file} lists no checklist items");
    }
    let pack = app.service.apply_official_checklist(ctx, pack_id, &official)?;
    respond(
        &pack.checklist,
        Some(Flash::success("Official checklist applied.")),
        flags,
    )
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |name| name.to_string_lossy().into_owned())
}

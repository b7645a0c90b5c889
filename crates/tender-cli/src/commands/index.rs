use tender_core::identity::RequestContext;
use tender_core::responses::Flash;
use tender_store::Collection;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::IndexCommands;
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

fn collection(raw: &str) -> anyhow::Result<Collection> {
    Collection::parse(raw).ok_or_else(|| {
        let names = Collection::ALL.map(Collection::as_str).join(", ");
        anyhow::anyhow!("unknown collection '{raw}' (expected one of: {names})")
    })
}

/// Handle `tndr index`.
pub fn handle(
    action: &IndexCommands,
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        IndexCommands::Check { collection: raw } => {
            let drift = app.service.check_index(ctx, collection(raw)?)?;
            let flash = if drift.is_empty() {
                Flash::success(format!("{raw} index is consistent."))
            } else {
                Flash::warning(format!(
                    "{} problem(s) in the {raw} index; run `tndr index rebuild {raw}`.",
                    drift.len()
                ))
            };
            respond(&drift, Some(flash), flags)
        }
        IndexCommands::Rebuild { collection: raw } => {
            let count = app.service.rebuild_index(ctx, collection(raw)?)?;
            respond(
                &serde_json::json!({ "collection": raw, "entries": count }),
                Some(Flash::success(format!("Rebuilt the {raw} index."))),
                flags,
            )
        }
    }
}

mod evidence;
mod generate;
mod print;

use tender_core::enums::PackStatus;
use tender_core::identity::RequestContext;
use tender_core::responses::Flash;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PackCommands;
use crate::commands::shared::parse::{parse_enum, tender_kind};
use crate::commands::shared::respond::{limited, respond};
use crate::context::AppContext;

/// Handle `tndr pack`.
pub fn handle(
    action: &PackCommands,
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PackCommands::Create { title, from, kind } => {
            let pack = match (from, title) {
                (Some(tender_id), _) => {
                    app.service
                        .create_pack_from_tender(ctx, tender_kind(*kind), tender_id)?
                }
                (None, Some(title)) => app.service.create_pack(ctx, title)?,
                (None, None) => anyhow::bail!("pass --title or --from"),
            };
            respond(&pack, Some(Flash::success("Pack created.")), flags)
        }
        PackCommands::List { archived } => {
            let entries = app.service.list_packs(ctx, *archived)?;
            respond(&limited(entries, app.limit(flags.limit)), None, flags)
        }
        PackCommands::Show { id } => respond(&app.service.get_pack(ctx, id)?, None, flags),
        PackCommands::Status { id, status, item } => match item {
            Some(item_id) => {
                let status = app.service.set_checklist_status(ctx, id, item_id, status)?;
                respond(
                    &serde_json::json!({ "pack_id": id, "item_id": item_id, "status": status }),
                    Some(Flash::success(format!("{item_id} is now {status}."))),
                    flags,
                )
            }
            None => {
                let status: PackStatus = parse_enum(status, "pack status")?;
                let pack = app.service.set_pack_status(ctx, id, status)?;
                respond(&pack, Some(Flash::success(format!("Pack is now {status}."))), flags)
            }
        },
        PackCommands::Item {
            id,
            title,
            item_id,
            category,
            optional,
        } => evidence::add_item(app, ctx, flags, id, title, item_id.as_deref(), category.as_deref(), *optional),
        PackCommands::Annexure { id, label } => {
            let annexure = app.service.add_annexure(ctx, id, label)?;
            let flash = if annexure.restricted {
                Flash::warning(format!(
                    "{label} is a pricing format; attach the department's original, it will not be generated."
                ))
            } else {
                Flash::success("Annexure added.")
            };
            respond(&annexure, Some(flash), flags)
        }
        PackCommands::Attach { id, item, file } => evidence::attach(app, ctx, flags, id, item, file),
        PackCommands::Upload {
            id,
            item,
            path,
            name,
        } => evidence::upload(app, ctx, flags, id, item, path, name.as_deref()),
        PackCommands::Official { id, file } => evidence::official(app, ctx, flags, id, file),
        PackCommands::Missing { id } => respond(&app.service.pack_missing(ctx, id)?, None, flags),
        PackCommands::Summary { id } => respond(&app.service.pack_summary(ctx, id)?, None, flags),
        PackCommands::Suggest { id } => {
            let suggestions = app.service.suggest_for_pack(ctx, id)?;
            respond(&limited(suggestions, app.limit(flags.limit)), None, flags)
        }
        PackCommands::Generate(args) => generate::run(app, ctx, flags, args),
        PackCommands::Prefs {
            id,
            page_size,
            orientation,
            letterhead,
            checklist_notes,
        } => print::prefs(
            app,
            ctx,
            flags,
            id,
            page_size.as_deref(),
            orientation.as_deref(),
            *letterhead,
            *checklist_notes,
        ),
        PackCommands::Print { id, select, out } => print::run(app, ctx, flags, id, select, out.as_deref()),
        PackCommands::Archive { id } => {
            let pack = app.service.archive_pack(ctx, id)?;
            respond(&pack, Some(Flash::success("Pack archived.")), flags)
        }
    }
}

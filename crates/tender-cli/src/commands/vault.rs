use tender_core::identity::RequestContext;
use tender_core::responses::Flash;
use tender_store::repos::vault::NewVaultFile;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::VaultCommands;
use crate::commands::shared::respond::{limited, respond};
use crate::context::AppContext;

/// Handle `tndr vault`.
pub fn handle(
    action: &VaultCommands,
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        VaultCommands::Add {
            title,
            doc_type,
            tags,
            path,
        } => {
            let file = app.service.add_vault_file(
                ctx,
                NewVaultFile {
                    title: title.clone(),
                    doc_type: doc_type.clone().unwrap_or_default(),
                    tags: tags.clone(),
                    stored_path: path.clone(),
                },
            )?;
            respond(&file, Some(Flash::success("Added to vault.")), flags)
        }
        VaultCommands::List { deleted } => {
            let files = app.service.list_vault(ctx, *deleted)?;
            respond(&limited(files, app.limit(flags.limit)), None, flags)
        }
        VaultCommands::Delete { id } => {
            let file = app.service.delete_vault_file(ctx, id)?;
            respond(&file, Some(Flash::success("Removed from vault.")), flags)
        }
    }
}

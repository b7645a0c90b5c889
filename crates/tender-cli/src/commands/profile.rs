use tender_core::identity::RequestContext;
use tender_core::responses::Flash;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProfileCommands;
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

/// Handle `tndr profile`.
pub fn handle(
    action: &ProfileCommands,
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProfileCommands::Show => respond(&app.service.get_profile(ctx)?, None, flags),
        ProfileCommands::Set { key, value } => {
            let profile = app.service.set_profile_field(ctx, key, value)?;
            respond(&profile, Some(Flash::success(format!("Saved {key}."))), flags)
        }
    }
}

use tender_core::enums::MemorySource;
use tender_core::identity::RequestContext;
use tender_core::responses::Flash;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::MemoryCommands;
use crate::commands::shared::respond::{limited, respond};
use crate::context::AppContext;

/// Handle `tndr memory`.
pub fn handle(
    action: &MemoryCommands,
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        MemoryCommands::List => {
            let entries = app.service.list_memory(ctx)?;
            respond(&limited(entries, app.limit(flags.limit)), None, flags)
        }
        MemoryCommands::Save { key, value } => {
            let entry = app.service.remember(ctx, key, value, MemorySource::Manual)?;
            respond(&entry, Some(Flash::success(format!("Remembered {key}."))), flags)
        }
        MemoryCommands::Delete { key } => {
            let entry = app.service.forget(ctx, key)?;
            respond(&entry, Some(Flash::success(format!("Forgot {key}."))), flags)
        }
    }
}

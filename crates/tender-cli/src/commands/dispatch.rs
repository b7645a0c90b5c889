use tender_core::identity::RequestContext;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Profile { action } => commands::profile::handle(&action, app, ctx, flags),
        Commands::Memory { action } => commands::memory::handle(&action, app, ctx, flags),
        Commands::Field { action } => commands::field::handle(&action, app, ctx, flags),
        Commands::Template { action } => commands::template::handle(&action, app, ctx, flags),
        Commands::Tender { action } => commands::tender::handle(&action, app, ctx, flags).await,
        Commands::Pack { action } => commands::pack::handle(&action, app, ctx, flags),
        Commands::Vault { action } => commands::vault::handle(&action, app, ctx, flags),
        Commands::PrintSettings { action } => {
            commands::print_settings::handle(&action, app, ctx, flags)
        }
        Commands::Index { action } => commands::index::handle(&action, app, ctx, flags),
        Commands::Init(_) | Commands::Schema(_) => {
            anyhow::bail!("init and schema run before a project is opened")
        }
    }
}

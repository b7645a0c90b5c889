use tender_core::identity::RequestContext;
use tender_docs::registry::{ContextBundle, FieldRegistry};
use tender_docs::resolver::resolve;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FieldCommands;
use crate::commands::shared::input::fill_values;
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

/// Handle `tndr field`.
pub fn handle(
    action: &FieldCommands,
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        FieldCommands::List => {
            let specs = FieldRegistry::standard().fields().values().cloned().collect::<Vec<_>>();
            respond(&specs, None, flags)
        }
        FieldCommands::Resolve { keys, values } => {
            let (overrides, _) = fill_values(values)?;
            let registry = FieldRegistry::build(&[ContextBundle::for_request(&ctx.now)]);
            for (key, value) in &overrides {
                registry.validate_value(key, value)?;
            }
            let profile = app.service.get_profile(ctx)?;
            let memory = app.service.get_memory(ctx)?;
            let resolution = resolve(&profile, &memory, &overrides, keys, &registry);
            respond(&resolution, None, flags)
        }
    }
}

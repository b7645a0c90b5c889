use tender_core::identity::RequestContext;
use tender_core::responses::Flash;
use tender_store::repos::pack::GenerateRequest;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::GenerateArgs;
use crate::commands::shared::input::fill_values;
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

pub fn run(
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
    args: &GenerateArgs,
) -> anyhow::Result<()> {
    let (overrides, tables) = fill_values(&args.values)?;
    let request = GenerateRequest {
        annexure_id: args.annexure.clone(),
        item_id: args.item.clone(),
        overrides,
        tables,
        save_for_future: args.save_for_future,
        ..GenerateRequest::new(&args.template)
    };
    let generation = app.service.generate_document(ctx, &args.pack_id, &request)?;

    let flash = if generation.doc.missing.is_empty() {
        Flash::success(format!("Generated {}.", generation.doc.title))
    } else {
        Flash::warning(format!(
            "Generated {} with blanks: {}",
            generation.doc.title,
            generation.doc.missing.join(", ")
        ))
    };
    respond(&generation, Some(flash), flags)
}

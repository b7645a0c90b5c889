use tender_core::identity::RequestContext;
use tender_core::responses::Flash;
use tender_store::updates::print_settings::PrintSettingsUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PrintSettingsCommands;
use crate::commands::shared::respond::respond;
use crate::context::AppContext;

/// Handle `tndr print-settings`.
pub fn handle(
    action: &PrintSettingsCommands,
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PrintSettingsCommands::Show => respond(&app.service.get_print_settings(ctx)?, None, flags),
        PrintSettingsCommands::Set {
            letterhead,
            header_html,
            footer_html,
            header_mm,
            footer_mm,
        } => {
            let mut builder = PrintSettingsUpdateBuilder::new();
            if let Some(enabled) = letterhead {
                builder = builder.letterhead_enabled(*enabled);
            }
            if let Some(html) = header_html {
                builder = builder.header_html(html);
            }
            if let Some(html) = footer_html {
                builder = builder.footer_html(html);
            }
            if let Some(mm) = header_mm {
                builder = builder.header_height_mm(*mm);
            }
            if let Some(mm) = footer_mm {
                builder = builder.footer_height_mm(*mm);
            }
            let settings = app.service.save_print_settings(ctx, &builder.build())?;
            respond(&settings, Some(Flash::success("Print settings saved.")), flags)
        }
    }
}

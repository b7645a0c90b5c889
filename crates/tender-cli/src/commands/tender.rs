use tender_core::errors::ErrorKind;
use tender_core::identity::RequestContext;
use tender_core::responses::{Flash, FlashLevel};
use tender_extract::HttpExtractor;
use tender_store::updates::tender::{TenderUpdate, TenderUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TenderCommands;
use crate::commands::shared::input::read_text;
use crate::commands::shared::parse::{parse_assignments, tender_kind};
use crate::commands::shared::respond::{limited, respond};
use crate::context::AppContext;

/// Handle `tndr tender`.
pub async fn handle(
    action: &TenderCommands,
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TenderCommands::Create {
            title,
            source_file,
            kind,
        } => {
            let record = app
                .service
                .create_tender(ctx, tender_kind(*kind), title, source_file.clone())?;
            respond(&record, Some(Flash::success("Created.")), flags)
        }
        TenderCommands::List { kind, archived } => {
            let entries = app.service.list_tenders(ctx, tender_kind(*kind), *archived)?;
            respond(&limited(entries, app.limit(flags.limit)), None, flags)
        }
        TenderCommands::Show { id, kind } => {
            respond(&app.service.get_tender(ctx, tender_kind(*kind), id)?, None, flags)
        }
        TenderCommands::Set {
            id,
            kind,
            title,
            fields,
            eligibility_docs,
            annexures,
        } => {
            let update = tender_update(title.as_deref(), fields, eligibility_docs, annexures)?;
            if update.is_empty() {
                anyhow::bail!("nothing to update");
            }
            let record = app
                .service
                .update_tender_fields(ctx, tender_kind(*kind), id, &update)?;
            respond(&record, Some(Flash::success("Saved.")), flags)
        }
        TenderCommands::Extract {
            id,
            kind,
            notice_file,
            text,
        } => {
            let kind = tender_kind(*kind);
            let notice = match (text, notice_file) {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => read_text(path)?,
                (None, None) => {
                    let record = app.service.get_tender(ctx, kind, id)?;
                    let Some(path) = record.source_file else {
                        anyhow::bail!("no notice text: pass --notice-file or --text");
                    };
                    read_text(&path)?
                }
            };
            let extractor = HttpExtractor::from_config(&app.config.extraction)?;
            let outcome = app
                .service
                .extract_tender_fields(ctx, kind, id, &extractor, &notice)
                .await?;
            let flash = match &outcome.error {
                Some(error) => {
                    tracing::warn!(id = %id, %error, policy = %app.service.reset_policy(), "extraction failed");
                    let mut flash = Flash::for_error_kind(ErrorKind::ExternalService);
                    flash.level = FlashLevel::Warning;
                    flash
                }
                None => Flash::success("Fields extracted. Review them before creating a pack."),
            };
            respond(&outcome.record, Some(flash), flags)
        }
        TenderCommands::Archive { id, kind } => {
            let record = app.service.archive_tender(ctx, tender_kind(*kind), id)?;
            respond(&record, Some(Flash::success("Archived.")), flags)
        }
    }
}

fn tender_update(
    title: Option<&str>,
    fields: &[String],
    eligibility_docs: &[String],
    annexures: &[String],
) -> anyhow::Result<TenderUpdate> {
    let mut builder = TenderUpdateBuilder::new();
    if let Some(title) = title {
        builder = builder.title(title);
    }
    for (name, value) in parse_assignments(fields)? {
        builder = builder.field(name, value);
    }
    if !eligibility_docs.is_empty() {
        builder = builder.eligibility_docs(eligibility_docs.to_vec());
    }
    if !annexures.is_empty() {
        builder = builder.annexures(annexures.to_vec());
    }
    Ok(builder.build())
}

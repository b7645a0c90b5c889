use anyhow::Context;
use tender_core::entities::TemplateTable;
use tender_core::enums::{BodyFormat, TemplateScope};
use tender_core::identity::RequestContext;
use tender_core::responses::Flash;
use tender_store::repos::template::NewTemplate;
use tender_store::updates::template::{TemplateUpdate, TemplateUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{TemplateArgs, TemplateCommands};
use crate::commands::shared::input::{fill_values, read_json, read_text};
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::respond::{limited, respond};
use crate::context::AppContext;

/// Handle `tndr template`.
pub fn handle(
    action: &TemplateCommands,
    app: &AppContext,
    ctx: &RequestContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TemplateCommands::List => {
            let entries = app.service.list_templates(ctx)?;
            respond(&limited(entries, app.limit(flags.limit)), None, flags)
        }
        TemplateCommands::Show { id } => respond(&app.service.get_template(ctx, id)?, None, flags),
        TemplateCommands::Create { args, global } => {
            let input = new_template(args, *global)?;
            let template = app.service.create_template(ctx, input)?;
            respond(&template, Some(Flash::success("Template created.")), flags)
        }
        TemplateCommands::Update { id, args } => {
            let update = template_update(args)?;
            if update.is_empty() {
                anyhow::bail!("nothing to update");
            }
            let template = app.service.update_template(ctx, id, &update)?;
            respond(&template, Some(Flash::success("Template updated.")), flags)
        }
        TemplateCommands::Delete { id } => {
            app.service.delete_template(ctx, id)?;
            respond(
                &serde_json::json!({ "id": id, "deleted": true }),
                Some(Flash::success("Template deleted.")),
                flags,
            )
        }
        TemplateCommands::Fill { id, pack, values } => {
            let (overrides, tables) = fill_values(values)?;
            let preview = app
                .service
                .preview_template(ctx, id, pack.as_deref(), &overrides, &tables)?;
            let flash = (!preview.missing.is_empty()).then(|| {
                Flash::warning(format!("Left blank: {}", preview.missing.join(", ")))
            });
            respond(&preview, flash, flags)
        }
    }
}

fn body(args: &TemplateArgs) -> anyhow::Result<Option<String>> {
    match (&args.body, &args.body_file) {
        (Some(body), _) => Ok(Some(body.clone())),
        (None, Some(path)) => read_text(path).map(Some),
        (None, None) => Ok(None),
    }
}

fn tables(args: &TemplateArgs) -> anyhow::Result<Option<Vec<TemplateTable>>> {
    args.tables_file
        .as_deref()
        .map(read_json::<Vec<TemplateTable>>)
        .transpose()
}

fn body_format(args: &TemplateArgs) -> anyhow::Result<Option<BodyFormat>> {
    args.body_format
        .as_deref()
        .map(|raw| parse_enum(raw, "body format"))
        .transpose()
}

fn new_template(args: &TemplateArgs, global: bool) -> anyhow::Result<NewTemplate> {
    let title = args.title.clone().context("--title is required")?;
    let body = body(args)?.context("--body or --body-file is required")?;
    Ok(NewTemplate {
        scope: if global {
            TemplateScope::Global
        } else {
            TemplateScope::Contractor
        },
        title,
        category: args.category.clone().unwrap_or_default(),
        description: args.description.clone().unwrap_or_default(),
        body,
        format: body_format(args)?.unwrap_or_default(),
        tables: tables(args)?.unwrap_or_default(),
    })
}

fn template_update(args: &TemplateArgs) -> anyhow::Result<TemplateUpdate> {
    let mut builder = TemplateUpdateBuilder::new();
    if let Some(title) = &args.title {
        builder = builder.title(title);
    }
    if let Some(category) = &args.category {
        builder = builder.category(category);
    }
    if let Some(description) = &args.description {
        builder = builder.description(description);
    }
    if let Some(body) = body(args)? {
        builder = builder.body(body);
    }
    if let Some(format) = body_format(args)? {
        builder = builder.format(format);
    }
    if let Some(tables) = tables(args)? {
        builder = builder.tables(tables);
    }
    Ok(builder.build())
}

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    if let Err(error) = init_tracing(flags.quiet, flags.verbose) {
        eprintln!("tndr error: {error:#}");
        std::process::exit(1);
    }
    ui::init(&flags);

    if let Err(error) = run(cli.command, &flags).await {
        commands::boundary::report(&error, &flags);
        std::process::exit(1);
    }
}

async fn run(command: cli::Commands, flags: &cli::GlobalFlags) -> anyhow::Result<()> {
    match &command {
        cli::Commands::Init(args) => return commands::init::handle(args, flags),
        cli::Commands::Schema(args) => return commands::schema::handle(args, flags),
        _ => {}
    }

    let project_root = resolve_project_root(flags.project.as_deref())?;
    let _ = dotenvy::from_path(project_root.join(".env"));
    let config = tender_config::TenderConfig::load_at(&project_root)
        .context("failed to load configuration")?;

    let app = context::AppContext::init(project_root, config)
        .context("failed to open the record store")?;
    let request = context::request_context(&app.config, flags.acting_as.as_deref())?;

    commands::dispatch::dispatch(command, &app, &request, flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("TENDER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == tender_config::PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(std::path::Path::to_path_buf)
                .context("invalid --project path: '.tender' directory has no parent");
        }

        if explicit.is_dir() {
            return Ok(explicit);
        }

        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    context::find_project_root(&start)
        .context("not a tender project (no .tender directory found). Run 'tndr init' first.")
}

use std::path::{Path, PathBuf};

use anyhow::Context;
use tender_config::TenderConfig;
use tender_core::ids::validate_record_id;
use tender_core::responses::Flash;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::commands::shared::respond::respond;

/// Handle `tndr init`.
pub fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = match &flags.project {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let summary = init_project(&root, args)?;
    let flash = if summary.wrote_config {
        Flash::success(format!("Initialized {}", summary.config_path.display()))
    } else {
        Flash::info("Already initialized; pass --force to rewrite config.toml.")
    };
    respond(&summary, Some(flash), flags)
}

#[derive(Debug, serde::Serialize)]
struct InitSummary {
    project_root: PathBuf,
    config_path: PathBuf,
    data_dir: PathBuf,
    wrote_config: bool,
}

fn init_project(root: &Path, args: &InitArgs) -> anyhow::Result<InitSummary> {
    let mut config = TenderConfig::default();
    if let Some(yoj) = &args.yoj_id {
        validate_record_id("yoj_id", yoj.trim())?;
        config.general.yoj_id = yoj.trim().to_string();
    }

    let data_dir = config.storage.data_path(root);
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;

    let config_path = TenderConfig::project_config_path(root);
    let wrote_config = args.force || !config_path.exists();
    if wrote_config {
        let text = toml::to_string_pretty(&config).context("failed to serialize config")?;
        std::fs::write(&config_path, text)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        tracing::info!(path = %config_path.display(), "wrote project config");
    }

    Ok(InitSummary {
        project_root: root.to_path_buf(),
        config_path,
        data_dir,
        wrote_config,
    })
}

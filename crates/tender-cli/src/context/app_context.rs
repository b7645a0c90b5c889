use std::path::PathBuf;

use tender_config::TenderConfig;
use tender_store::TenderService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: TenderService,
    pub config: TenderConfig,
    pub project_root: PathBuf,
}

impl AppContext {
    /// Open the record store for the discovered project root.
    pub fn init(project_root: PathBuf, config: TenderConfig) -> anyhow::Result<Self> {
        let service = TenderService::from_config(&config, &project_root)?;
        if !config.extraction.is_configured() {
            tracing::debug!("extraction service not configured; `tender extract` is unavailable");
        }
        Ok(Self {
            service,
            config,
            project_root,
        })
    }

    /// List limit with precedence: `--limit` flag, then `general.default_limit`.
    #[must_use]
    pub fn limit(&self, flag: Option<u32>) -> usize {
        let limit = flag.unwrap_or(self.config.general.default_limit);
        usize::try_from(limit).unwrap_or(usize::MAX)
    }
}

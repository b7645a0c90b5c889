//! # tender-config
//!
//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TENDER_*` prefix, `__` as separator)
//! 2. Project-level `.tender/config.toml`
//! 3. User-level `~/.config/tender/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TENDER_EXTRACTION__API_KEY` -> `extraction.api_key`,
//! `TENDER_GENERAL__YOJ_ID` -> `general.yoj_id`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use tender_config::TenderConfig;
//!
//! let config = TenderConfig::load_with_dotenv().expect("config");
//!
//! if config.extraction.is_configured() {
//!     println!("Extraction model: {}", config.extraction.model);
//! }
//! ```

mod error;
mod extraction;
mod general;
mod print;
mod storage;

pub use error::ConfigError;
pub use extraction::ExtractionConfig;
pub use general::GeneralConfig;
pub use print::{DEFAULT_BLANK_MARKER, PrintConfig};
pub use storage::StorageConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Name of the per-project directory holding config and data.
pub const PROJECT_DIR: &str = ".tender";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TenderConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub print: PrintConfig,
}

impl TenderConfig {
    /// Load configuration from all sources, using the current directory as
    /// the project root.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_at(Path::new("."))
    }

    /// Load configuration for the project rooted at `project_root`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_at(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_at(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain for the current directory.
    pub fn figment() -> Figment {
        Self::figment_at(Path::new("."))
    }

    /// Build the figment provider chain for a project root.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment_at(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = Self::project_config_path(project_root);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TENDER_").split("__"))
    }

    /// Path of the project-local config file.
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join("config.toml")
    }

    /// Reject values that deserialize but make no sense.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.print.suggestion_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "print.suggestion_threshold".into(),
                reason: "must be between 0 and 1".into(),
            });
        }
        if self.extraction.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "extraction.timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// The extraction section, or an error if it lacks a URL or model.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when extraction is not set up.
    pub fn require_extraction(&self) -> Result<&ExtractionConfig, ConfigError> {
        if self.extraction.is_configured() {
            Ok(&self.extraction)
        } else {
            Err(ConfigError::NotConfigured {
                section: "extraction".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tender").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TenderConfig::default();
        assert!(!config.extraction.is_configured());
        assert!(!config.general.is_configured());
        assert!(config.storage.trail);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let config: TenderConfig = TenderConfig::figment_at(dir.path())
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.general.default_limit, 20);
        assert_eq!(config.storage.data_dir, ".tender/data");
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let mut config = TenderConfig::default();
        config.print.suggestion_threshold = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("print.suggestion_threshold"));
    }

    #[test]
    fn require_extraction_reports_section() {
        let err = TenderConfig::default().require_extraction().unwrap_err();
        assert!(matches!(err, ConfigError::NotConfigured { ref section } if section == "extraction"));
    }
}

use std::path::Path;

use figment::Jail;
use tender_config::TenderConfig;
use tender_core::enums::{ResetPolicy, Role};

#[test]
fn full_env_provider_chain() {
    Jail::expect_with(|jail| {
        jail.set_env("TENDER_GENERAL__YOJ_ID", "YOJ-ENV");
        jail.set_env("TENDER_GENERAL__ROLE", "admin");
        jail.set_env("TENDER_GENERAL__DEFAULT_LIMIT", "42");
        jail.set_env("TENDER_STORAGE__DATA_DIR", "/tmp/tender-data");
        jail.set_env("TENDER_EXTRACTION__BASE_URL", "http://localhost:11434");
        jail.set_env("TENDER_EXTRACTION__MODEL", "llama3");
        jail.set_env("TENDER_EXTRACTION__RESET_POLICY", "keep_previous");
        jail.set_env("TENDER_PRINT__BLANK_MARKER", "____");

        let config = TenderConfig::load_at(Path::new(".")).expect("config loads");

        assert_eq!(config.general.yoj_id, "YOJ-ENV");
        assert_eq!(config.general.role, Role::Admin);
        assert_eq!(config.general.default_limit, 42);
        assert_eq!(config.storage.data_dir, "/tmp/tender-data");
        assert!(config.extraction.is_configured());
        assert_eq!(config.extraction.reset_policy, ResetPolicy::KeepPrevious);
        assert_eq!(config.print.blank_marker, "____");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(".tender").map_err(|e| e.to_string())?;
        jail.create_file(
            ".tender/config.toml",
            r#"
[general]
yoj_id = "YOJ-TOML"
default_limit = 5
"#,
        )?;
        jail.set_env("TENDER_GENERAL__YOJ_ID", "YOJ-ENV");

        let config = TenderConfig::load_at(Path::new(".")).expect("config loads");
        assert_eq!(config.general.yoj_id, "YOJ-ENV");
        assert_eq!(config.general.default_limit, 5);
        Ok(())
    });
}

#[test]
fn log_filter_variable_does_not_break_extraction() {
    Jail::expect_with(|jail| {
        jail.set_env("TENDER_LOG", "debug");
        let config = TenderConfig::load_at(Path::new(".")).expect("config loads");
        assert_eq!(config.general.default_limit, 20);
        Ok(())
    });
}
